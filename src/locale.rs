//! Locale catalog: message templates and list conjunctions.
//!
//! Catalogs are YAML (see `locales/messages.yaml`, which is also compiled in
//! as the built-in catalog). Templates use named `%{slot}` placeholders that
//! are filled by [`interpolate`].

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::error::{RenderError, Result};

const BUILTIN_CATALOG: &str = include_str!("../locales/messages.yaml");
const FALLBACK_CODE: &str = "en";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"%\{(\w+)\}").unwrap();
}

static BUILTIN: Lazy<LocaleCatalog> = Lazy::new(|| {
    LocaleCatalog::from_yaml_str(BUILTIN_CATALOG).expect("built-in locale catalog is valid YAML")
});

/// Messages for one locale. Keys missing from a catalog file take the
/// English defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Catalog key, filled in after loading.
    #[serde(skip)]
    pub code: String,
    pub wikititle_with_ordinal: String,
    pub conjunction: String,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            code: FALLBACK_CODE.to_string(),
            wikititle_with_ordinal: "%{dictionary} %{ordinal}.".to_string(),
            conjunction: "or".to_string(),
        }
    }
}

impl Locale {
    /// Citation for a numbered homograph, e.g. `{{Vallader|Chaunt}} II.`
    pub fn ordinal_title(&self, dictionary: &str, ordinal: &str) -> String {
        interpolate(
            &self.wikititle_with_ordinal,
            &[("dictionary", dictionary), ("ordinal", ordinal)],
        )
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "fallback_code")]
    default: String,
    #[serde(default)]
    locales: HashMap<String, Locale>,
}

fn fallback_code() -> String {
    FALLBACK_CODE.to_string()
}

/// All locales known to a renderer, with a designated default.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    default: String,
    locales: HashMap<String, Locale>,
}

impl LocaleCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static LocaleCatalog {
        &BUILTIN
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;

        let mut locales: HashMap<String, Locale> = file
            .locales
            .into_iter()
            .map(|(code, mut locale)| {
                locale.code = code.clone();
                (code, locale)
            })
            .collect();

        if !locales.contains_key(&file.default) {
            warn!(
                "default locale {:?} missing from catalog, using English messages for it",
                file.default
            );
            let locale = Locale {
                code: file.default.clone(),
                ..Locale::default()
            };
            locales.insert(file.default.clone(), locale);
        }

        Ok(LocaleCatalog {
            default: file.default,
            locales,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        debug!("loading locale catalog from {}", path.display());
        Self::from_yaml_str(&contents)
    }

    pub fn default_locale(&self) -> &Locale {
        // from_yaml_str guarantees the default is present
        &self.locales[&self.default]
    }

    /// Look up `code`, falling back to its primary language subtag
    /// (`fr-CH` → `fr`) and then to the catalog default.
    pub fn get(&self, code: &str) -> &Locale {
        if let Some(locale) = self.lookup(code) {
            return locale;
        }
        debug!("no locale {:?}, falling back to {:?}", code, self.default);
        self.default_locale()
    }

    /// Like [`get`](Self::get) without the final fallback to the default.
    pub fn strict(&self, code: &str) -> Result<&Locale> {
        self.lookup(code)
            .ok_or_else(|| RenderError::UnknownLocale(code.to_string()))
    }

    /// Known locale codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn lookup(&self, code: &str) -> Option<&Locale> {
        self.locales.get(code).or_else(|| {
            let language = code.split(['-', '_']).next()?;
            self.locales.get(language)
        })
    }
}

/// Fill `%{name}` placeholders from `values`.
///
/// Values are inserted verbatim and never scanned for placeholders
/// themselves. Unknown placeholders are left in place.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match values.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => value.to_string(),
                None => {
                    warn!("no value for placeholder %{{{}}} in {:?}", name, template);
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

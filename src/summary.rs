//! Headword lists as natural-language sentences.
//!
//! An entry usually has several acceptable written forms; page titles show
//! them as "Chançuon, чаншӯн, or cançuon".

use crate::locale::Locale;
use crate::markup::escape_html;

/// Separators used by [`to_sentence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectors {
    /// Between all items but the last two of a list of three or more.
    pub words: String,
    /// Between the items of a two-item list.
    pub two_words: String,
    /// Before the last item of a list of three or more.
    pub last_word: String,
}

impl Connectors {
    /// "A or B", "A, B, or C" with `conjunction` in place of "or".
    pub fn alternatives(conjunction: &str) -> Self {
        Connectors {
            words: ", ".to_string(),
            two_words: format!(" {} ", conjunction),
            last_word: format!(", {} ", conjunction),
        }
    }

    pub fn for_locale(locale: &Locale) -> Self {
        Self::alternatives(&locale.conjunction)
    }
}

/// Join `items` into a sentence fragment.
pub fn to_sentence<S: AsRef<str>>(items: &[S], connectors: &Connectors) -> String {
    let items: Vec<&str> = items.iter().map(|item| item.as_ref()).collect();
    match items.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{}{}{}", first, connectors.two_words, second),
        [init @ .., last] => {
            format!("{}{}{}", init.join(connectors.words.as_str()), connectors.last_word, last)
        }
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `form` with its first character's case swapped.
fn swap_first_case(form: &str) -> String {
    let mut chars = form.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut swapped = String::with_capacity(form.len());
    if first.is_uppercase() {
        swapped.extend(first.to_lowercase());
    } else if first.is_lowercase() {
        swapped.extend(first.to_uppercase());
    } else {
        swapped.push(first);
    }
    swapped.extend(chars);
    swapped
}

/// Drop empty forms, repeats, and forms differing from an earlier one only
/// in the case of their first letter. Order is kept; the first spelling wins.
///
/// Only the first character is case-folded: "Cançuon" duplicates "cançuon",
/// but "CANÇUON" does not.
pub fn dedupe_case_variants<S: AsRef<str>>(forms: &[S]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(forms.len());
    for form in forms {
        let form: &str = form.as_ref();
        if form.is_empty() {
            continue;
        }
        let swapped = swap_first_case(form);
        if kept.iter().any(|k| k == form || *k == swapped) {
            continue;
        }
        kept.push(form.to_string());
    }
    kept
}

/// The distinct headword forms joined as alternatives, sentence-cased.
///
/// Forms differing only in the case of their first letter collapse to the
/// first one seen. Exact repeats and empty forms are dropped as well.
pub fn summarize<S: AsRef<str>>(forms: &[S], locale: &Locale) -> String {
    let distinct = dedupe_case_variants(forms);
    sentence_case(&to_sentence(&distinct, &Connectors::for_locale(locale)))
}

/// [`summarize`], escaped for direct use in HTML.
pub fn summarize_html<S: AsRef<str>>(forms: &[S], locale: &Locale) -> String {
    escape_html(&summarize(forms, locale))
}

//! Wiki-style markup to HTML.
//!
//! Authors write notes and glosses with a tiny subset of wikitext:
//! `'''bold'''`, `''italic''`, `[[target]]` and `[[target|label]]`.
//! [`translate`] turns that into HTML with a fixed sequence of regex passes;
//! the order of the passes matters and must not be rearranged.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"'''(.+?)'''").unwrap();
    static ref ITALIC: Regex = Regex::new(r"''(.+?)''").unwrap();

    // Targets never span brackets or markup emitted by an earlier pass, so an
    // anchor built from one link can't end up inside another's attributes.

    // [[target]] plus trailing word characters
    static ref PLAIN_LINK: Regex = Regex::new(r#"\[\[([^|\[\]<>"]+?)\]\](\w*)"#).unwrap();
    // [[target|label]] plus trailing word characters, split at the first pipe
    static ref PIPED_LINK: Regex = Regex::new(r#"\[\[([^|\[\]<>"]+?)\|(.+?)\]\](\w*)"#).unwrap();

    // Structural decomposition of unescaped markup, leftmost alternative wins
    static ref TOKEN: Regex = Regex::new(
        r"'''(?P<bold>.+?)'''|''(?P<italic>.+?)''|\[\[(?P<target>[^|\]]+?)(?:\|(?P<label>.+?))?\]\](?P<trail>\w*)"
    ).unwrap();
}

/// One recognised unit of wiki markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Bold(String),
    Italic(String),
    /// `[[target|label]]trail`; `trail` is the run of word characters glued
    /// to the closing brackets, e.g. the "es" in `[[Cat|Dog]]es`.
    Link {
        target: String,
        label: Option<String>,
        trail: String,
    },
}

impl Token {
    /// Text a reader sees for this token, without any formatting.
    pub fn text(&self) -> String {
        match self {
            Token::Literal(text) => text.clone(),
            Token::Bold(span) | Token::Italic(span) => plain_text(span),
            Token::Link { target, label, trail } => {
                format!("{}{}", label.as_deref().unwrap_or(target), trail)
            }
        }
    }
}

/// Escape the characters that are significant in HTML text and attributes.
///
/// Apostrophes are left alone: they are the bold and italic delimiters and
/// have to survive escaping.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Translate a wiki-markup string into HTML.
///
/// Each pass works on the output of the previous one: escape, bold, italic,
/// plain links, piped links. Unterminated markers are left as literal text.
/// The result is not meant to be fed back in; a second pass double-escapes.
pub fn translate(raw: &str) -> String {
    let output = escape_html(raw);
    let output = BOLD.replace_all(&output, "<b>${1}</b>");
    let output = ITALIC.replace_all(&output, "<i>${1}</i>");
    let output = PLAIN_LINK.replace_all(
        &output,
        r#"<a href="/html/${1}" title="${1}">${1}</a>${2}"#,
    );
    PIPED_LINK
        .replace_all(&output, r#"<a href="/html/${1}" title="${1}">${2}</a>${3}"#)
        .into_owned()
}

/// Split unescaped markup into tokens, left to right.
///
/// At any position bold is tried before italic before a link. Spans are not
/// tokenized recursively. Text outside a recognised token becomes
/// [`Token::Literal`], with adjacent literal runs merged.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for cap in TOKEN.captures_iter(raw) {
        let Some(whole) = cap.get(0) else { continue };
        if whole.start() > last {
            tokens.push(Token::Literal(raw[last..whole.start()].to_string()));
        }

        let token = if let Some(span) = cap.name("bold") {
            Token::Bold(span.as_str().to_string())
        } else if let Some(span) = cap.name("italic") {
            Token::Italic(span.as_str().to_string())
        } else {
            Token::Link {
                target: cap.name("target").map_or("", |m| m.as_str()).to_string(),
                label: cap.name("label").map(|m| m.as_str().to_string()),
                trail: cap.name("trail").map_or("", |m| m.as_str()).to_string(),
            }
        };
        tokens.push(token);
        last = whole.end();
    }

    if last < raw.len() {
        tokens.push(Token::Literal(raw[last..].to_string()));
    }
    tokens
}

/// Strip all markup, keeping only what a reader would see.
pub fn plain_text(raw: &str) -> String {
    tokenize(raw).iter().map(Token::text).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tokenize_tests {
    use super::*;

    #[test]
    fn mixed_markup() {
        let tokens = tokenize("'''b''' and ''i'' in [[Cat|Dog]]s!");
        assert_eq!(
            tokens,
            vec![
                Token::Bold("b".to_string()),
                Token::Literal(" and ".to_string()),
                Token::Italic("i".to_string()),
                Token::Literal(" in ".to_string()),
                Token::Link {
                    target: "Cat".to_string(),
                    label: Some("Dog".to_string()),
                    trail: "s".to_string(),
                },
                Token::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn plain_link_has_no_label() {
        assert_eq!(
            tokenize("[[word]]"),
            vec![Token::Link {
                target: "word".to_string(),
                label: None,
                trail: String::new(),
            }]
        );
    }

    #[test]
    fn malformed_markup_is_literal() {
        assert_eq!(tokenize("'''open [[x"), vec![Token::Literal("'''open [[x".to_string())]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(plain_text("'''[[Cat|Dog]]s''' and ''x''"), "Dogs and x");
        assert_eq!(plain_text("no markup"), "no markup");
    }
}

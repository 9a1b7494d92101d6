//! Link labels for parsed forms.
//!
//! A parse names a form attested in the corpus. When a lexeme exists for it
//! the form links to the entry; otherwise the label invites creating one and
//! shows how often the form is attested.

use crate::markup::escape_html;

fn span_class(wanted: bool) -> &'static str {
    if wanted {
        "hw-link wanted"
    } else {
        "hw-link"
    }
}

/// Label for a form that has an entry.
pub fn headword_link_label(form: &str, wanted: bool) -> String {
    format!("<span class='{}'>{}</span>", span_class(wanted), escape_html(form))
}

/// Label for a form without an entry, with its attestation count.
pub fn missing_headword_label(form: &str, count: usize, wanted: bool) -> String {
    format!(
        "<span class='{}'>[No entry for <i>{}</i> &times;{}]</span>",
        span_class(wanted),
        escape_html(form),
        count
    )
}

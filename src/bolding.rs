//! Wikibold around a string that may contain pipe-linked wikilinks.
//!
//! Wrapping `a|b` as `'''a|b'''` is fine for the translator, but a bare pipe
//! next to a link (`'''[[x|y]] | z'''`) is ambiguous once the string is
//! embedded in other wiki syntax. Every pipe that isn't the label separator
//! of an open link gets its own bold delimiters instead: `'''|'''`.

use crate::markup::translate;

const BOLD_MARKER: &str = "'''";
const BOLD_PIPE: &str = "'''|'''";

/// Scanner state carried across the fold.
#[derive(Debug, Default)]
struct PipeScan {
    /// Open `[` minus `]`, never below zero.
    depth: usize,
    /// Set by `[`; cleared once the link's label separator has been seen.
    inside_link: bool,
    output: String,
}

impl PipeScan {
    fn step(mut self, ch: char) -> Self {
        match ch {
            '[' => {
                self.depth += 1;
                self.inside_link = true;
                self.output.push(ch);
            }
            ']' => {
                self.inside_link = self.depth != 0;
                self.depth = self.depth.saturating_sub(1);
                self.output.push(ch);
            }
            '|' if self.depth == 0 || !self.inside_link => {
                self.output.push_str(BOLD_PIPE);
            }
            '|' => {
                // the link's separator; a second pipe in the same link is text
                self.inside_link = false;
                self.output.push(ch);
            }
            _ => self.output.push(ch),
        }
        self
    }
}

/// Wrap `text` in bold markers, re-bolding around every pipe that is not a
/// link separator.
///
/// The scan runs over the already-wrapped `'''text'''`. Unbalanced brackets
/// are tolerated: the depth is clamped at zero.
pub fn escape_for_bolding(text: &str) -> String {
    let wrapped = format!("{BOLD_MARKER}{text}{BOLD_MARKER}");
    let initial = PipeScan {
        output: String::with_capacity(wrapped.len() + 8),
        ..PipeScan::default()
    };
    wrapped.chars().fold(initial, PipeScan::step).output
}

/// Render `text` as bold HTML, keeping any links inside it intact.
pub fn bold(text: &str) -> String {
    translate(&escape_for_bolding(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // escape_for_bolding
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn plain_text_is_just_wrapped() {
        assert_eq!(escape_for_bolding("cançuon"), "'''cançuon'''");
    }

    #[test]
    fn empty_text() {
        assert_eq!(escape_for_bolding(""), "''''''");
    }

    #[test]
    fn top_level_pipe_is_wrapped() {
        assert_eq!(escape_for_bolding("a|b"), "'''a'''|'''b'''");
    }

    #[test]
    fn link_separator_is_kept() {
        assert_eq!(escape_for_bolding("[[x|y]]"), "'''[[x|y]]'''");
    }

    #[test]
    fn pipe_after_closed_link_is_wrapped() {
        assert_eq!(
            escape_for_bolding("[[x|y]] | z"),
            "'''[[x|y]] '''|''' z'''"
        );
    }

    #[test]
    fn second_pipe_in_one_link_is_wrapped() {
        assert_eq!(escape_for_bolding("[[x|y|z]]"), "'''[[x|y'''|'''z]]'''");
    }

    #[test]
    fn each_link_gets_its_own_separator() {
        assert_eq!(
            escape_for_bolding("[[a|b]]|[[c|d]]"),
            "'''[[a|b]]'''|'''[[c|d]]'''"
        );
    }

    #[test]
    fn stray_closing_brackets_do_not_go_negative() {
        // the `]]` are clamped, so the following `[[` opens a real link
        assert_eq!(escape_for_bolding("]]|[[a|b]]"), "''']]'''|'''[[a|b]]'''");
    }

    #[test]
    fn unclosed_link_keeps_its_separator() {
        assert_eq!(escape_for_bolding("[[a|b"), "'''[[a|b'''");
    }

    // ─────────────────────────────────────────────────────────────
    // bold
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn bold_plain_text() {
        assert_eq!(bold("word"), "<b>word</b>");
    }

    #[test]
    fn bold_around_pipes() {
        assert_eq!(bold("a|b"), "<b>a</b>|<b>b</b>");
    }

    #[test]
    fn bold_keeps_link() {
        assert_eq!(
            bold("[[x|y]]"),
            r#"<b><a href="/html/x" title="x">y</a></b>"#
        );
    }
}

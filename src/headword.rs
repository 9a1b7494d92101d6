//! Headword citations and homograph disambiguation.
//!
//! Lexemes in one dictionary that share a headword form are told apart by a
//! Roman numeral taken from their position in the homograph group, which the
//! caller supplies in display order.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::locale::Locale;
use crate::roman::romanize;

/// A lexical entry as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    pub id: u64,
    /// Title of the dictionary the entry belongs to.
    #[serde(default)]
    pub dictionary: String,
    /// Candidate written forms, best first.
    #[serde(default)]
    pub headwords: Vec<String>,
    /// Free-text notes in wiki markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Lexeme {
    pub fn new(id: u64, dictionary: &str, headwords: &[&str]) -> Self {
        Lexeme {
            id,
            dictionary: dictionary.to_string(),
            headwords: headwords.iter().map(|h| h.to_string()).collect(),
            notes: None,
        }
    }

    /// The form the entry is filed under.
    pub fn primary_form(&self) -> Option<&str> {
        self.headwords.first().map(String::as_str)
    }
}

/// Sort key for a headword: first letter upper-cased, the rest lower-cased,
/// spaces dropped.
///
/// This is a stand-in for real per-language collation.
pub fn sort_key(form: &str) -> String {
    let mut chars = form.chars();
    let mut key = String::with_capacity(form.len());
    if let Some(first) = chars.next() {
        key.extend(first.to_uppercase());
        key.extend(chars.flat_map(char::to_lowercase));
    }
    key.retain(|c| c != ' ');
    key
}

/// The `{{Dictionary|Sortkey}}` citation fragment.
pub fn citation(dictionary: &str, form: &str) -> String {
    format!("{{{{{}|{}}}}}", dictionary, sort_key(form))
}

/// Where an entry sits in its homograph group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSlot {
    /// 0-based position in display order
    pub index: usize,
    /// Size of the group
    pub count: usize,
}

impl GroupSlot {
    /// The slot of an entry without homographs.
    pub const ALONE: GroupSlot = GroupSlot { index: 0, count: 1 };

    /// Roman ordinal for this slot; `None` for singleton groups.
    pub fn ordinal(self) -> Result<Option<String>> {
        debug_assert!(self.index < self.count.max(1), "slot {:?} outside its group", self);
        if self.count <= 1 {
            return Ok(None);
        }
        romanize(self.index + 1).map(Some)
    }
}

/// Slot of `entry` in `group`, found by id.
///
/// An entry missing from `group` is treated as alone, since guessing a
/// position would mislabel it.
pub fn slot_in(entry: &Lexeme, group: &[Lexeme]) -> GroupSlot {
    match group.iter().position(|member| member.id == entry.id) {
        Some(index) => GroupSlot { index, count: group.len() },
        None => {
            warn!(
                "lexeme {} is not in its homograph group ({} members), rendering without ordinal",
                entry.id,
                group.len()
            );
            GroupSlot::ALONE
        }
    }
}

/// Roman ordinal of `entry` within its homograph group, if it needs one.
pub fn ordinal_for(entry: &Lexeme, group: &[Lexeme]) -> Result<Option<String>> {
    slot_in(entry, group).ordinal()
}

/// Wiki title for `entry`: the dictionary citation, plus `locale`'s ordinal
/// template when the entry has homographs.
pub fn title_for(entry: &Lexeme, group: &[Lexeme], locale: &Locale) -> Result<String> {
    title_at(entry, slot_in(entry, group), locale)
}

/// [`title_for`] with the entry's slot already known.
pub fn title_at(entry: &Lexeme, slot: GroupSlot, locale: &Locale) -> Result<String> {
    let form = entry
        .primary_form()
        .ok_or(RenderError::MissingHeadword { id: entry.id })?;
    let citation = citation(&entry.dictionary, form);

    Ok(match slot.ordinal()? {
        Some(ordinal) => locale.ordinal_title(&citation, &ordinal),
        None => citation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(forms: &[(u64, &str)]) -> Vec<Lexeme> {
        forms
            .iter()
            .map(|&(id, form)| Lexeme::new(id, "Vallader", &[form]))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // sort_key / citation
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn sort_key_capitalizes_and_strips_spaces() {
        assert_eq!(sort_key("la chaunt"), "Lachaunt");
        assert_eq!(sort_key("ÉCOLE"), "École");
        assert_eq!(sort_key("cançuon"), "Cançuon");
        assert_eq!(sort_key(""), "");
    }

    #[test]
    fn citation_fragment() {
        assert_eq!(citation("Vallader", "chaunt"), "{{Vallader|Chaunt}}");
    }

    // ─────────────────────────────────────────────────────────────
    // title_for
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn singleton_group_has_no_ordinal() {
        let members = group(&[(1, "chaunt")]);
        let title = title_for(&members[0], &members, &Locale::default()).unwrap();
        assert_eq!(title, "{{Vallader|Chaunt}}");
    }

    #[test]
    fn homographs_are_numbered_by_position() {
        let members = group(&[(7, "chaunt"), (3, "chaunt"), (5, "chaunt")]);
        let titles: Vec<String> = members
            .iter()
            .map(|m| title_for(m, &members, &Locale::default()).unwrap())
            .collect();
        assert_eq!(
            titles,
            vec![
                "{{Vallader|Chaunt}} I.",
                "{{Vallader|Chaunt}} II.",
                "{{Vallader|Chaunt}} III.",
            ]
        );
    }

    #[test]
    fn ordinals_are_stable_across_calls() {
        let members = group(&[(1, "a"), (2, "a")]);
        let first = title_for(&members[1], &members, &Locale::default()).unwrap();
        let second = title_for(&members[1], &members, &Locale::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "{{Vallader|A}} II.");
    }

    #[test]
    fn ordinal_follows_caller_order_not_id() {
        let members = group(&[(2, "a"), (1, "a")]);
        assert_eq!(ordinal_for(&members[0], &members).unwrap(), Some("I".to_string()));
        assert_eq!(ordinal_for(&members[1], &members).unwrap(), Some("II".to_string()));
    }

    #[test]
    fn entry_missing_from_group_is_unordinaled() {
        let members = group(&[(1, "a"), (2, "a")]);
        let stray = Lexeme::new(99, "Vallader", &["a"]);
        assert_eq!(title_for(&stray, &members, &Locale::default()).unwrap(), "{{Vallader|A}}");
        assert_eq!(title_for(&stray, &[], &Locale::default()).unwrap(), "{{Vallader|A}}");
    }

    #[test]
    fn lexeme_without_headword_is_an_error() {
        let bare = Lexeme::new(4, "Vallader", &[]);
        assert!(matches!(
            title_for(&bare, &[], &Locale::default()),
            Err(RenderError::MissingHeadword { id: 4 })
        ));
    }

    #[test]
    fn ordinal_beyond_roman_range_is_an_error() {
        let members: Vec<Lexeme> = (0..4000).map(|id| Lexeme::new(id, "D", &["x"])).collect();
        assert_eq!(
            title_for(&members[3998], &members, &Locale::default()).unwrap(),
            "{{D|X}} MMMCMXCIX."
        );
        assert!(matches!(
            title_for(&members[3999], &members, &Locale::default()),
            Err(RenderError::OrdinalOutOfRange(4000))
        ));
    }

    // ─────────────────────────────────────────────────────────────
    // title_at / GroupSlot
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn title_at_uses_slot_not_id() {
        // same id twice: only the slot tells them apart
        let twin = Lexeme::new(5, "D", &["x"]);
        let titles: Vec<String> = (0..3)
            .map(|index| title_at(&twin, GroupSlot { index, count: 3 }, &Locale::default()).unwrap())
            .collect();
        assert_eq!(titles, vec!["{{D|X}} I.", "{{D|X}} II.", "{{D|X}} III."]);
    }

    #[test]
    fn alone_slot_has_no_ordinal() {
        assert_eq!(GroupSlot::ALONE.ordinal().unwrap(), None);
        assert_eq!(
            GroupSlot { index: 1, count: 2 }.ordinal().unwrap(),
            Some("II".to_string())
        );
    }

    #[test]
    fn slot_in_falls_back_to_alone() {
        let members = group(&[(1, "a"), (2, "a")]);
        let stray = Lexeme::new(9, "Vallader", &["a"]);
        assert_eq!(slot_in(&members[1], &members), GroupSlot { index: 1, count: 2 });
        assert_eq!(slot_in(&stray, &members), GroupSlot::ALONE);
    }

    #[test]
    fn locale_template_is_used() {
        let locale = Locale {
            wikititle_with_ordinal: "%{dictionary} (%{ordinal})".to_string(),
            ..Locale::default()
        };
        let members = group(&[(1, "a"), (2, "a")]);
        assert_eq!(title_for(&members[0], &members, &locale).unwrap(), "{{Vallader|A}} (I)");
    }

    #[test]
    fn secondary_headwords_do_not_affect_citation() {
        let lexeme = Lexeme::new(1, "Puter", &["chanzun", "Chanzun", "chanzùn"]);
        assert_eq!(
            title_for(&lexeme, std::slice::from_ref(&lexeme), &Locale::default()).unwrap(),
            "{{Puter|Chanzun}}"
        );
    }
}

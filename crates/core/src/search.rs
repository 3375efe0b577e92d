//! Per-day search over categories and their notes.
//!
//! Matching is a case-insensitive substring test. A category is kept when its
//! own name matches or when any of its notes' text matches.

use std::collections::HashSet;

use crate::types::DbId;

/// A normalized search term for one day view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilter {
    term: Option<String>,
}

impl DayFilter {
    /// Build a filter from a raw query value. Blank input disables filtering.
    pub fn new(raw: Option<&str>) -> Self {
        let term = raw
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Self { term }
    }

    pub fn is_active(&self) -> bool {
        self.term.is_some()
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Whether `text` contains the term. Always true for an inactive filter.
    pub fn matches_text(&self, text: &str) -> bool {
        match &self.term {
            Some(term) => text.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    /// Keep the items whose name matches or that own a matching note.
    ///
    /// `note_texts` pairs each note's text with its category id.
    pub fn apply<T>(
        &self,
        items: Vec<T>,
        name_of: impl Fn(&T) -> &str,
        id_of: impl Fn(&T) -> DbId,
        note_texts: &[(DbId, String)],
    ) -> Vec<T> {
        if !self.is_active() {
            return items;
        }

        let with_matching_notes: HashSet<DbId> = note_texts
            .iter()
            .filter(|(_, text)| self.matches_text(text))
            .map(|(category_id, _)| *category_id)
            .collect();

        items
            .into_iter()
            .filter(|item| {
                self.matches_text(name_of(item)) || with_matching_notes.contains(&id_of(item))
            })
            .collect()
    }
}

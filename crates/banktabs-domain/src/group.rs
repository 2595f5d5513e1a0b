//! Group store.
//!
//! Owns the tab definitions: group name to token list, the display ordering
//! and the per-group column widths. Mutation is crate-private so every change
//! goes through a command.

use crate::token::MatchToken;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Name of the catch-all group that always exists.
pub const RESERVED_GROUP: &str = "All";

/// The single place that decides whether a group gets reserved-group treatment.
pub fn is_reserved(name: &str) -> bool {
    name == RESERVED_GROUP
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStore {
    groups: BTreeMap<String, Vec<MatchToken>>,
    ordering: Vec<String>,
    column_widths: BTreeMap<String, u32>,
}

impl Default for GroupStore {
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(RESERVED_GROUP.to_string(), vec![MatchToken::Wildcard]);
        Self {
            groups,
            ordering: vec![RESERVED_GROUP.to_string()],
            column_widths: BTreeMap::new(),
        }
    }
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded parts, repairing whatever breaks the invariants:
    /// names are trimmed, the reserved group is re-added with its wildcard,
    /// stale or duplicate ordering entries are dropped and unlisted groups are
    /// appended in the order they were given.
    ///
    /// When two names trim to the same group, the one that needed no trimming wins.
    pub fn from_parts(
        groups: impl IntoIterator<Item = (String, Vec<MatchToken>)>,
        ordering: Vec<String>,
        column_widths: BTreeMap<String, u32>,
    ) -> Self {
        let mut clean: BTreeMap<String, Vec<MatchToken>> = BTreeMap::new();
        let mut arrival = Vec::new();
        let mut padded = Vec::new();
        for (name, tokens) in groups {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                tracing::debug!("Skipping unusable group name {:?}", name);
            } else if trimmed.len() != name.len() {
                padded.push((trimmed.to_string(), tokens));
            } else if !clean.contains_key(&name) {
                arrival.push(name.clone());
                clean.insert(name, tokens);
            }
        }
        for (name, tokens) in padded {
            if clean.contains_key(&name) {
                tracing::debug!("Skipping padded duplicate of group {:?}", name);
                continue;
            }
            arrival.push(name.clone());
            clean.insert(name, tokens);
        }

        match clean.get_mut(RESERVED_GROUP) {
            None => {
                tracing::info!("Inserted missing {} group", RESERVED_GROUP);
                clean.insert(RESERVED_GROUP.to_string(), vec![MatchToken::Wildcard]);
            }
            Some(tokens) if !tokens.iter().any(MatchToken::is_wildcard) => {
                tracing::warn!("Restored wildcard of the {} group", RESERVED_GROUP);
                tokens.insert(0, MatchToken::Wildcard);
            }
            Some(_) => {}
        }

        let mut seen = HashSet::new();
        let mut order: Vec<String> = ordering
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| clean.contains_key(name) && seen.insert(name.clone()))
            .collect();

        if !seen.contains(RESERVED_GROUP) {
            order.insert(0, RESERVED_GROUP.to_string());
            seen.insert(RESERVED_GROUP.to_string());
        }
        for name in arrival {
            if seen.insert(name.clone()) {
                order.push(name);
            }
        }

        let column_widths = column_widths
            .into_iter()
            .filter(|(name, _)| clean.contains_key(name))
            .collect();

        Self {
            groups: clean,
            ordering: order,
            column_widths,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn tokens(&self, name: &str) -> Option<&[MatchToken]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    pub fn ordering(&self) -> &[String] {
        &self.ordering
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.ordering.iter().position(|n| n == name)
    }

    /// Groups in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchToken])> {
        self.ordering.iter().filter_map(move |name| {
            self.groups
                .get(name)
                .map(|tokens| (name.as_str(), tokens.as_slice()))
        })
    }

    pub fn column_width(&self, name: &str) -> Option<u32> {
        self.column_widths.get(name).copied()
    }

    pub fn column_widths(&self) -> &BTreeMap<String, u32> {
        &self.column_widths
    }

    pub(crate) fn groups(&self) -> &BTreeMap<String, Vec<MatchToken>> {
        &self.groups
    }

    /// `ordering` and the group keys are set-equal, without duplicates, and
    /// both hold the reserved group.
    pub fn is_consistent(&self) -> bool {
        let ordered: HashSet<&str> = self.ordering.iter().map(String::as_str).collect();
        let keys: HashSet<&str> = self.groups.keys().map(String::as_str).collect();
        ordered.len() == self.ordering.len()
            && ordered == keys
            && keys.contains(RESERVED_GROUP)
    }

    pub(crate) fn insert_group(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.groups.insert(name.to_string(), Vec::new());
        self.ordering.push(name.to_string());
        true
    }

    pub(crate) fn remove_group(&mut self, name: &str) -> bool {
        if self.groups.remove(name).is_none() {
            return false;
        }
        self.ordering.retain(|n| n != name);
        self.column_widths.remove(name);
        true
    }

    pub(crate) fn tokens_mut(&mut self, name: &str) -> Option<&mut Vec<MatchToken>> {
        self.groups.get_mut(name)
    }

    pub(crate) fn all_tokens_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<MatchToken>)> {
        self.groups.iter_mut()
    }

    /// Swap `name` with its neighbour; false at either boundary.
    pub(crate) fn swap(&mut self, name: &str, direction: Direction) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        let neighbor = match direction {
            Direction::Left => index.checked_sub(1),
            Direction::Right => Some(index + 1).filter(|n| *n < self.ordering.len()),
        };
        match neighbor {
            Some(other) => {
                self.ordering.swap(index, other);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_column_width(&mut self, name: &str, width: u32) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.column_widths.insert(name.to_string(), width);
        true
    }

    /// Render-ready description of each group in display order.
    pub fn descriptors(&self, selected: &str) -> Vec<GroupDescriptor> {
        let last = self.ordering.len().saturating_sub(1);
        self.ordering
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let reserved = is_reserved(name);
                GroupDescriptor {
                    name: name.clone(),
                    is_selected: name == selected,
                    is_reserved: reserved,
                    can_move_left: index > 0 && !reserved,
                    can_move_right: index < last,
                    removable: !reserved,
                    saved_width: self.column_width(name),
                }
            })
            .collect()
    }
}

/// What the presentation layer needs to draw one tab control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub name: String,
    pub is_selected: bool,
    pub is_reserved: bool,
    pub can_move_left: bool,
    pub can_move_right: bool,
    pub removable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_width: Option<u32>,
}

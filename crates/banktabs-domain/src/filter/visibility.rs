use crate::group::GroupStore;
use crate::item::{BankItem, BankSlot};
use crate::matcher::{GroupQuery, ItemMatcher};
use banktabs_core::AppConfig;
use serde::{Deserialize, Serialize};

/// What the presentation layer should do with one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotDecision {
    Show,
    Hide,
    GrayOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Under a wildcard selection, hide items another group claims.
    pub hide_from_all: bool,
    /// Dim unmatched slots rather than hiding them.
    pub gray_out: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FilterOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            hide_from_all: config.hide_from_all,
            gray_out: config.gray_out,
        }
    }
}

impl FilterOptions {
    /// Decision for a slot that does not match (or is empty).
    pub fn unmatched(&self) -> SlotDecision {
        if self.gray_out {
            SlotDecision::GrayOut
        } else {
            SlotDecision::Hide
        }
    }
}

/// Which rule set applies to occupied slots for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Wildcard selection, every item shown.
    ShowAll,
    /// Wildcard selection, items claimed by another group are hidden.
    Unclaimed,
    /// Ordinary group, only members shown.
    Members,
}

impl FilterMode {
    pub fn for_query(query: &GroupQuery<'_>, options: &FilterOptions) -> Self {
        match (query.is_wildcard(), options.hide_from_all) {
            (true, false) => Self::ShowAll,
            (true, true) => Self::Unclaimed,
            (false, _) => Self::Members,
        }
    }
}

/// Decide every slot from scratch.
///
/// An unknown `selected` group behaves like an empty token list, so nothing
/// matches. Empty slots never match in any mode.
pub fn compute_visibility(
    selected: &str,
    store: &GroupStore,
    slots: &[BankSlot],
    options: FilterOptions,
) -> Vec<SlotDecision> {
    let tokens = store.tokens(selected).unwrap_or_default();
    let query = GroupQuery::new(tokens);
    let mode = FilterMode::for_query(&query, &options);
    let unmatched = options.unmatched();

    tracing::trace!(
        "Filtering {} slots for group {:?} in {:?} mode",
        slots.len(),
        selected,
        mode
    );

    slots
        .iter()
        .map(|slot| match slot {
            None => unmatched,
            Some(item) => {
                let visible = match mode {
                    FilterMode::ShowAll => true,
                    FilterMode::Unclaimed => !claimed_elsewhere(selected, store, item),
                    FilterMode::Members => query.matches(item),
                };
                if visible {
                    SlotDecision::Show
                } else {
                    unmatched
                }
            }
        })
        .collect()
}

fn claimed_elsewhere(selected: &str, store: &GroupStore, item: &BankItem) -> bool {
    store
        .iter()
        .filter(|(name, _)| *name != selected)
        .any(|(_, tokens)| GroupQuery::new(tokens).claims(item))
}

/// Decisions that undo any filtering, used when the feature shuts down.
pub fn restore_all(slot_count: usize) -> Vec<SlotDecision> {
    vec![SlotDecision::Show; slot_count]
}

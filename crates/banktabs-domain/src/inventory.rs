//! Live inventory access.
//!
//! The host owns the bank contents; the filter only ever takes a fresh
//! snapshot through `InventorySource` at decision time.

use crate::item::{BankItem, BankSlot, ItemDefinition, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only view of the host's bank.
pub trait InventorySource {
    /// False while the bank surface is not open; every session operation is
    /// then a no-op.
    fn is_available(&self) -> bool;

    /// Item id per slot index, `None` for an empty slot.
    fn bank_items(&self) -> Vec<Option<ItemId>>;

    fn item_definition(&self, id: ItemId) -> Option<ItemDefinition>;

    /// Resolve every slot to a `BankItem`, naming unknown ids `"Item <id>"`.
    fn resolve_slots(&self) -> Vec<BankSlot> {
        self.bank_items()
            .into_iter()
            .map(|slot| slot.map(|id| self.resolve_item(id)))
            .collect()
    }

    fn resolve_item(&self, id: ItemId) -> BankItem {
        BankItem::resolve(id, self.item_definition(id).as_ref())
    }
}

/// One slot of a serialized inventory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub id: ItemId,
}

/// Inventory captured to JSON, used by the CLI and TUI hosts.
///
/// ```json
/// {"slots": [{"id": 512}, null], "definitions": [{"id": 512, "name": "apple"}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub slots: Vec<Option<SlotEntry>>,
    #[serde(default)]
    pub definitions: Vec<ItemDefinition>,
    /// A snapshot taken while the bank was closed carries no usable slots.
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(skip)]
    index: HashMap<ItemId, usize>,
}

fn default_open() -> bool {
    true
}

impl InventorySnapshot {
    pub fn new(slots: Vec<Option<ItemId>>, definitions: Vec<ItemDefinition>) -> Self {
        let mut snapshot = Self {
            slots: slots.into_iter().map(|s| s.map(|id| SlotEntry { id })).collect(),
            definitions,
            open: true,
            index: HashMap::new(),
        };
        snapshot.reindex();
        snapshot
    }

    /// A snapshot representing a closed bank.
    pub fn closed() -> Self {
        Self {
            slots: Vec::new(),
            definitions: Vec::new(),
            open: false,
            index: HashMap::new(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        snapshot.reindex();
        Ok(snapshot)
    }

    fn reindex(&mut self) {
        self.index = self
            .definitions
            .iter()
            .enumerate()
            .map(|(pos, def)| (def.id, pos))
            .collect();
    }
}

impl InventorySource for InventorySnapshot {
    fn is_available(&self) -> bool {
        self.open
    }

    fn bank_items(&self) -> Vec<Option<ItemId>> {
        self.slots.iter().map(|s| s.map(|entry| entry.id)).collect()
    }

    fn item_definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.index
            .get(&id)
            .and_then(|pos| self.definitions.get(*pos))
            .cloned()
    }
}

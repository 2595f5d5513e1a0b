//! Tab session.
//!
//! Owns the in-memory tab state for one activation of the feature and
//! mirrors every change to the blob store. The presentation layer holds a
//! session, feeds it gestures and inventory notifications, and applies the
//! returned slot decisions. The session holds data only, never UI handles.

use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::filter::{compute_visibility, restore_all, FilterOptions, SlotDecision};
use crate::gesture::Gesture;
use crate::group::{GroupDescriptor, GroupStore, RESERVED_GROUP};
use crate::inventory::InventorySource;
use crate::item::BankSlot;
use crate::snapshot::{load_store, PersistedTabs};
use banktabs_core::{AppConfig, BankTabsResult, BlobStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub filter: FilterOptions,
    pub mutually_exclusive: bool,
    /// Persist the selected group and restore it on the next session.
    pub remember_selection: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SessionSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            filter: FilterOptions::from(config),
            mutually_exclusive: config.mutually_exclusive,
            remember_selection: config.remember_selection,
        }
    }
}

pub struct TabSession<S: BlobStore> {
    store: GroupStore,
    selected: String,
    settings: SessionSettings,
    blobs: S,
    active: bool,
}

impl<S: BlobStore> TabSession<S> {
    /// Load state from `blobs`. A missing or corrupt blob yields the default store.
    pub fn open(blobs: S, settings: SessionSettings) -> Self {
        let blob = blobs.load_blob();
        let (store, remembered) = load_store(blob.as_deref());
        let selected = remembered
            .filter(|name| settings.remember_selection && store.contains(name))
            .unwrap_or_else(|| RESERVED_GROUP.to_string());

        Self {
            store,
            selected,
            settings,
            blobs,
            active: false,
        }
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    pub fn selected_group(&self) -> &str {
        &self.selected
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn blob_store(&self) -> &S {
        &self.blobs
    }

    pub fn descriptors(&self) -> Vec<GroupDescriptor> {
        self.store.descriptors(&self.selected)
    }

    /// Start the feature for an open bank. Calling it again while active only
    /// recomputes. Returns `None` when the bank surface is missing.
    pub fn activate(
        &mut self,
        source: &dyn InventorySource,
    ) -> BankTabsResult<Option<Vec<SlotDecision>>> {
        if !source.is_available() {
            tracing::debug!("Bank surface not available, skipping activation");
            return Ok(None);
        }
        if !self.active {
            self.active = true;
            if self.blobs.load_blob().is_none() {
                self.persist()?;
            }
            tracing::info!(
                "Bank tabs active with {} groups, selected '{}'",
                self.store.len(),
                self.selected
            );
        }
        Ok(self.refresh(source))
    }

    /// Stop the feature. Returns decisions that show every slot again, or
    /// `None` if the session was not active or the bank is already gone.
    pub fn deactivate(
        &mut self,
        source: &dyn InventorySource,
    ) -> BankTabsResult<Option<Vec<SlotDecision>>> {
        if !self.active {
            return Ok(None);
        }
        self.active = false;
        if !self.settings.remember_selection {
            self.selected = RESERVED_GROUP.to_string();
        }
        tracing::info!("Bank tabs deactivated");

        if !source.is_available() {
            return Ok(None);
        }
        Ok(Some(restore_all(source.bank_items().len())))
    }

    /// Recompute against a fresh inventory snapshot. This is the whole
    /// response to "inventory changed" and "inventory reorganized".
    pub fn refresh(&self, source: &dyn InventorySource) -> Option<Vec<SlotDecision>> {
        if !source.is_available() {
            return None;
        }
        Some(self.decide(&source.resolve_slots()))
    }

    pub fn decide(&self, slots: &[BankSlot]) -> Vec<SlotDecision> {
        compute_visibility(&self.selected, &self.store, slots, self.settings.filter)
    }

    /// Run one command and persist if it changed anything worth saving.
    pub fn execute(&mut self, command: &dyn Command) -> BankTabsResult<CommandOutcome> {
        let outcome = {
            let mut ctx = CommandContext::new(&mut self.store, &mut self.selected);
            command.execute(&mut ctx)?
        };
        debug_assert!(self.store.is_consistent());

        if outcome.is_applied() {
            tracing::debug!("{}", command.description());
            if command.touches_store() || self.settings.remember_selection {
                self.persist()?;
            }
        }
        Ok(outcome)
    }

    /// Apply a gesture and recompute. A no-op returning `None` while the bank
    /// surface is missing.
    pub fn dispatch(
        &mut self,
        gesture: Gesture,
        source: &dyn InventorySource,
    ) -> BankTabsResult<Option<Vec<SlotDecision>>> {
        if !source.is_available() {
            tracing::debug!("Ignoring {:?}: bank surface not available", gesture);
            return Ok(None);
        }
        let command = gesture.into_command(source, self.settings.mutually_exclusive);
        self.execute(command.as_ref())?;
        Ok(self.refresh(source))
    }

    /// Swap in new settings. When selection memory is switched off the
    /// remembered group is dropped from the next save.
    pub fn update_settings(&mut self, settings: SessionSettings) -> BankTabsResult<()> {
        let forget = self.settings.remember_selection && !settings.remember_selection;
        self.settings = settings;
        if forget {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> BankTabsResult<()> {
        let remembered = self
            .settings
            .remember_selection
            .then_some(self.selected.as_str());
        let blob = PersistedTabs::capture(&self.store, remembered).to_blob()?;
        self.blobs.save_blob(&blob)
    }
}

use banktabs_core::{AppConfig, BankTabsError, BankTabsResult, BlobStore, MemoryBlobStore};
use banktabs_domain::{
    compute_visibility, BankItem, BankSlot, Command, CommandOutcome, InventorySnapshot,
    InventorySource, ItemId, SessionSettings, SlotDecision, TabSession,
};
use banktabs_persistence::{JsonFileStore, PersistenceStore};
use serde::Serialize;

/// One row of `view` output.
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub slot: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub decision: SlotDecision,
}

pub struct CliContext {
    pub session: TabSession<MemoryBlobStore>,
    inventory: Option<InventorySnapshot>,
    store: JsonFileStore,
}

impl CliContext {
    pub async fn load(
        file_path: &str,
        inventory_path: Option<&str>,
        config: &AppConfig,
    ) -> BankTabsResult<Self> {
        let store = JsonFileStore::new(file_path);

        let blobs = if store.exists().await {
            MemoryBlobStore::with_blob(store.load().await?.blob())
        } else {
            MemoryBlobStore::new()
        };
        let session = TabSession::open(blobs, SessionSettings::from(config));

        let inventory = match inventory_path {
            Some(path) => {
                let json = tokio::fs::read_to_string(path).await?;
                let snapshot = InventorySnapshot::from_json(&json).map_err(|e| {
                    BankTabsError::Serialization(format!("inventory {}: {}", path, e))
                })?;
                Some(snapshot)
            }
            None => None,
        };

        Ok(Self {
            session,
            inventory,
            store,
        })
    }

    /// Run a command; applied changes are written back to the data file.
    pub async fn execute(&mut self, command: &dyn Command) -> BankTabsResult<CommandOutcome> {
        let writes = self.session.blob_store().writes();
        let outcome = self.session.execute(command)?;
        if self.session.blob_store().writes() > writes {
            self.save().await?;
        }
        Ok(outcome)
    }

    pub async fn save(&self) -> BankTabsResult<()> {
        let Some(blob) = self.session.blob_store().load_blob() else {
            return Ok(());
        };
        self.store.save(self.store.snapshot(&blob)).await?;
        Ok(())
    }

    /// The item as the bank names it, or its placeholder name without an inventory.
    pub fn resolve_item(&self, id: ItemId) -> BankItem {
        match &self.inventory {
            Some(inventory) => inventory.resolve_item(id),
            None => BankItem::resolve(id, None),
        }
    }

    pub fn view(&self, group: Option<&str>) -> BankTabsResult<Vec<SlotView>> {
        let inventory = self.inventory.as_ref().ok_or_else(|| {
            BankTabsError::Validation("--inventory is required to view slots".to_string())
        })?;
        if !inventory.is_available() {
            tracing::debug!("Bank is not open, no slots to view");
            return Ok(Vec::new());
        }

        let slots: Vec<BankSlot> = inventory.resolve_slots();
        let group = group.unwrap_or_else(|| self.session.selected_group());
        let decisions = compute_visibility(
            group,
            self.session.store(),
            &slots,
            self.session.settings().filter,
        );

        Ok(slots
            .into_iter()
            .zip(decisions)
            .enumerate()
            .map(|(slot, (item, decision))| SlotView {
                slot,
                item_id: item.as_ref().map(|i| i.id),
                name: item.map(|i| i.display_name),
                decision,
            })
            .collect())
    }
}

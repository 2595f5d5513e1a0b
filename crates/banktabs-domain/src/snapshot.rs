//! Persisted tab state.
//!
//! The blob is JSON. Current saves are versioned:
//!
//! ```json
//! {"version": 1, "groups": {"All": ["*"]}, "ordering": ["All"], "savedColumnWidths": {}}
//! ```
//!
//! A bare `{"GroupName": ["token", ...]}` map, as older installs stored it,
//! is still accepted on load.

use crate::group::GroupStore;
use crate::token::MatchToken;
use banktabs_core::{BankTabsError, BankTabsResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const BLOB_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTabs {
    pub version: u32,
    pub groups: BTreeMap<String, Vec<MatchToken>>,
    #[serde(default)]
    pub ordering: Vec<String>,
    #[serde(default)]
    pub saved_column_widths: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_group: Option<String>,
}

impl PersistedTabs {
    pub fn capture(store: &GroupStore, selected_group: Option<&str>) -> Self {
        Self {
            version: BLOB_VERSION,
            groups: store.groups().clone(),
            ordering: store.ordering().to_vec(),
            saved_column_widths: store.column_widths().clone(),
            selected_group: selected_group.map(str::to_string),
        }
    }

    pub fn to_blob(&self) -> BankTabsResult<String> {
        serde_json::to_string(self).map_err(|e| BankTabsError::Serialization(e.to_string()))
    }

    /// Parse either blob layout. Any JSON or shape error is returned as-is;
    /// callers decide how to recover.
    pub fn parse(blob: &str) -> BankTabsResult<Self> {
        let value: Value = serde_json::from_str(blob)
            .map_err(|e| BankTabsError::Serialization(e.to_string()))?;

        if !value.is_object() {
            return Err(BankTabsError::Serialization(
                "tab blob is not a JSON object".to_string(),
            ));
        }

        if let Some(version) = value.get("version").and_then(Value::as_u64) {
            if version != u64::from(BLOB_VERSION) {
                return Err(BankTabsError::Serialization(format!(
                    "Unsupported tab blob version: {}",
                    version
                )));
            }
            return serde_json::from_value(value)
                .map_err(|e| BankTabsError::Serialization(e.to_string()));
        }

        // Legacy maps carry their display order in key order.
        let Value::Object(map) = value else {
            return Err(BankTabsError::Serialization(
                "tab blob is not a JSON object".to_string(),
            ));
        };
        let mut groups = BTreeMap::new();
        let mut ordering = Vec::with_capacity(map.len());
        for (name, tokens) in map {
            let tokens: Vec<MatchToken> = serde_json::from_value(tokens)
                .map_err(|e| BankTabsError::Serialization(e.to_string()))?;
            ordering.push(name.clone());
            groups.insert(name, tokens);
        }
        Ok(Self {
            version: BLOB_VERSION,
            groups,
            ordering,
            saved_column_widths: BTreeMap::new(),
            selected_group: None,
        })
    }

    pub fn into_store(self) -> (GroupStore, Option<String>) {
        let store = GroupStore::from_parts(self.groups, self.ordering, self.saved_column_widths);
        (store, self.selected_group)
    }
}

/// Load the store from an optional blob, falling back to the default
/// single-group store when the blob is absent or corrupt.
pub fn load_store(blob: Option<&str>) -> (GroupStore, Option<String>) {
    match blob {
        None => (GroupStore::default(), None),
        Some(raw) => match PersistedTabs::parse(raw) {
            Ok(persisted) => persisted.into_store(),
            Err(e) => {
                tracing::warn!("Discarding corrupt tab data, using defaults: {}", e);
                (GroupStore::default(), None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{compute_visibility, FilterOptions, SlotDecision};
    use crate::item::BankItem;

    #[test]
    fn test_absent_blob_gives_default_store() {
        let (store, selected) = load_store(None);
        assert_eq!(store, GroupStore::default());
        assert!(selected.is_none());
    }

    #[test]
    fn test_malformed_blob_gives_default_store() {
        for blob in ["{not json", "[1, 2]", "{\"Food\": 3}", "{\"Food\": [1]}", "\"All\""] {
            let (store, _) = load_store(Some(blob));
            assert_eq!(store.ordering(), ["All"], "blob {:?}", blob);
            assert_eq!(store.tokens("All"), Some(&[MatchToken::Wildcard][..]));
        }
    }

    #[test]
    fn test_unknown_version_gives_default_store() {
        let (store, _) = load_store(Some(r#"{"version": 9, "groups": {"Food": []}}"#));
        assert!(!store.contains("Food"));
    }

    #[test]
    fn test_legacy_map_is_accepted() {
        let (store, selected) = load_store(Some(r#"{"Food": ["bread", "512"], "Ores": []}"#));
        assert_eq!(store.ordering(), ["All", "Food", "Ores"]);
        assert_eq!(
            store.tokens("Food").unwrap(),
            [MatchToken::ByName("bread".to_string()), MatchToken::ById(512)]
        );
        assert!(selected.is_none());
    }

    #[test]
    fn test_legacy_map_keeps_key_order() {
        let (store, _) = load_store(Some(r#"{"Ores": [], "All": ["*"], "Food": []}"#));
        assert_eq!(store.ordering(), ["Ores", "All", "Food"]);
    }

    #[test]
    fn test_padded_reserved_key_does_not_replace_wildcard() {
        let (store, _) = load_store(Some(r#"{"All": ["*"], " All": []}"#));
        assert_eq!(store.ordering(), ["All"]);
        assert_eq!(store.tokens("All"), Some(&[MatchToken::Wildcard][..]));

        let slots = vec![Some(BankItem::new(512, "Apple"))];
        let options = FilterOptions {
            hide_from_all: false,
            gray_out: false,
        };
        assert_eq!(
            compute_visibility("All", &store, &slots, options),
            vec![SlotDecision::Show]
        );
    }

    #[test]
    fn test_versioned_blob_keeps_ordering_and_selection() {
        let blob = r#"{
            "version": 1,
            "groups": {"All": ["*"], "Food": ["512"], "Ores": []},
            "ordering": ["Ores", "All", "Food"],
            "savedColumnWidths": {"Food": 96},
            "selectedGroup": "Food"
        }"#;
        let (store, selected) = load_store(Some(blob));
        assert_eq!(store.ordering(), ["Ores", "All", "Food"]);
        assert_eq!(store.column_width("Food"), Some(96));
        assert_eq!(selected.as_deref(), Some("Food"));
    }

    #[test]
    fn test_capture_writes_versioned_blob() {
        let store = GroupStore::default();
        let blob = PersistedTabs::capture(&store, None).to_blob().unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["groups"]["All"][0], "*");
        assert!(value.get("selectedGroup").is_none());
    }
}

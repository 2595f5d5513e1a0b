use serde::{Deserialize, Serialize};

pub type ItemId = u32;

/// A bank item as the filter sees it: id plus resolved display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankItem {
    pub id: ItemId,
    pub display_name: String,
}

impl BankItem {
    pub fn new(id: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Build from an optional definition, using the `"Item <id>"` placeholder
    /// when the definition is missing or has no usable name.
    pub fn resolve(id: ItemId, definition: Option<&ItemDefinition>) -> Self {
        let display_name = definition
            .and_then(ItemDefinition::display_name)
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(id));
        Self { id, display_name }
    }
}

/// One rendered bank slot; `None` is an empty slot.
pub type BankSlot = Option<BankItem>;

/// Static item metadata supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_capitalized: Option<String>,
}

impl ItemDefinition {
    /// Capitalized name first, then the raw name. Empty strings do not count.
    pub fn display_name(&self) -> Option<&str> {
        self.name_capitalized
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
    }
}

pub fn placeholder_name(id: ItemId) -> String {
    format!("Item {}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_capitalized_name() {
        let def = ItemDefinition {
            id: 1,
            name: Some("bronze sword".to_string()),
            name_capitalized: Some("Bronze Sword".to_string()),
        };
        assert_eq!(BankItem::resolve(1, Some(&def)).display_name, "Bronze Sword");
    }

    #[test]
    fn test_resolve_falls_back_to_raw_name() {
        let def = ItemDefinition {
            id: 1,
            name: Some("bronze sword".to_string()),
            name_capitalized: Some(String::new()),
        };
        assert_eq!(BankItem::resolve(1, Some(&def)).display_name, "bronze sword");
    }

    #[test]
    fn test_resolve_uses_placeholder() {
        assert_eq!(BankItem::resolve(77, None).display_name, "Item 77");

        let nameless = ItemDefinition {
            id: 78,
            name: None,
            name_capitalized: None,
        };
        assert_eq!(BankItem::resolve(78, Some(&nameless)).display_name, "Item 78");
    }
}

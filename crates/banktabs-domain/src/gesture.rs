use crate::commands::{
    AddGroup, AssignItem, Command, RemoveGroup, ReorderGroup, SelectGroup, SetColumnWidth,
    ToggleGroup,
};
use crate::group::Direction;
use crate::inventory::InventorySource;
use crate::item::ItemId;
use serde::{Deserialize, Serialize};

/// A user action on the tab controls, as reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Gesture {
    Click { group_name: String },
    Drop { group_name: String, item_id: ItemId },
    AddGroup { group_name: String },
    RemoveGroup { group_name: String },
    /// Enter pressed in the add/remove text box.
    ToggleGroup { group_name: String },
    ReorderLeft { group_name: String },
    ReorderRight { group_name: String },
    Resize { group_name: String, width: u32 },
}

impl Gesture {
    pub fn group_name(&self) -> &str {
        match self {
            Self::Click { group_name }
            | Self::Drop { group_name, .. }
            | Self::AddGroup { group_name }
            | Self::RemoveGroup { group_name }
            | Self::ToggleGroup { group_name }
            | Self::ReorderLeft { group_name }
            | Self::ReorderRight { group_name }
            | Self::Resize { group_name, .. } => group_name,
        }
    }

    /// Translate into a group editor command. Dropped items are resolved
    /// against the live inventory at this moment.
    pub fn into_command(
        self,
        source: &dyn InventorySource,
        mutually_exclusive: bool,
    ) -> Box<dyn Command> {
        match self {
            Self::Click { group_name } => Box::new(SelectGroup::new(group_name)),
            Self::Drop {
                group_name,
                item_id,
            } => Box::new(AssignItem::new(
                group_name,
                source.resolve_item(item_id),
                mutually_exclusive,
            )),
            Self::AddGroup { group_name } => Box::new(AddGroup::new(group_name)),
            Self::RemoveGroup { group_name } => Box::new(RemoveGroup::new(group_name)),
            Self::ToggleGroup { group_name } => Box::new(ToggleGroup::new(group_name)),
            Self::ReorderLeft { group_name } => {
                Box::new(ReorderGroup::new(group_name, Direction::Left))
            }
            Self::ReorderRight { group_name } => {
                Box::new(ReorderGroup::new(group_name, Direction::Right))
            }
            Self::Resize { group_name, width } => {
                Box::new(SetColumnWidth::new(group_name, width))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_wire_format() {
        let gesture: Gesture =
            serde_json::from_str(r#"{"type": "drop", "groupName": "Food", "itemId": 512}"#)
                .unwrap();
        assert_eq!(
            gesture,
            Gesture::Drop {
                group_name: "Food".to_string(),
                item_id: 512
            }
        );
        assert_eq!(gesture.group_name(), "Food");

        let reorder: Gesture =
            serde_json::from_str(r#"{"type": "reorderLeft", "groupName": "Ores"}"#).unwrap();
        assert_eq!(
            reorder,
            Gesture::ReorderLeft {
                group_name: "Ores".to_string()
            }
        );
    }
}

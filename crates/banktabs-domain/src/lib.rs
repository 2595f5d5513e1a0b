pub mod commands;
pub mod filter;
pub mod gesture;
pub mod group;
pub mod inventory;
pub mod item;
pub mod matcher;
pub mod session;
pub mod snapshot;
pub mod token;

pub use commands::{Command, CommandContext, CommandOutcome};
pub use filter::{compute_visibility, FilterOptions, SlotDecision};
pub use gesture::Gesture;
pub use group::{is_reserved, Direction, GroupDescriptor, GroupStore, RESERVED_GROUP};
pub use inventory::{InventorySnapshot, InventorySource, SlotEntry};
pub use item::{BankItem, BankSlot, ItemDefinition, ItemId};
pub use matcher::{matches, GroupQuery, ItemMatcher};
pub use session::{SessionSettings, TabSession};
pub use snapshot::PersistedTabs;
pub use token::MatchToken;

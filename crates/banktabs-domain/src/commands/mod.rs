use crate::group::GroupStore;
use banktabs_core::BankTabsResult;

pub mod group_commands;
pub mod item_commands;

pub use group_commands::*;
pub use item_commands::*;

/// Trait for group editor commands that mutate tab state.
/// Commands represent intent; the session executes them and persists the result.
pub trait Command: Send + Sync {
    /// Execute this command against the store and selection.
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;

    /// False for commands that only move the selection.
    fn touches_store(&self) -> bool {
        true
    }
}

/// Whether a command changed anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Input was invalid for the current state; nothing changed.
    Rejected(String),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!("Command rejected: {}", reason);
        Self::Rejected(reason)
    }
}

/// Mutable state a command may touch.
pub struct CommandContext<'a> {
    pub store: &'a mut GroupStore,
    pub selected: &'a mut String,
}

impl<'a> CommandContext<'a> {
    pub fn new(store: &'a mut GroupStore, selected: &'a mut String) -> Self {
        Self { store, selected }
    }
}

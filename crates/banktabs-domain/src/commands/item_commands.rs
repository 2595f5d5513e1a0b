use super::{Command, CommandContext, CommandOutcome};
use crate::group::is_reserved;
use crate::item::BankItem;
use crate::token::MatchToken;
use banktabs_core::BankTabsResult;

/// Drop an item onto a group's tab.
///
/// With `mutually_exclusive`, every token naming the item (by id or by name)
/// is stripped from every group before the id is added to the target.
/// Without it, the item's id is only stripped from the selected group, and
/// only when dropping onto "All" or onto the selected group itself.
/// The reserved group never gains explicit tokens; dropping onto it resets
/// it to the wildcard.
pub struct AssignItem {
    pub group: String,
    pub item: BankItem,
    pub mutually_exclusive: bool,
}

impl AssignItem {
    pub fn new(group: impl Into<String>, item: BankItem, mutually_exclusive: bool) -> Self {
        Self {
            group: group.into(),
            item,
            mutually_exclusive,
        }
    }
}

impl Command for AssignItem {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if !context.store.contains(&self.group) {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' does not exist",
                self.group
            )));
        }

        let item = &self.item;
        tracing::debug!(
            "Dragged {} ID {} to group {}",
            item.display_name,
            item.id,
            self.group
        );

        if self.mutually_exclusive {
            for (name, tokens) in context.store.all_tokens_mut() {
                let before = tokens.len();
                tokens.retain(|token| !token.refers_to(item));
                if tokens.len() != before {
                    tracing::debug!(
                        "Removed {} ID {} from group {}",
                        item.display_name,
                        item.id,
                        name
                    );
                }
            }
        } else if is_reserved(&self.group) || self.group == *context.selected {
            let selected = context.selected.clone();
            if let Some(tokens) = context.store.tokens_mut(&selected) {
                tokens.retain(|token| !token.is_id(item.id));
            }
        }

        let Some(target) = context.store.tokens_mut(&self.group) else {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' does not exist",
                self.group
            )));
        };
        if is_reserved(&self.group) {
            *target = vec![MatchToken::Wildcard];
        } else if !target.iter().any(|token| token.is_id(item.id)) {
            target.push(MatchToken::ById(item.id));
        }

        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!(
            "Assign {} (ID {}) to group '{}'",
            self.item.display_name, self.item.id, self.group
        )
    }
}

use super::{Command, CommandContext, CommandOutcome};
use crate::group::{is_reserved, Direction, RESERVED_GROUP};
use banktabs_core::BankTabsResult;

/// Create an empty group at the end of the ordering
pub struct AddGroup {
    pub name: String,
}

impl AddGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

impl Command for AddGroup {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if self.name.is_empty() {
            return Ok(CommandOutcome::rejected("group name is empty"));
        }
        if is_reserved(&self.name) {
            return Ok(CommandOutcome::rejected(format!(
                "'{}' is reserved",
                self.name
            )));
        }
        if !context.store.insert_group(&self.name) {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' already exists",
                self.name
            )));
        }
        tracing::info!("Added group '{}'", self.name);
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!("Add group: '{}'", self.name)
    }
}

/// Delete a group, its saved width, and fall back to "All" if it was selected
pub struct RemoveGroup {
    pub name: String,
}

impl RemoveGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

impl Command for RemoveGroup {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if is_reserved(&self.name) {
            return Ok(CommandOutcome::rejected(format!(
                "'{}' cannot be removed",
                self.name
            )));
        }
        if !context.store.remove_group(&self.name) {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' does not exist",
                self.name
            )));
        }
        if *context.selected == self.name {
            *context.selected = RESERVED_GROUP.to_string();
        }
        tracing::info!("Removed group '{}'", self.name);
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!("Remove group: '{}'", self.name)
    }
}

/// Remove the group if it exists, otherwise add it
pub struct ToggleGroup {
    pub name: String,
}

impl ToggleGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }
}

impl Command for ToggleGroup {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if context.store.contains(&self.name) {
            RemoveGroup::new(self.name.as_str()).execute(context)
        } else {
            AddGroup::new(self.name.as_str()).execute(context)
        }
    }

    fn description(&self) -> String {
        format!("Toggle group: '{}'", self.name)
    }
}

/// Swap a group with its neighbour in the display ordering
pub struct ReorderGroup {
    pub name: String,
    pub direction: Direction,
}

impl ReorderGroup {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }
}

impl Command for ReorderGroup {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        // The reserved group only ever moves right of its own accord.
        if is_reserved(&self.name) && self.direction == Direction::Left {
            return Ok(CommandOutcome::rejected(format!(
                "'{}' cannot move left",
                self.name
            )));
        }
        if !context.store.swap(&self.name, self.direction) {
            return Ok(CommandOutcome::rejected(format!(
                "'{}' cannot move {:?}",
                self.name, self.direction
            )));
        }
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!("Move group '{}' {:?}", self.name, self.direction)
    }
}

/// Make a group drive the filter view
pub struct SelectGroup {
    pub name: String,
}

impl SelectGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Command for SelectGroup {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if !context.store.contains(&self.name) {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' does not exist",
                self.name
            )));
        }
        tracing::debug!("Selected group '{}'", self.name);
        *context.selected = self.name.clone();
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!("Select group: '{}'", self.name)
    }

    fn touches_store(&self) -> bool {
        false
    }
}

/// Remember the rendered width of a group's column
pub struct SetColumnWidth {
    pub name: String,
    pub width: u32,
}

impl SetColumnWidth {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into().trim().to_string(),
            width,
        }
    }
}

impl Command for SetColumnWidth {
    fn execute(&self, context: &mut CommandContext) -> BankTabsResult<CommandOutcome> {
        if !context.store.set_column_width(&self.name, self.width) {
            return Ok(CommandOutcome::rejected(format!(
                "group '{}' does not exist",
                self.name
            )));
        }
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!("Set width of '{}' to {}px", self.name, self.width)
    }
}

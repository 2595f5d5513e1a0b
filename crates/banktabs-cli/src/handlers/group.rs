use super::ensure_applied;
use crate::cli::GroupAction;
use crate::context::CliContext;
use crate::output;
use banktabs_domain::commands::{
    AddGroup, RemoveGroup, ReorderGroup, SelectGroup, SetColumnWidth, ToggleGroup,
};
use banktabs_domain::Command;

pub async fn handle(ctx: &mut CliContext, action: GroupAction) -> anyhow::Result<()> {
    let command: Box<dyn Command> = match action {
        GroupAction::List => return output::output_list(ctx.session.descriptors()),
        GroupAction::Add { name } => Box::new(AddGroup::new(name)),
        GroupAction::Remove { name } => Box::new(RemoveGroup::new(name)),
        GroupAction::Toggle { name } => Box::new(ToggleGroup::new(name)),
        GroupAction::Reorder { name, direction } => {
            Box::new(ReorderGroup::new(name, direction.into()))
        }
        GroupAction::Select { name } => Box::new(SelectGroup::new(name)),
        GroupAction::Width { name, width } => Box::new(SetColumnWidth::new(name, width)),
    };

    ensure_applied(ctx.execute(command.as_ref()).await?);
    output::output_success(serde_json::json!({
        "selected": ctx.session.selected_group(),
        "ordering": ctx.session.store().ordering(),
    }))
}

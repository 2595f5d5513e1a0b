use super::ensure_applied;
use crate::cli::ItemAction;
use crate::context::CliContext;
use crate::output;
use banktabs_domain::commands::AssignItem;

pub async fn handle(ctx: &mut CliContext, action: ItemAction) -> anyhow::Result<()> {
    match action {
        ItemAction::Assign { group, item } => {
            let item = ctx.resolve_item(item);
            let mutually_exclusive = ctx.session.settings().mutually_exclusive;
            let command = AssignItem::new(group.as_str(), item.clone(), mutually_exclusive);
            ensure_applied(ctx.execute(&command).await?);

            let tokens: Vec<String> = ctx
                .session
                .store()
                .tokens(&group)
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect();
            output::output_success(serde_json::json!({
                "item": item,
                "group": group,
                "tokens": tokens,
            }))
        }
    }
}

use crate::context::CliContext;
use crate::output;

pub fn handle(ctx: &CliContext, group: Option<String>) -> anyhow::Result<()> {
    match ctx.view(group.as_deref()) {
        Ok(slots) => output::output_list(slots),
        Err(e) => output::output_error(&e.to_string()),
    }
}

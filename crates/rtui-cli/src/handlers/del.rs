use super::HandlerContext;
use crate::presentation::view_models::{MutationKind, MutationViewModel};
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, key: &str) -> Result<()> {
    let applied = ctx.block_on(ctx.store.delete_key(key))?;
    log::info!("del {} -> {}", key, applied);

    ctx.renderer().render_mutation(&MutationViewModel {
        action: MutationKind::Delete,
        key: key.to_string(),
        applied,
        seconds: None,
    })
}

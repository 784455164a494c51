use super::HandlerContext;
use crate::presentation::view_models::{MutationKind, MutationViewModel};
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, key: &str, seconds: i64) -> Result<()> {
    let applied = ctx.block_on(ctx.store.set_ttl(key, seconds))?;
    log::info!("expire {} {} -> {}", key, seconds, applied);

    ctx.renderer().render_mutation(&MutationViewModel {
        action: MutationKind::Expire,
        key: key.to_string(),
        applied,
        seconds: Some(seconds),
    })
}

use super::HandlerContext;
use crate::presentation::view_models::TtlViewModel;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, key: &str) -> Result<()> {
    let ttl = ctx.block_on(ctx.store.get_ttl(key))?;

    ctx.renderer().render_ttl(&TtlViewModel {
        key: key.to_string(),
        ttl,
    })
}

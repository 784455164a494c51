use super::HandlerContext;
use crate::presentation::view_models::SeedViewModel;
use anyhow::Result;
use rtui_store::load_sample_data;

pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let keys_written = ctx.block_on(load_sample_data(ctx.store.as_ref()))?;

    ctx.renderer().render_seed(&SeedViewModel {
        store: ctx.store.name().to_string(),
        keys_written,
    })
}

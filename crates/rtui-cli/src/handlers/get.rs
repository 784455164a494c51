use super::HandlerContext;
use crate::presentation::view_models::ValueViewModel;
use anyhow::Result;
use rtui_engine::{ContentView, compose};

pub fn handle(ctx: &HandlerContext, key: &str, raw: bool) -> Result<()> {
    let (tag, value) = ctx.block_on(ctx.store.fetch(key))?;
    let ttl = ctx.block_on(ctx.store.get_ttl(key))?;

    let content = if raw {
        ContentView::raw(key, &value)
    } else {
        compose(key, &value, &tag)
    };
    if content.primary.is_error() {
        log::warn!("{}: {}", key, content.primary.text());
    }

    ctx.renderer().render_value(&ValueViewModel {
        key: key.to_string(),
        tag,
        ttl,
        content,
    })
}

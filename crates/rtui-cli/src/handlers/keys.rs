use super::HandlerContext;
use crate::presentation::view_models::KeyListViewModel;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext, pattern: Option<String>) -> Result<()> {
    let pattern = pattern.unwrap_or_else(|| ctx.pattern.clone());
    let (keys, tree) = ctx.key_tree(&pattern)?;

    ctx.renderer().render_keys(&KeyListViewModel {
        pattern,
        keys,
        tree,
    })
}

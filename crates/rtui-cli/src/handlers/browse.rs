//! Interactive browser. The handler owns the [`AppState`], turns key
//! presses into store calls and feeds the results back into the state.

use super::HandlerContext;
use crate::presentation::renderers::tui::{Action, AppState, TuiSession};
use anyhow::Result;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(250);

pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let mut state = AppState::new(ctx.store.name(), ctx.pattern.clone())
        .with_source_syntax(ctx.source_syntax.clone());
    reload_keys(ctx, &mut state);

    let mut tui = TuiSession::start()?;
    log::info!("browser started on {}", ctx.store.name());

    loop {
        tui.draw(&mut state)?;

        let Some(key) = tui.next_key(TICK)? else {
            continue;
        };
        match state.handle_key(key) {
            None => {}
            Some(Action::Quit) => break,
            Some(action) => apply(ctx, &mut state, action),
        }
    }

    log::info!("browser closed");
    tui.finish()
}

/// Carry out a store action. Failures end up in the status bar, never
/// tear down the browser.
pub fn apply(ctx: &HandlerContext, state: &mut AppState, action: Action) {
    log::debug!("action: {:?}", action);
    let result = match action {
        Action::Quit => Ok(()),
        Action::Refresh => refresh(ctx, state),
        Action::Load(key) => load_value(ctx, state, &key),
        Action::Filter(pattern) => {
            state.set_pattern(pattern);
            reload_keys(ctx, state);
            Ok(())
        }
        Action::Expire(key, seconds) => expire(ctx, state, &key, seconds),
        Action::Delete(key) => delete(ctx, state, &key),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        state.error(format!("{:#}", e));
    }
}

fn reload_keys(ctx: &HandlerContext, state: &mut AppState) {
    let pattern = state.pattern().to_string();
    match ctx.key_tree(&pattern) {
        Ok((keys, tree)) => {
            state.set_keys(tree);
            state.info(format!("{} key(s) matching '{}'", keys.len(), pattern));
        }
        Err(e) => {
            log::error!("listing keys for '{}' failed: {:#}", pattern, e);
            state.error(format!("Could not list keys: {:#}", e));
        }
    }
}

fn load_value(ctx: &HandlerContext, state: &mut AppState, key: &str) -> Result<()> {
    let (tag, value) = ctx.block_on(ctx.store.fetch(key))?;
    let ttl = ctx.block_on(ctx.store.get_ttl(key))?;
    state.show_value(key, tag, ttl, value);
    Ok(())
}

fn refresh(ctx: &HandlerContext, state: &mut AppState) -> Result<()> {
    reload_keys(ctx, state);
    if let Some(key) = state.selected_key().map(str::to_string) {
        load_value(ctx, state, &key)?;
    }
    Ok(())
}

fn expire(ctx: &HandlerContext, state: &mut AppState, key: &str, seconds: i64) -> Result<()> {
    if !ctx.block_on(ctx.store.set_ttl(key, seconds))? {
        state.error(format!("Key not found: {}", key));
        return Ok(());
    }
    if seconds <= 0 {
        state.clear_selection();
        reload_keys(ctx, state);
    } else {
        load_value(ctx, state, key)?;
    }
    state.info(format!("TTL of {} set to {}s", key, seconds));
    Ok(())
}

fn delete(ctx: &HandlerContext, state: &mut AppState, key: &str) -> Result<()> {
    let removed = ctx.block_on(ctx.store.delete_key(key))?;
    state.clear_selection();
    reload_keys(ctx, state);
    if removed {
        state.info(format!("Deleted {}", key));
    } else {
        state.error(format!("Key not found: {}", key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::types::{LogLevel, OutputFormat};
    use rtui_store::ConnectOptions;
    use rtui_types::{Ttl, ValueTypeTag};

    fn sample_context() -> HandlerContext {
        let settings = Settings {
            connection: ConnectOptions::default(),
            delimiter: ":".to_string(),
            pattern: "*".to_string(),
            source_syntax: "rust".to_string(),
            log_file: std::env::temp_dir().join("rtui-test.log"),
            log_level: LogLevel::Off,
            memory: true,
            samples: true,
        };
        HandlerContext::open(&settings, OutputFormat::Plain).unwrap()
    }

    #[test]
    fn test_load_and_delete() {
        let ctx = sample_context();
        let mut state = AppState::new(ctx.store.name(), "*");
        reload_keys(&ctx, &mut state);

        apply(&ctx, &mut state, Action::Load("user:1000".to_string()));
        let selection = state.selection.as_ref().unwrap();
        assert_eq!(selection.tag, ValueTypeTag::Hash);
        assert_eq!(selection.view.title, "Data for user:1000");

        apply(&ctx, &mut state, Action::Delete("user:1000".to_string()));
        assert!(state.selection.is_none());
        assert_eq!(state.status.as_ref().unwrap().text, "Deleted user:1000");
        let keys = ctx.block_on(ctx.store.list_keys("user:*")).unwrap();
        assert_eq!(keys, vec!["user:1001".to_string()]);
    }

    #[test]
    fn test_expire_updates_selection() {
        let ctx = sample_context();
        let mut state = AppState::new(ctx.store.name(), "*");
        apply(&ctx, &mut state, Action::Load("user:1001".to_string()));

        apply(&ctx, &mut state, Action::Expire("user:1001".to_string(), 300));
        assert_eq!(state.selection.as_ref().unwrap().ttl, Ttl::Expires(300));

        apply(&ctx, &mut state, Action::Expire("missing".to_string(), 300));
        assert!(state.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_filter_narrows_tree() {
        let ctx = sample_context();
        let mut state = AppState::new(ctx.store.name(), "*");

        apply(&ctx, &mut state, Action::Filter("got:*".to_string()));
        assert_eq!(state.pattern(), "got:*");
        assert_eq!(state.tree.rows().len(), 1);
        assert_eq!(state.tree.rows()[0].label, "got");
    }
}

use crate::config::Settings;
use crate::presentation::ConsoleRenderer;
use crate::presentation::formatters::Highlighter;
use crate::types::OutputFormat;
use anyhow::Result;
use rtui_engine::{HierarchyNode, build_hierarchy};
use rtui_store::{KeyStore, MemoryStore, RedisStore, load_sample_data};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Store connection plus presentation settings shared by every handler.
///
/// Handlers are synchronous; store calls are driven to completion on the
/// context's runtime.
pub struct HandlerContext {
    pub store: Arc<dyn KeyStore>,
    pub delimiter: String,
    pub pattern: String,
    pub source_syntax: String,
    pub format: OutputFormat,
    runtime: Runtime,
}

impl HandlerContext {
    pub fn open(settings: &Settings, format: OutputFormat) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let store: Arc<dyn KeyStore> = if settings.memory {
            Arc::new(MemoryStore::new())
        } else {
            let connection = settings.connection.clone();
            let store = runtime
                .block_on(RedisStore::connect(&connection))
                .map_err(|e| {
                    log::error!("connection to {} failed: {}", connection.address(), e);
                    anyhow::anyhow!("Could not connect to {}: {}", connection.address(), e)
                })?;
            Arc::new(store)
        };

        let ctx = Self {
            store,
            delimiter: settings.delimiter.clone(),
            pattern: settings.pattern.clone(),
            source_syntax: settings.source_syntax.clone(),
            format,
            runtime,
        };

        if !Highlighter::shared().supports(&ctx.source_syntax) {
            log::warn!("unknown source syntax '{}', snippets stay plain", ctx.source_syntax);
        }

        if settings.samples {
            ctx.block_on(load_sample_data(ctx.store.as_ref()))?;
        }

        Ok(ctx)
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn renderer(&self) -> ConsoleRenderer {
        ConsoleRenderer::new(self.format).with_source_syntax(self.source_syntax.clone())
    }

    /// Keys matching `pattern` and the tree built from them.
    pub fn key_tree(&self, pattern: &str) -> Result<(Vec<String>, HierarchyNode)> {
        let keys = self.block_on(self.store.list_keys(pattern))?;
        let tree = build_hierarchy(&keys, &self.delimiter);
        log::debug!("{} keys match '{}'", keys.len(), pattern);
        Ok((keys, tree))
    }
}

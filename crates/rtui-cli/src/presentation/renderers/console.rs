use crate::presentation::formatters::{DEFAULT_SOURCE_SYNTAX, Highlighter, JSON_SYNTAX, Segment};
use crate::presentation::view_models::{
    KeyListViewModel, MutationKind, MutationViewModel, SeedViewModel, TtlViewModel,
    ValueViewModel,
};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use rtui_engine::{RenderKind, SourceBlock, outline};
use serde::Serialize;

/// Prints command results to stdout as text or JSON.
pub struct ConsoleRenderer {
    format: OutputFormat,
    color: bool,
    source_syntax: String,
}

impl ConsoleRenderer {
    /// Colors are used only for plain output on a terminal, and never when
    /// `NO_COLOR` is set.
    pub fn new(format: OutputFormat) -> Self {
        let color = format == OutputFormat::Plain
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        Self {
            format,
            color,
            source_syntax: DEFAULT_SOURCE_SYNTAX.to_string(),
        }
    }

    pub fn plain() -> Self {
        Self {
            format: OutputFormat::Plain,
            color: false,
            source_syntax: DEFAULT_SOURCE_SYNTAX.to_string(),
        }
    }

    /// Language used to highlight source snippets.
    pub fn with_source_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.source_syntax = syntax.into();
        self
    }

    pub fn render_keys(&self, vm: &KeyListViewModel) -> Result<()> {
        self.emit(vm, || self.format_keys(vm))
    }

    pub fn render_value(&self, vm: &ValueViewModel) -> Result<()> {
        self.emit(vm, || self.format_value(vm))
    }

    pub fn render_ttl(&self, vm: &TtlViewModel) -> Result<()> {
        self.emit(vm, || format!("{}: {}", vm.key, vm.ttl))
    }

    pub fn render_mutation(&self, vm: &MutationViewModel) -> Result<()> {
        self.emit(vm, || format_mutation(vm))
    }

    pub fn render_seed(&self, vm: &SeedViewModel) -> Result<()> {
        self.emit(vm, || {
            format!("Loaded {} sample keys into {}", vm.keys_written, vm.store)
        })
    }

    fn emit<T: Serialize>(&self, vm: &T, text: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(vm)?),
            OutputFormat::Plain => println!("{}", text()),
        }
        Ok(())
    }

    pub fn format_keys(&self, vm: &KeyListViewModel) -> String {
        if vm.keys.is_empty() {
            return format!("No keys match '{}'", vm.pattern);
        }
        let mut lines = outline(&vm.tree);
        lines.push(String::new());
        lines.push(format!("{} key(s) matching '{}'", vm.keys.len(), vm.pattern));
        lines.join("\n")
    }

    pub fn format_value(&self, vm: &ValueViewModel) -> String {
        let mut out = Vec::new();
        let header = format!("{} ({}, ttl: {})", vm.content.title, vm.tag, vm.ttl);
        out.push(if self.color {
            header.bold().to_string()
        } else {
            header
        });

        let primary = &vm.content.primary;
        match primary.kind {
            RenderKind::Json if self.color => {
                out.extend(highlight(&primary.lines, JSON_SYNTAX));
            }
            RenderKind::Error if self.color => {
                out.extend(primary.lines.iter().map(|line| line.red().to_string()));
            }
            _ => out.extend(primary.lines.iter().cloned()),
        }

        if let SourceBlock::Code(code) = &vm.content.source {
            out.push(String::new());
            out.push(if self.color {
                "Source".bold().to_string()
            } else {
                "Source".to_string()
            });
            if self.color {
                out.extend(highlight(code, &self.source_syntax));
            } else {
                out.extend(code.iter().cloned());
            }
        }

        out.join("\n")
    }
}

fn format_mutation(vm: &MutationViewModel) -> String {
    match (vm.action, vm.applied, vm.seconds) {
        (MutationKind::Expire, true, Some(secs)) if secs <= 0 => {
            format!("Expired {} immediately", vm.key)
        }
        (MutationKind::Expire, true, Some(secs)) => format!("Set TTL of {} to {}s", vm.key, secs),
        (MutationKind::Expire, true, None) => format!("Set TTL of {}", vm.key),
        (MutationKind::Delete, true, _) => format!("Deleted {}", vm.key),
        (_, false, _) => format!("Key not found: {}", vm.key),
    }
}

fn highlight(lines: &[String], syntax: &str) -> Vec<String> {
    Highlighter::shared()
        .highlight(lines, syntax)
        .iter()
        .map(|segments| segments.iter().map(paint).collect())
        .collect()
}

fn paint(segment: &Segment) -> String {
    match segment.rgb {
        Some((r, g, b)) => segment.text.truecolor(r, g, b).to_string(),
        None => segment.text.clone(),
    }
}

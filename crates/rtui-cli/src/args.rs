use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rtui")]
#[command(about = "Browse a Redis keyspace as a tree and inspect values", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Redis host [default: localhost]
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Redis port [default: 6379]
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Database index [default: 0]
    #[arg(long, global = true)]
    pub db: Option<u32>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Key segment delimiter [default: ":"]
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Language of source snippets, by name or extension [default: "rust"]
    #[arg(long, global = true)]
    pub source_syntax: Option<String>,

    /// Use an in-process store instead of connecting to Redis
    #[arg(long, global = true)]
    pub memory: bool,

    /// Load the demo data set before running the command
    #[arg(long, global = true)]
    pub samples: bool,

    /// Config file [default: <config dir>/rtui/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file [default: ~/.redis_tui/redis_tui.log]
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive browser (default)
    Browse,

    /// Print matching keys as a tree
    Keys {
        /// Glob pattern
        #[arg(long, short)]
        pattern: Option<String>,
    },

    /// Show a key's value
    Get {
        key: String,

        /// Print the raw value without type formatting
        #[arg(long)]
        raw: bool,
    },

    /// Show a key's time to live
    Ttl { key: String },

    /// Set a key's time to live in seconds
    Expire {
        key: String,
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },

    /// Delete a key
    Del { key: String },

    /// Load the demo data set into the store
    Seed,
}

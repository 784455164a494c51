//! Key-value store access for rtui.
//!
//! [`KeyStore`] is the seam between the browser and where keys live.
//! [`RedisStore`] talks to a running server through the `redis` client;
//! [`MemoryStore`] keeps everything in process and backs `--memory`
//! sessions and tests.

pub mod client;
pub mod error;
pub mod glob;
pub mod memory;
pub mod samples;

pub use client::{ConnectOptions, RedisStore};
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use samples::{load_sample_data, sample_data};

use async_trait::async_trait;
use rtui_types::{ScoredMember, StoreValue, Ttl, ValueTypeTag};

/// Default Redis port.
pub const DEFAULT_PORT: u16 = 6379;

/// Operations the browser needs from a key-value store.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Human-readable name for status lines and logs.
    fn name(&self) -> &str;

    /// Keys matching a glob pattern, sorted ascending.
    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>>;

    async fn get_type(&self, key: &str) -> Result<ValueTypeTag>;

    /// Fetch a value in the shape its type calls for. Missing keys are `Nil`.
    async fn get_value(&self, key: &str) -> Result<StoreValue>;

    async fn get_ttl(&self, key: &str) -> Result<Ttl>;

    /// Set a key's expiry. Returns false when the key does not exist.
    async fn set_ttl(&self, key: &str, seconds: i64) -> Result<bool>;

    /// Returns false when there was nothing to delete.
    async fn delete_key(&self, key: &str) -> Result<bool>;

    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    async fn add_hash(&self, key: &str, fields: &[(String, String)]) -> Result<()>;

    async fn push_list(&self, key: &str, items: &[String]) -> Result<()>;

    async fn add_set(&self, key: &str, members: &[String]) -> Result<()>;

    async fn add_scored(&self, key: &str, members: &[ScoredMember]) -> Result<()>;

    /// Type tag and value together, the pair every render needs.
    async fn fetch(&self, key: &str) -> Result<(ValueTypeTag, StoreValue)> {
        let tag = self.get_type(key).await?;
        let value = self.get_value(key).await?;
        Ok((tag, value))
    }
}

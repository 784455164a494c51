//! Key sets and stores shared by tests.

use anyhow::Result;
use rtui_store::{KeyStore, MemoryStore, load_sample_data};
use rtui_types::{ScoredMember, StoreValue};

/// Keys spread over a few namespaces, including a key that is also a branch.
pub fn namespaced_keys() -> Vec<String> {
    [
        "user:1000",
        "user:1000:profile",
        "user:1001",
        "cart:user:1000:items",
        "config:api:endpoint",
        "config:api:timeout",
        "standalone",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

/// Keys shaped so that every node of the tree is exercised: dual roles,
/// empty segments and a lone delimiter.
pub fn awkward_keys() -> Vec<String> {
    ["a", "a:b", "a::c", ":", ":lead", "trail:", "x:y:z"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

/// Memory store loaded with the demo data set.
pub async fn sample_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    load_sample_data(&store).await?;
    Ok(store)
}

/// Memory store holding exactly the given string keys.
pub async fn store_with_strings(entries: &[(&str, &str)]) -> Result<MemoryStore> {
    let store = MemoryStore::new();
    for (key, value) in entries {
        store.set_string(key, value).await?;
    }
    Ok(store)
}

/// Write a value into a store using the command that fits its shape.
pub async fn put(store: &dyn KeyStore, key: &str, value: &StoreValue) -> Result<()> {
    match value {
        StoreValue::Text(text) => store.set_string(key, text).await?,
        StoreValue::Pairs(pairs) => store.add_hash(key, pairs).await?,
        StoreValue::Items(items) => store.push_list(key, items).await?,
        StoreValue::Scored(members) => store.add_scored(key, members).await?,
        StoreValue::Nil => {
            store.delete_key(key).await?;
        }
    }
    Ok(())
}

/// A short leaderboard, lowest score first.
pub fn leaderboard() -> Vec<ScoredMember> {
    vec![
        ScoredMember::new("alice", 1.0),
        ScoredMember::new("bob", 2.5),
        ScoredMember::new("carol", 10.0),
    ]
}

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use rtui_types::{ScoredMember, StoreValue, Ttl, ValueTypeTag};

use crate::error::{Error, Result};
use crate::{KeyStore, glob};

const INVALID_EXPIRE: &str = "ERR invalid expire time in 'expire' command";
const WRONG_TYPE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone)]
struct Entry {
    tag: ValueTypeTag,
    value: StoreValue,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(tag: ValueTypeTag, value: StoreValue) -> Self {
        Self {
            tag,
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-process [`KeyStore`]. Expired keys are dropped lazily on access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn live_entry(&self, key: &str) -> Option<Entry> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().await.remove(key);
        None
    }

    /// Apply `update` to the value stored under `key`, creating it with
    /// `empty` first when absent. Existing values of another type are refused.
    async fn upsert<F>(&self, key: &str, tag: ValueTypeTag, empty: StoreValue, update: F) -> Result<()>
    where
        F: FnOnce(&mut StoreValue),
    {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(tag.clone(), empty));
        if entry.tag != tag {
            return Err(Error::Server(WRONG_TYPE.to_string()));
        }
        update(&mut entry.value);
        Ok(())
    }
}

#[async_trait]
impl KeyStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = glob::compile(pattern)?;
        let now = Instant::now();
        let entries = self.entries.read().await;

        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired(now) && matcher.is_match(key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn get_type(&self, key: &str) -> Result<ValueTypeTag> {
        Ok(self
            .live_entry(key)
            .await
            .map(|e| e.tag)
            .unwrap_or(ValueTypeTag::None))
    }

    async fn get_value(&self, key: &str) -> Result<StoreValue> {
        Ok(self
            .live_entry(key)
            .await
            .map(|e| e.value)
            .unwrap_or(StoreValue::Nil))
    }

    async fn get_ttl(&self, key: &str) -> Result<Ttl> {
        let ttl = match self.live_entry(key).await {
            None => Ttl::Missing,
            Some(Entry {
                expires_at: None, ..
            }) => Ttl::Persistent,
            Some(Entry {
                expires_at: Some(at),
                ..
            }) => {
                let remaining = at.saturating_duration_since(Instant::now());
                Ttl::Expires(remaining.as_secs_f64().round() as u64)
            }
        };
        Ok(ttl)
    }

    async fn set_ttl(&self, key: &str, seconds: i64) -> Result<bool> {
        let now = Instant::now();
        let deadline = if seconds > 0 {
            let deadline = now.checked_add(Duration::from_secs(seconds.unsigned_abs()));
            Some(deadline.ok_or_else(|| Error::Server(INVALID_EXPIRE.to_string()))?)
        } else {
            None
        };
        let mut entries = self.entries.write().await;

        let live = match entries.get(key) {
            Some(entry) => !entry.is_expired(now),
            None => return Ok(false),
        };
        match deadline {
            Some(deadline) if live => {
                if let Some(entry) = entries.get_mut(key) {
                    entry.expires_at = Some(deadline);
                }
                Ok(true)
            }
            _ => {
                entries.remove(key);
                Ok(live)
            }
        }
    }

    async fn delete_key(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|e| !e.is_expired(now)))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        // SET replaces whatever was there, type and expiry included
        self.entries.write().await.insert(
            key.to_string(),
            Entry::new(ValueTypeTag::String, StoreValue::text(value)),
        );
        Ok(())
    }

    async fn add_hash(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        self.upsert(key, ValueTypeTag::Hash, StoreValue::Pairs(Vec::new()), |value| {
            if let StoreValue::Pairs(pairs) = value {
                for (field, new_value) in fields {
                    match pairs.iter_mut().find(|(f, _)| f == field) {
                        Some((_, existing)) => *existing = new_value.clone(),
                        None => pairs.push((field.clone(), new_value.clone())),
                    }
                }
            }
        })
        .await
    }

    async fn push_list(&self, key: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.upsert(key, ValueTypeTag::List, StoreValue::Items(Vec::new()), |value| {
            if let StoreValue::Items(list) = value {
                list.extend(items.iter().cloned());
            }
        })
        .await
    }

    async fn add_set(&self, key: &str, members: &[String]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        self.upsert(key, ValueTypeTag::Set, StoreValue::Items(Vec::new()), |value| {
            if let StoreValue::Items(set) = value {
                for member in members {
                    if !set.contains(member) {
                        set.push(member.clone());
                    }
                }
            }
        })
        .await
    }

    async fn add_scored(&self, key: &str, members: &[ScoredMember]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        if let Some(m) = members.iter().find(|m| m.score.is_none_or(f64::is_nan)) {
            return Err(Error::Server(format!(
                "ERR value is not a valid float for member '{}'",
                m.member
            )));
        }
        self.upsert(
            key,
            ValueTypeTag::OrderedSet,
            StoreValue::Scored(Vec::new()),
            |value| {
                if let StoreValue::Scored(zset) = value {
                    for member in members {
                        match zset.iter_mut().find(|m| m.member == member.member) {
                            Some(existing) => existing.score = member.score,
                            None => zset.push(member.clone()),
                        }
                    }
                    zset.sort_by(|a, b| {
                        let (sa, sb) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
                        sa.total_cmp(&sb).then_with(|| a.member.cmp(&b.member))
                    });
                }
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(store.get_type("nope").await.unwrap(), ValueTypeTag::None);
        assert_eq!(store.get_value("nope").await.unwrap(), StoreValue::Nil);
        assert_eq!(store.get_ttl("nope").await.unwrap(), Ttl::Missing);
        assert!(!store.delete_key("nope").await.unwrap());
        assert!(!store.set_ttl("nope", 10).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_keys_sorted_and_filtered() {
        let store = MemoryStore::new();
        for key in ["b:2", "a:1", "b:1", "c"] {
            store.set_string(key, "v").await.unwrap();
        }

        assert_eq!(
            store.list_keys("*").await.unwrap(),
            strings(&["a:1", "b:1", "b:2", "c"])
        );
        assert_eq!(store.list_keys("b:*").await.unwrap(), strings(&["b:1", "b:2"]));
    }

    #[tokio::test]
    async fn test_hash_fields_keep_insertion_order() {
        let store = MemoryStore::new();
        let fields = vec![
            ("name".to_string(), "John".to_string()),
            ("age".to_string(), "30".to_string()),
        ];
        store.add_hash("user", &fields).await.unwrap();
        store
            .add_hash("user", &[("name".to_string(), "Jane".to_string())])
            .await
            .unwrap();

        assert_eq!(store.get_type("user").await.unwrap(), ValueTypeTag::Hash);
        assert_eq!(
            store.get_value("user").await.unwrap(),
            StoreValue::pairs([("name", "Jane"), ("age", "30")])
        );
    }

    #[tokio::test]
    async fn test_set_ignores_duplicates() {
        let store = MemoryStore::new();
        store.add_set("s", &strings(&["a", "b", "a"])).await.unwrap();

        assert_eq!(store.get_value("s").await.unwrap(), StoreValue::items(["a", "b"]));
    }

    #[tokio::test]
    async fn test_scored_members_sorted_by_score_then_member() {
        let store = MemoryStore::new();
        let members = vec![
            ScoredMember::new("c", 2.0),
            ScoredMember::new("b", 1.0),
            ScoredMember::new("a", 1.0),
        ];
        store.add_scored("z", &members).await.unwrap();

        assert_eq!(
            store.get_value("z").await.unwrap(),
            StoreValue::scored([("a", 1.0), ("b", 1.0), ("c", 2.0)])
        );
    }

    #[tokio::test]
    async fn test_scored_member_without_score_rejected() {
        let store = MemoryStore::new();
        let err = store
            .add_scored("z", &[ScoredMember::without_score("m")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Server(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_wrong_type_write() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();

        let err = store.push_list("k", &strings(&["x"])).await.unwrap_err();
        assert!(matches!(err, Error::Server(msg) if msg.starts_with("WRONGTYPE")));
    }

    #[tokio::test]
    async fn test_ttl_lifecycle() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();
        assert_eq!(store.get_ttl("k").await.unwrap(), Ttl::Persistent);

        assert!(store.set_ttl("k", 100).await.unwrap());
        assert_eq!(store.get_ttl("k").await.unwrap(), Ttl::Expires(100));

        // SET clears the expiry
        store.set_string("k", "v2").await.unwrap();
        assert_eq!(store.get_ttl("k").await.unwrap(), Ttl::Persistent);
    }

    #[tokio::test]
    async fn test_non_positive_ttl_deletes() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();

        assert!(store.set_ttl("k", 0).await.unwrap());
        assert_eq!(store.get_type("k").await.unwrap(), ValueTypeTag::None);
        assert!(store.list_keys("*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_huge_ttl_is_rejected_without_touching_key() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();

        let err = store.set_ttl("k", i64::MAX).await.unwrap_err();
        assert!(matches!(err, Error::Server(msg) if msg.contains("invalid expire time")));
        assert_eq!(store.get_ttl("k").await.unwrap(), Ttl::Persistent);
    }

    #[tokio::test]
    async fn test_expired_key_disappears() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();
        store.entries.write().await.get_mut("k").unwrap().expires_at = Some(Instant::now());

        assert_eq!(store.get_value("k").await.unwrap(), StoreValue::Nil);
        assert!(store.list_keys("*").await.unwrap().is_empty());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_delete_key() {
        let store = MemoryStore::new();
        store.set_string("k", "v").await.unwrap();

        assert!(store.delete_key("k").await.unwrap());
        assert!(!store.delete_key("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_returns_tag_and_value() {
        let store = MemoryStore::new();
        store.push_list("l", &strings(&["x", "y"])).await.unwrap();

        let (tag, value) = store.fetch("l").await.unwrap();
        assert_eq!(tag, ValueTypeTag::List);
        assert_eq!(value, StoreValue::items(["x", "y"]));
    }
}

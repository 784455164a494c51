use rtui_store::{KeyStore, MemoryStore};
use rtui_testing::fixtures::{leaderboard, put, sample_store, store_with_strings};
use rtui_types::{StoreValue, Ttl, ValueTypeTag};
use std::sync::Arc;

async fn seeded() -> Arc<dyn KeyStore> {
    Arc::new(sample_store().await.unwrap())
}

#[tokio::test]
async fn test_browse_flow_through_trait_object() {
    let store = seeded().await;

    let keys = store.list_keys("user:*").await.unwrap();
    assert_eq!(keys, vec!["user:1000".to_string(), "user:1001".to_string()]);

    let (tag, value) = store.fetch("user:1000").await.unwrap();
    assert_eq!(tag, ValueTypeTag::Hash);
    assert!(matches!(value, StoreValue::Pairs(ref pairs) if pairs[0].0 == "name"));
}

#[tokio::test]
async fn test_expire_then_delete() {
    let store = seeded().await;

    assert!(store.set_ttl("user:1001", 120).await.unwrap());
    assert_eq!(store.get_ttl("user:1001").await.unwrap(), Ttl::Expires(120));

    assert!(store.delete_key("user:1001").await.unwrap());
    assert_eq!(store.get_ttl("user:1001").await.unwrap(), Ttl::Missing);
    assert_eq!(
        store.get_type("user:1001").await.unwrap(),
        ValueTypeTag::None
    );
}

#[tokio::test]
async fn test_pattern_filters_string_keys() {
    let store = store_with_strings(&[("app:one", "1"), ("app:two", "2"), ("other", "3")])
        .await
        .unwrap();

    assert_eq!(
        store.list_keys("app:*").await.unwrap(),
        vec!["app:one".to_string(), "app:two".to_string()]
    );
    assert_eq!(store.list_keys("app:t?o").await.unwrap(), vec!["app:two".to_string()]);
}

#[tokio::test]
async fn test_put_writes_each_shape() {
    let store = MemoryStore::new();
    let scored = StoreValue::Scored(leaderboard());

    put(&store, "greeting", &StoreValue::text("hello")).await.unwrap();
    put(&store, "profile", &StoreValue::pairs([("name", "Ada")])).await.unwrap();
    put(&store, "queue", &StoreValue::items(["a", "b"])).await.unwrap();
    put(&store, "board", &scored).await.unwrap();

    assert_eq!(store.get_type("greeting").await.unwrap(), ValueTypeTag::String);
    assert_eq!(store.get_type("profile").await.unwrap(), ValueTypeTag::Hash);
    assert_eq!(store.get_type("queue").await.unwrap(), ValueTypeTag::List);
    assert_eq!(store.fetch("board").await.unwrap(), (ValueTypeTag::OrderedSet, scored));

    put(&store, "greeting", &StoreValue::Nil).await.unwrap();
    assert_eq!(store.len().await, 3);
}

use super::*;
use serde_json::json;

#[tokio::test]
async fn put_then_get_round_trips() {
    let kv = InMemoryKvStore::new();
    kv.put(Namespace::Intents, "int_1", json!({"state": "proposed"})).await.unwrap();
    let value = kv.get(Namespace::Intents, "int_1").await.unwrap();
    assert_eq!(value["state"], "proposed");
}

#[tokio::test]
async fn get_missing_key_is_not_found() {
    let kv = InMemoryKvStore::new();
    let err = kv.get(Namespace::Intents, "missing").await.unwrap_err();
    assert_eq!(err, KvError::NotFound { namespace: "intents".into(), key: "missing".into() });
}

#[tokio::test]
async fn namespaces_are_isolated() {
    let kv = InMemoryKvStore::new();
    kv.put(Namespace::Intents, "a", json!(1)).await.unwrap();
    kv.put(Namespace::Runs, "a", json!(2)).await.unwrap();
    assert_eq!(kv.get(Namespace::Intents, "a").await.unwrap(), json!(1));
    assert_eq!(kv.get(Namespace::Runs, "a").await.unwrap(), json!(2));
}

#[tokio::test]
async fn list_returns_all_values_in_a_namespace() {
    let kv = InMemoryKvStore::new();
    kv.put(Namespace::Runs, "a", json!(1)).await.unwrap();
    kv.put(Namespace::Runs, "b", json!(2)).await.unwrap();
    let mut values: Vec<_> = kv.list(Namespace::Runs).await.into_iter().collect();
    values.sort_by_key(|v| v.as_i64().unwrap());
    assert_eq!(values, vec![json!(1), json!(2)]);
}

#[tokio::test]
async fn list_on_empty_namespace_is_empty() {
    let kv = InMemoryKvStore::new();
    assert!(kv.list(Namespace::PrTracker).await.is_empty());
}

#[tokio::test]
async fn delete_removes_the_key() {
    let kv = InMemoryKvStore::new();
    kv.put(Namespace::Intents, "a", json!(1)).await.unwrap();
    kv.delete(Namespace::Intents, "a").await.unwrap();
    assert!(kv.get(Namespace::Intents, "a").await.is_err());
}

#[tokio::test]
async fn delete_missing_key_is_not_found() {
    let kv = InMemoryKvStore::new();
    assert!(kv.delete(Namespace::Intents, "missing").await.is_err());
}

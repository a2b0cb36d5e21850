use super::JsonFileStore;

use anyhow::Result;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::models::{CardRecord, StoreError};

fn card(payload: Value) -> Result<CardRecord> {
    Ok(serde_json::from_value(payload)?)
}

fn store_in(dir: &TempDir) -> JsonFileStore<CardRecord> {
    JsonFileStore::new(dir.path().join("cards.json"))
}

async fn seeded_store(dir: &TempDir) -> Result<JsonFileStore<CardRecord>> {
    let store = store_in(dir);
    store.init().await?;
    Ok(store)
}

#[tokio::test]
async fn test_init_seeds_an_empty_sequence() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;

    assert_eq!(store.load_all().await?, vec![]);

    Ok(())
}

#[tokio::test]
async fn test_init_leaves_an_existing_file_alone() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    store.init().await?;

    assert_eq!(store.load_all().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_append_then_load_round_trips_with_default_balance() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;

    let stored = store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    assert_eq!(stored.balance.as_deref(), Some("0"));

    let records = store.load_all().await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].as_ref(), Some(&stored));

    Ok(())
}

#[tokio::test]
async fn test_append_keeps_a_client_supplied_balance() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;

    let stored = store
        .append(card(json!({"cardNumber": "4000000000000002", "balance": "1500"}))?)
        .await?;

    assert_eq!(stored.balance.as_deref(), Some("1500"));

    Ok(())
}

#[tokio::test]
async fn test_unknown_payload_fields_survive_the_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;

    store
        .append(card(json!({"cardNumber": "4000000000000002", "issuer": "smolny", "pin": 4321}))?)
        .await?;

    let records = store.load_all().await?;
    let stored = records[0].as_ref().expect("record should be live");

    assert_eq!(stored.extra.get("issuer"), Some(&json!("smolny")));
    assert_eq!(stored.extra.get("pin"), Some(&json!(4321)));

    Ok(())
}

#[tokio::test]
async fn test_load_is_idempotent_without_mutation() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    assert_eq!(store.load_all().await?, store.load_all().await?);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_append_is_rejected_and_size_unchanged() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": 4000000000000000u64}))?).await?;

    let result = store.append(card(json!({"cardNumber": 4000000000000000u64}))?).await;

    assert!(matches!(result, Err(StoreError::Conflict { index: 0 })));
    assert_eq!(store.load_all().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_detection_compares_numerically() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "007"}))?).await?;

    let result = store.append(card(json!({"cardNumber": 7}))?).await;

    assert!(matches!(result, Err(StoreError::Conflict { index: 0 })));

    Ok(())
}

#[tokio::test]
async fn test_deleted_slot_does_not_block_a_new_append() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;
    store.mark_deleted(0).await?;

    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    let records = store.load_all().await?;

    assert_eq!(records.len(), 2);
    assert!(records[0].is_none());
    assert!(records[1].is_some());

    Ok(())
}

#[tokio::test]
async fn test_second_delete_of_the_same_slot_reports_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    store.mark_deleted(0).await?;
    let result = store.mark_deleted(0).await;

    assert!(matches!(result, Err(StoreError::NotFound { index: 0 })));

    Ok(())
}

#[tokio::test]
async fn test_delete_past_the_end_reports_not_found_without_writing() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;
    store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;
    let before = std::fs::read_to_string(store.path())?;

    let result = store.mark_deleted(5).await;

    assert!(matches!(result, Err(StoreError::NotFound { index: 5 })));
    assert_eq!(std::fs::read_to_string(store.path())?, before);

    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_a_read_fault() {
    let dir = TempDir::new().expect("temp dir");
    let store = store_in(&dir);

    let result = store.load_all().await;

    assert!(matches!(result, Err(StoreError::StorageRead { .. })));
}

#[tokio::test]
async fn test_malformed_file_content_is_a_parse_fault() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    std::fs::write(store.path(), "{not a record array")?;

    let result = store.load_all().await;

    assert!(matches!(result, Err(StoreError::StorageParse { .. })));

    Ok(())
}

#[tokio::test]
async fn test_create_then_delete_lifecycle_on_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let store = seeded_store(&dir).await?;

    let stored = store.append(card(json!({"cardNumber": "4000000000000002"}))?).await?;

    assert_eq!(serde_json::to_value(&stored)?, json!({"cardNumber": "4000000000000002", "balance": "0"}));
    assert_eq!(store.load_all().await?, vec![Some(stored)]);

    store.mark_deleted(0).await?;

    assert_eq!(store.load_all().await?, vec![None]);
    assert_eq!(std::fs::read_to_string(store.path())?, "[null]");

    Ok(())
}

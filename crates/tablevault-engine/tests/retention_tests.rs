//! Retention sweeper tests over the mock blob store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tablevault_core::{RestoreSecret, TableName, VaultConfig};
use tablevault_engine::BackupEngine;
use tablevault_testing::{MockBlobStore, MockRecordStore};

fn build_engine(blob: &MockBlobStore) -> BackupEngine {
    let config = VaultConfig::new(
        vec![TableName::parse("items").unwrap()],
        RestoreSecret::new("s"),
    );
    BackupEngine::new(
        config,
        Arc::new(MockRecordStore::new()),
        Arc::new(blob.clone()),
    )
}

fn aged_from(now: chrono::DateTime<Utc>, days: i64) -> chrono::DateTime<Utc> {
    now - Duration::days(days)
}

fn aged(days: i64) -> chrono::DateTime<Utc> {
    aged_from(Utc::now(), days)
}

#[tokio::test]
async fn sweep_deletes_only_archives_past_the_horizon() {
    // Ages [10, 15, 16, 30] days with a 15-day horizon. Time is pinned so
    // the exactly-15-days-old archive sits precisely on the boundary.
    let now = Utc::now();
    let blob = MockBlobStore::new()
        .with_object_aged("backup_a.zip", vec![1], aged_from(now, 10))
        .with_object_aged("backup_b.zip", vec![1], aged_from(now, 15))
        .with_object_aged("backup_c.zip", vec![1], aged_from(now, 16))
        .with_object_aged("backup_d.zip", vec![1], aged_from(now, 30));
    let engine = build_engine(&blob);

    let outcome = engine.sweep_at(now).await.unwrap();

    assert_eq!(outcome.examined, 4);
    let mut deleted = outcome.deleted.clone();
    deleted.sort();
    assert_eq!(deleted, ["backup_c.zip", "backup_d.zip"]);
    assert!(outcome.failed.is_empty());

    let mut remaining = blob.object_names();
    remaining.sort();
    assert_eq!(remaining, ["backup_a.zip", "backup_b.zip"]);
}

#[tokio::test]
async fn archive_exactly_at_the_horizon_is_kept() {
    let now = Utc::now();
    let blob = MockBlobStore::new()
        .with_object_aged("backup_edge.zip", vec![1], aged_from(now, 15))
        .with_object_aged(
            "backup_over.zip",
            vec![1],
            aged_from(now, 15) - Duration::seconds(1),
        );
    let engine = build_engine(&blob);

    let outcome = engine.sweep_at(now).await.unwrap();

    assert_eq!(outcome.deleted, ["backup_over.zip"]);
    assert_eq!(blob.object_names(), ["backup_edge.zip"]);
}

#[tokio::test]
async fn per_item_delete_failure_does_not_abort_the_sweep() {
    let blob = MockBlobStore::new()
        .with_object_aged("backup_x.zip", vec![1], aged(20))
        .with_object_aged("backup_y.zip", vec![1], aged(20))
        .with_delete_failure("backup_x.zip");
    let engine = build_engine(&blob);

    let outcome = engine.sweep().await.unwrap();

    assert_eq!(outcome.failed, ["backup_x.zip"]);
    assert_eq!(outcome.deleted, ["backup_y.zip"]);
    assert_eq!(blob.object_names(), ["backup_x.zip"]);
}

#[tokio::test]
async fn sweep_ignores_objects_outside_the_archive_prefix() {
    let blob = MockBlobStore::new()
        .with_object_aged("backup_old.zip", vec![1], aged(30))
        .with_object_aged("unrelated.bin", vec![1], aged(30));
    let engine = build_engine(&blob);

    let outcome = engine.sweep().await.unwrap();

    assert_eq!(outcome.examined, 1);
    assert_eq!(outcome.deleted, ["backup_old.zip"]);
    assert_eq!(blob.object_names(), ["unrelated.bin"]);
}

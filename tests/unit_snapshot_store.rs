mod common;

use common::{department, sample_snapshot, users};
use kiwitrain::{SnapshotError, SnapshotStore, TrainingSnapshot};
use kiwitrain_auth::Session;
use kiwitrain_models::UserId;
use std::time::Duration;

fn named(name: &str) -> TrainingSnapshot {
    TrainingSnapshot {
        departments: vec![department("D1", name, 1)],
        ..Default::default()
    }
}

fn department_name(store: &SnapshotStore) -> String {
    store.current().snapshot.departments[0].name.clone()
}

#[test]
fn test_new_store_is_empty() {
    let store = SnapshotStore::new();
    assert_eq!(store.revision(), 0);
    assert!(store.current().snapshot.departments.is_empty());
    assert!(store.dashboard(&Session::anonymous()).is_access_denied());
}

#[test]
fn test_publish_replaces_snapshot_and_bumps_revision() {
    let store = SnapshotStore::new();
    assert_eq!(store.publish(named("first")), 1);
    assert_eq!(store.publish(named("second")), 2);
    assert_eq!(store.revision(), 2);
    assert_eq!(department_name(&store), "second");
}

#[test]
fn test_readers_keep_their_consistent_view() {
    let store = SnapshotStore::new();
    store.publish(named("old"));
    let held = store.current();

    store.publish(named("new"));
    assert_eq!(held.snapshot.departments[0].name, "old");
    assert_eq!(held.index.departments()[0].name, "old");
    assert_eq!(department_name(&store), "new");
}

#[test]
fn test_clones_share_state() {
    let store = SnapshotStore::new();
    let other = store.clone();
    other.publish(named("shared"));
    assert_eq!(store.revision(), 1);
    assert_eq!(department_name(&store), "shared");
}

#[test]
fn test_store_dashboard_uses_published_indices() {
    let store = SnapshotStore::new();
    let snapshot = sample_snapshot();
    let leader = snapshot
        .find_user(&UserId::from(users::LEADER))
        .cloned()
        .unwrap();
    store.publish(snapshot);

    let dashboard = store.dashboard(&Session::for_user(leader));
    assert_eq!(dashboard.departments.len(), 1);
    assert_eq!(dashboard.departments[0].progress.rate, 60);
}

#[tokio::test(start_paused = true)]
async fn test_last_completed_fetch_wins() {
    let store = SnapshotStore::new();

    // The slow fetch starts first but completes last.
    let slow = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok::<_, SnapshotError>(named("slow"))
    };
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, SnapshotError>(named("fast"))
    };

    let (slow_rev, fast_rev) = tokio::join!(store.refresh(slow), store.refresh(fast));
    assert_eq!(fast_rev.unwrap(), 1);
    assert_eq!(slow_rev.unwrap(), 2);
    assert_eq!(department_name(&store), "slow");
}

#[tokio::test]
async fn test_failed_refresh_keeps_current_snapshot() {
    let store = SnapshotStore::new();
    store.publish(named("good"));

    let result = store
        .refresh(async { TrainingSnapshot::from_json("{broken") })
        .await;
    assert!(matches!(result, Err(SnapshotError::Parse(_))));
    assert_eq!(store.revision(), 1);
    assert_eq!(department_name(&store), "good");
}

#[tokio::test]
async fn test_subscribers_see_each_publish() {
    let store = SnapshotStore::new();
    let mut receiver = store.subscribe();

    let publisher = store.clone();
    let handle = tokio::spawn(async move { publisher.publish(named("pushed")) });

    receiver.changed().await.unwrap();
    let seen = receiver.borrow_and_update().clone();
    assert_eq!(seen.revision, 1);
    assert_eq!(seen.snapshot.departments[0].name, "pushed");
    assert_eq!(handle.await.unwrap(), 1);
}

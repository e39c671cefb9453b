use std::sync::Arc;

use liveops_core::clock::FixedClock;
use liveops_core::error::LiveOpsError;
use liveops_core::models::RiskClassification;
use liveops_core::store::{InMemoryAttendanceStore, StoreError};

use crate::common::{
    analytics_service, pool_config, reference_now, AttendanceRecordBuilder, ScriptedStore,
};

fn units(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_results_follow_request_order_not_completion_order() {
    let now = reference_now();
    let inner = Arc::new(InMemoryAttendanceStore::new());
    inner.put(
        AttendanceRecordBuilder::new(now)
            .unit("B")
            .risk(RiskClassification::Red)
            .entered(30)
            .build(),
    );
    let store = Arc::new(
        ScriptedStore::new(inner)
            .delay("A", 60)
            .delay("B", 30)
            .delay("C", 0),
    );
    let service = analytics_service(
        store.clone(),
        Arc::new(FixedClock::new(now)),
        pool_config(3, 3, 0),
    );

    let results = service
        .get_analytics_by_units(&units(&["A", "B", "C"]))
        .await
        .unwrap();

    let ids: Vec<_> = results.iter().map(|r| r.health_unit_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert!(results[1].has_breach());
    assert!(!results[0].has_breach());
    assert_eq!(store.window_query_count(), 3);
}

#[tokio::test]
async fn test_empty_request_schedules_nothing() {
    let store = Arc::new(ScriptedStore::new(Arc::new(InMemoryAttendanceStore::new())));
    let service = analytics_service(
        store.clone(),
        Arc::new(FixedClock::new(reference_now())),
        pool_config(1, 1, 1),
    );

    let err = service.get_analytics_by_units(&[]).await.unwrap_err();

    assert!(matches!(err, LiveOpsError::BatchRejected { .. }));
    assert_eq!(store.window_query_count(), 0);
}

#[tokio::test]
async fn test_batch_over_capacity_is_rejected_before_any_work() {
    let store = Arc::new(ScriptedStore::new(Arc::new(InMemoryAttendanceStore::new())));
    // Admits max 2 + queue 1 = 3 units
    let service = analytics_service(
        store.clone(),
        Arc::new(FixedClock::new(reference_now())),
        pool_config(1, 2, 1),
    );

    let err = service
        .get_analytics_by_units(&units(&["A", "B", "C", "D"]))
        .await
        .unwrap_err();

    assert!(matches!(err, LiveOpsError::BatchRejected { .. }));
    assert!(err.to_string().contains("4 task(s) requested"));
    assert_eq!(store.window_query_count(), 0);

    let ok = service
        .get_analytics_by_units(&units(&["A", "B", "C"]))
        .await
        .unwrap();
    assert_eq!(ok.len(), 3);
}

#[tokio::test]
async fn test_one_failing_unit_fails_the_batch_without_touching_others() {
    let store = Arc::new(
        ScriptedStore::new(Arc::new(InMemoryAttendanceStore::new())).failing("B"),
    );
    let service = analytics_service(
        store.clone(),
        Arc::new(FixedClock::new(reference_now())),
        pool_config(2, 4, 4),
    );

    let err = service
        .get_analytics_by_units(&units(&["A", "B", "C"]))
        .await
        .unwrap_err();

    assert!(matches!(err, LiveOpsError::Store(StoreError::Unavailable(_))));
    // Every unit still ran to completion
    assert_eq!(store.window_query_count(), 3);
    assert_eq!(service.pool().stats().available_slots, 8);

    let a = service.get_analytics("A").await.unwrap();
    assert_eq!(a.risk_performance.len(), 5);
}

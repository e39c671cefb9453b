use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;
use liveops_core::clock::Clock;
use liveops_core::error::LiveOpsError;
use liveops_core::models::RiskClassification;
use liveops_core::services::AttendanceService;
use liveops_core::state_machine::{AttendanceEvent, AttendanceStatus};
use liveops_core::store::InMemoryAttendanceStore;
use liveops_core::validation::TriageRequest;

use crate::common::{ScriptedStore, TestHarness};

fn triage(unit: &str) -> TriageRequest {
    TriageRequest::new(unit, "Helena", "98765432100", RiskClassification::Orange)
}

#[tokio::test]
async fn test_intake_to_discharge() {
    let harness = TestHarness::new();
    let created = harness.attendance.start_triage(&triage("unit-1")).await.unwrap();
    assert_eq!(created.status, AttendanceStatus::Waiting);

    harness.clock.advance(Duration::minutes(8));
    let started = harness
        .attendance
        .update_status(created.id, AttendanceStatus::InProgress)
        .await
        .unwrap();

    harness.clock.advance(Duration::minutes(20));
    let discharged = harness
        .attendance
        .update_status(created.id, AttendanceStatus::Discharged)
        .await
        .unwrap();

    assert_eq!(started.effective_wait_minutes(harness.clock.now()), 8);
    assert_eq!(discharged.total_stay_minutes(), Some(28));
    assert_eq!(discharged.risk_classification, RiskClassification::Orange);
    assert_eq!(
        harness.attendance.get_attendance_by_id(created.id).await.unwrap(),
        discharged
    );
}

#[tokio::test]
async fn test_discharged_record_is_terminal() {
    let harness = TestHarness::new();
    let created = harness.attendance.start_triage(&triage("unit-1")).await.unwrap();
    harness
        .attendance
        .apply_event(created.id, AttendanceEvent::Start)
        .await
        .unwrap();
    let discharged = harness
        .attendance
        .apply_event(created.id, AttendanceEvent::Discharge)
        .await
        .unwrap();

    for requested in AttendanceStatus::ALL {
        let err = harness
            .attendance
            .update_status(created.id, requested)
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, LiveOpsError::InvalidTransition { .. }));
    }

    assert_eq!(
        harness.attendance.get_attendance_by_id(created.id).await.unwrap(),
        discharged
    );
}

#[tokio::test]
async fn test_rejected_transition_is_not_persisted() {
    let scripted = Arc::new(ScriptedStore::new(Arc::new(InMemoryAttendanceStore::new())));
    let service = AttendanceService::new(scripted.clone());
    let created = service.start_triage(&triage("unit-1")).await.unwrap();

    let err = service
        .update_status(created.id, AttendanceStatus::Discharged)
        .await
        .unwrap_err();

    assert!(matches!(err, LiveOpsError::InvalidTransition { .. }));
    assert_eq!(scripted.save_count(), 0);
}

#[tokio::test]
async fn test_list_by_unit_returns_every_status() {
    let harness = TestHarness::new();
    let a = harness.attendance.start_triage(&triage("unit-1")).await.unwrap();
    harness.attendance.start_triage(&triage("unit-1")).await.unwrap();
    harness.attendance.start_triage(&triage("unit-2")).await.unwrap();
    harness
        .attendance
        .update_status(a.id, AttendanceStatus::InProgress)
        .await
        .unwrap();

    let unit_1 = harness.attendance.list_by_health_unit("unit-1").await.unwrap();

    assert_eq!(unit_1.len(), 2);
    assert!(unit_1.iter().all(|r| r.health_unit_id == "unit-1"));
    assert_eq!(harness.store.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_discharges_apply_once() {
    let harness = TestHarness::new();
    let created = harness.attendance.start_triage(&triage("unit-1")).await.unwrap();
    harness
        .attendance
        .update_status(created.id, AttendanceStatus::InProgress)
        .await
        .unwrap();

    let attempts = (0..8).map(|_| {
        let service = harness.attendance.clone();
        let id = created.id;
        tokio::spawn(async move { service.update_status(id, AttendanceStatus::Discharged).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(LiveOpsError::InvalidTransition { .. })))
        .count();
    assert_eq!(succeeded, 1);
    assert_eq!(rejected, 7);
}

use chrono::Duration;
use liveops_core::state_machine::{
    AttendanceEvent, AttendanceStatus, TransitionError, TransitionGuard, TransitionOutcome,
};

use crate::common::{reference_now, AttendanceRecordBuilder};

#[test]
fn test_lifecycle_round_trip_stamps_times() {
    let now = reference_now();
    let waiting = AttendanceRecordBuilder::new(now).entered(20).build();

    let started = TransitionGuard::apply(&waiting, AttendanceStatus::InProgress, now).unwrap();
    let later = now + Duration::minutes(25);
    let discharged = TransitionGuard::apply(&started, AttendanceStatus::Discharged, later).unwrap();

    assert_eq!(started.start_time, Some(now));
    assert_eq!(discharged.discharge_time, Some(later));
    assert_eq!(discharged.start_time, Some(now));
    assert!(discharged.timestamps_are_ordered());
}

#[test]
fn test_discharged_record_rejects_every_status() {
    let now = reference_now();
    let discharged = AttendanceRecordBuilder::new(now)
        .entered(60)
        .started(40)
        .discharged(5)
        .build();

    for requested in AttendanceStatus::ALL {
        let err = TransitionGuard::apply(&discharged, requested, now).unwrap_err();
        assert_eq!(err.pair(), (AttendanceStatus::Discharged, requested));
    }
}

#[test]
fn test_forbidden_cells() {
    assert_eq!(
        TransitionGuard::outcome(AttendanceStatus::Waiting, AttendanceStatus::Discharged),
        TransitionOutcome::Reject
    );
    assert!(matches!(
        TransitionGuard::can_transition(AttendanceStatus::InProgress, AttendanceStatus::Waiting),
        Err(TransitionError::InvalidTransition {
            from: AttendanceStatus::InProgress,
            to: AttendanceStatus::Waiting
        })
    ));
}

#[test]
fn test_repeated_start_restamps_start_time() {
    let now = reference_now();
    let in_progress = AttendanceRecordBuilder::new(now).entered(30).started(20).build();

    let restarted = TransitionGuard::apply(&in_progress, AttendanceStatus::InProgress, now).unwrap();

    assert_eq!(restarted.start_time, Some(now));
    assert_eq!(in_progress.start_time, Some(now - Duration::minutes(20)));
}

#[test]
fn test_events_resolve_through_the_same_table() {
    let now = reference_now();
    let waiting = AttendanceRecordBuilder::new(now).entered(5).build();

    let requeued =
        TransitionGuard::apply(&waiting, AttendanceEvent::Requeue.requested_status(), now).unwrap();
    assert_eq!(requeued, waiting);

    assert!(TransitionGuard::apply(&waiting, AttendanceEvent::Discharge.requested_status(), now)
        .is_err());
}

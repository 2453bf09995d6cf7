use rattendance::core::attendance::{AttendanceState, describe_state};
use rattendance::core::{is_permitted, permitted_actions};
use rattendance::errors::AppError;
use rattendance::models::event::NewStamp;
use rattendance::models::stamp_type::{ALL_STAMP_TYPES, StampType, TRANSITIONS};

mod common;
use common::{at, ev};

use StampType::*;

/// Expected legality, written out by hand: rows = candidate, columns = last
/// (None, sign-in, sign-out, start-break, end-break, register-leave).
const EXPECTED: [(StampType, [bool; 6]); 5] = [
    (SignIn, [true, false, true, false, false, false]),
    (SignOut, [false, true, false, false, true, false]),
    (StartBreak, [false, true, false, false, true, false]),
    (EndBreak, [false, false, false, true, false, false]),
    (RegisterLeave, [true, true, true, true, true, true]),
];

fn lasts() -> [Option<StampType>; 6] {
    [
        None,
        Some(SignIn),
        Some(SignOut),
        Some(StartBreak),
        Some(EndBreak),
        Some(RegisterLeave),
    ]
}

#[test]
fn test_is_permitted_exhaustive() {
    for (candidate, row) in EXPECTED {
        for (last, expected) in lasts().into_iter().zip(row) {
            assert_eq!(
                is_permitted(candidate, last),
                expected,
                "is_permitted({:?}, {:?})",
                candidate,
                last
            );
        }
    }
}

#[test]
fn test_transitions_table_follows_catalog_order() {
    assert_eq!(TRANSITIONS.len(), ALL_STAMP_TYPES.len());
    for (i, (kind, preds)) in TRANSITIONS.iter().enumerate() {
        assert_eq!(*kind, ALL_STAMP_TYPES[i]);
        assert_eq!(kind.predecessors(), *preds);
    }
}

#[test]
fn test_permitted_actions_mirror_is_permitted() {
    for last in lasts() {
        let expected: Vec<StampType> = ALL_STAMP_TYPES
            .into_iter()
            .filter(|c| is_permitted(*c, last))
            .collect();
        assert_eq!(permitted_actions(last), expected, "last = {:?}", last);
    }
}

#[test]
fn test_permitted_actions_examples() {
    assert_eq!(permitted_actions(None), vec![SignIn, RegisterLeave]);
    assert_eq!(
        permitted_actions(Some(SignIn)),
        vec![SignOut, StartBreak, RegisterLeave]
    );
    assert_eq!(permitted_actions(Some(StartBreak)), vec![EndBreak, RegisterLeave]);
}

#[test]
fn test_stamp_type_parsing() {
    assert_eq!("sign-in".parse::<StampType>().unwrap(), SignIn);
    assert_eq!("SIGN_OUT".parse::<StampType>().unwrap(), SignOut);
    assert_eq!(" start break ".parse::<StampType>().unwrap(), StartBreak);
    assert_eq!("Register-Leave".parse::<StampType>().unwrap(), RegisterLeave);

    let err = "lunch".parse::<StampType>().unwrap_err();
    assert!(matches!(err, AppError::InvalidStampType(ref s) if s == "lunch"));
}

#[test]
fn test_wire_names_round_trip() {
    for kind in ALL_STAMP_TYPES {
        assert_eq!(StampType::from_db_str(kind.as_str()), Some(kind));
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert_eq!(StampType::from_db_str("sign_in"), None);
}

#[test]
fn test_validate_illegal_transition_wins_over_time() {
    let state = AttendanceState::from_events(&[ev(1, SignIn, "2025-09-01T08:00:00Z")]);
    // both illegal and non-monotonic: the transition is reported
    let err = state
        .validate(NewStamp::new(SignIn, at("2025-09-01T07:00:00Z")))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::IllegalTransition {
            candidate: SignIn,
            last: Some(SignIn)
        }
    ));
    assert_eq!(err.to_string(), "Cannot sign in now: last stamp is sign-in");
}

#[test]
fn test_validate_requires_strictly_later_time() {
    let state = AttendanceState::from_events(&[ev(1, SignIn, "2025-09-01T08:00:00Z")]);

    let same = state.validate(NewStamp::new(StartBreak, at("2025-09-01T08:00:00Z")));
    assert!(matches!(same, Err(AppError::NonMonotonicTime { .. })));

    let later = NewStamp::new(StartBreak, at("2025-09-01T08:00:01Z"));
    assert_eq!(state.validate(later.clone()).unwrap(), later);
}

#[test]
fn test_leave_does_not_move_clock_state() {
    let state = AttendanceState::from_events(&[
        ev(1, SignIn, "2025-09-01T08:00:00Z"),
        ev(2, RegisterLeave, "2025-09-01T09:00:00Z"),
    ]);

    assert_eq!(state.last_stamp_type, Some(SignIn));
    assert_eq!(state.last_stamp_time, Some(at("2025-09-01T09:00:00Z")));
    assert!(state.is_clocked_in());
    assert!(!state.is_on_break());
    assert_eq!(describe_state(&state), "signed in");
}

#[test]
fn test_empty_state() {
    let state = AttendanceState::default();
    assert_eq!(state.last_stamp_type, None);
    assert!(!state.is_clocked_in());
    assert_eq!(describe_state(&state), "not signed in yet");
    assert!(
        state
            .validate(NewStamp::new(SignIn, at("2025-09-01T08:00:00Z")))
            .is_ok()
    );
}

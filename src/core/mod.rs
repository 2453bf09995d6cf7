pub mod attendance;
pub mod calculator;
pub mod export;
pub mod ingest;
pub mod log;

pub use attendance::{AttendanceState, is_permitted, permitted_actions};
pub use ingest::{IngestService, Rejection, RejectionKind, SubmitOutcome};

//! Catalog of attendance stamp kinds and the transition-legality table.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StampType {
    SignIn,
    SignOut,
    StartBreak,
    EndBreak,
    RegisterLeave,
}

/// Every stamp kind, in the same order as [`TRANSITIONS`].
pub const ALL_STAMP_TYPES: [StampType; 5] = [
    StampType::SignIn,
    StampType::SignOut,
    StampType::StartBreak,
    StampType::EndBreak,
    StampType::RegisterLeave,
];

/// Which previous stamp (if any) must be at the end of the log for a kind to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predecessors {
    /// Accepted regardless of the current attendance state.
    Any,
    /// Accepted only when the last stamp is one of these (`None` = empty log).
    OneOf(&'static [Option<StampType>]),
}

impl Predecessors {
    pub fn admits(&self, last: Option<StampType>) -> bool {
        match self {
            Predecessors::Any => true,
            Predecessors::OneOf(allowed) => allowed.contains(&last),
        }
    }
}

/// The single source of truth for attendance transitions.
/// Validation and action availability both read this table.
pub static TRANSITIONS: [(StampType, Predecessors); 5] = [
    (
        StampType::SignIn,
        Predecessors::OneOf(&[Some(StampType::SignOut), None]),
    ),
    (
        StampType::SignOut,
        Predecessors::OneOf(&[Some(StampType::SignIn), Some(StampType::EndBreak)]),
    ),
    (
        StampType::StartBreak,
        Predecessors::OneOf(&[Some(StampType::SignIn), Some(StampType::EndBreak)]),
    ),
    (
        StampType::EndBreak,
        Predecessors::OneOf(&[Some(StampType::StartBreak)]),
    ),
    (StampType::RegisterLeave, Predecessors::Any),
];

impl StampType {
    fn index(self) -> usize {
        match self {
            StampType::SignIn => 0,
            StampType::SignOut => 1,
            StampType::StartBreak => 2,
            StampType::EndBreak => 3,
            StampType::RegisterLeave => 4,
        }
    }

    /// Legal predecessors of this kind, straight from [`TRANSITIONS`].
    pub fn predecessors(self) -> Predecessors {
        TRANSITIONS[self.index()].1
    }

    /// Convert enum → DB / wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            StampType::SignIn => "sign-in",
            StampType::SignOut => "sign-out",
            StampType::StartBreak => "start-break",
            StampType::EndBreak => "end-break",
            StampType::RegisterLeave => "register-leave",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        ALL_STAMP_TYPES.into_iter().find(|k| k.as_str() == s)
    }

    /// Human label used in CLI messages.
    pub fn label(&self) -> &'static str {
        match self {
            StampType::SignIn => "sign in",
            StampType::SignOut => "sign out",
            StampType::StartBreak => "start a break",
            StampType::EndBreak => "end the break",
            StampType::RegisterLeave => "register leave",
        }
    }

    /// Leave markers do not move the clock state.
    pub fn is_clock_event(&self) -> bool {
        !matches!(self, StampType::RegisterLeave)
    }
}

impl FromStr for StampType {
    type Err = AppError;

    /// Accepts the wire spelling plus `_`/space separated and case-insensitive variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::from_db_str(&normalized).ok_or_else(|| AppError::InvalidStampType(s.to_string()))
    }
}

impl fmt::Display for StampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

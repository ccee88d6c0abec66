//! Interval kinds and input coercion for logged pomodoro intervals.
//!
//! The kind names here must match the `CHECK` constraint on
//! `sessions.session_type` in the initial migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Duration assumed when a client logs an interval without one (25 minutes).
pub const DEFAULT_DURATION_SECS: i64 = 25 * 60;

pub const KIND_FOCUS: &str = "focus";
pub const KIND_SHORT_BREAK: &str = "short_break";
pub const KIND_LONG_BREAK: &str = "long_break";

/// Message returned when the interval kind is not recognised.
pub const INVALID_KIND_MSG: &str = "invalid session_type";

/// Message returned when the duration is negative or not an integer.
pub const INVALID_DURATION_MSG: &str = "invalid duration";

/// The kind of a completed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    pub const ALL: [IntervalKind; 3] = [
        IntervalKind::Focus,
        IntervalKind::ShortBreak,
        IntervalKind::LongBreak,
    ];

    /// The string stored in the `session_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalKind::Focus => KIND_FOCUS,
            IntervalKind::ShortBreak => KIND_SHORT_BREAK,
            IntervalKind::LongBreak => KIND_LONG_BREAK,
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KIND_FOCUS => Ok(IntervalKind::Focus),
            KIND_SHORT_BREAK => Ok(IntervalKind::ShortBreak),
            KIND_LONG_BREAK => Ok(IntervalKind::LongBreak),
            _ => Err(CoreError::Validation(INVALID_KIND_MSG.into())),
        }
    }
}

/// A validated request to record one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalEntry {
    pub kind: IntervalKind,
    pub duration_secs: i64,
}

impl IntervalEntry {
    /// Validate a raw JSON payload from the logging endpoint.
    ///
    /// Anything other than a JSON object is treated as an empty object, so
    /// both fields fall back to their defaults. The kind is checked before
    /// the duration.
    pub fn from_payload(payload: &Value) -> Result<Self, CoreError> {
        let kind = match payload.get("type") {
            None => IntervalKind::Focus,
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(CoreError::Validation(INVALID_KIND_MSG.into())),
        };

        let duration_secs = match payload.get("duration_seconds") {
            None => DEFAULT_DURATION_SECS,
            Some(raw) => coerce_duration(raw)
                .ok_or_else(|| CoreError::Validation(INVALID_DURATION_MSG.into()))?,
        };

        if duration_secs < 0 {
            return Err(CoreError::Validation(INVALID_DURATION_MSG.into()));
        }

        Ok(Self {
            kind,
            duration_secs,
        })
    }
}

/// Coerce a JSON value to whole seconds.
///
/// Integers pass through, floats truncate toward zero, and strings are
/// parsed as base-10 integers after trimming whitespace. Numbers outside the
/// `i64` range are rejected rather than clamped.
pub fn coerce_duration(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn kind_round_trips_through_column_value() {
        for kind in IntervalKind::ALL {
            assert_eq!(kind.as_str().parse::<IntervalKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_matches!("nap".parse::<IntervalKind>(), Err(CoreError::Validation(_)));
        assert_matches!("Focus".parse::<IntervalKind>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let entry = IntervalEntry::from_payload(&json!({})).unwrap();
        assert_eq!(entry.kind, IntervalKind::Focus);
        assert_eq!(entry.duration_secs, 1500);
    }

    #[test]
    fn non_object_payload_uses_defaults() {
        let entry = IntervalEntry::from_payload(&json!([1, 2, 3])).unwrap();
        assert_eq!(entry.kind, IntervalKind::Focus);
        assert_eq!(entry.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn explicit_break_payload() {
        let entry =
            IntervalEntry::from_payload(&json!({"type": "long_break", "duration_seconds": 900}))
                .unwrap();
        assert_eq!(entry.kind, IntervalKind::LongBreak);
        assert_eq!(entry.duration_secs, 900);
    }

    #[test]
    fn invalid_kind_reports_session_type() {
        let err = IntervalEntry::from_payload(&json!({"type": "nap"})).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_KIND_MSG);

        let err = IntervalEntry::from_payload(&json!({"type": null})).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_KIND_MSG);
    }

    #[test]
    fn kind_is_checked_before_duration() {
        let err =
            IntervalEntry::from_payload(&json!({"type": "nap", "duration_seconds": -5})).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_KIND_MSG);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = IntervalEntry::from_payload(&json!({"duration_seconds": -1})).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == INVALID_DURATION_MSG);
    }

    #[test]
    fn zero_duration_is_allowed() {
        let entry = IntervalEntry::from_payload(&json!({"duration_seconds": 0})).unwrap();
        assert_eq!(entry.duration_secs, 0);
    }

    #[test]
    fn duration_coercion() {
        assert_eq!(coerce_duration(&json!(1500)), Some(1500));
        assert_eq!(coerce_duration(&json!(61.9)), Some(61));
        assert_eq!(coerce_duration(&json!(" 300 ")), Some(300));
        assert_eq!(coerce_duration(&json!("12.5")), None);
        assert_eq!(coerce_duration(&json!("abc")), None);
        assert_eq!(coerce_duration(&json!(true)), None);
        assert_eq!(coerce_duration(&json!(null)), None);
    }

    #[test]
    fn out_of_range_numbers_are_not_clamped() {
        assert_eq!(coerce_duration(&json!(1e30)), None);
        assert_eq!(coerce_duration(&json!(u64::MAX)), None);
        assert_eq!(coerce_duration(&json!(i64::MAX as u64 + 1)), None);
        assert_eq!(coerce_duration(&json!(-1e30)), None);

        assert_matches!(
            IntervalEntry::from_payload(&json!({"duration_seconds": 1e30})),
            Err(CoreError::Validation(msg)) if msg == INVALID_DURATION_MSG
        );
    }
}

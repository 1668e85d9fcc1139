//! Typed time-to-live states.
//!
//! Redis reports expiry as raw integer codes: `-1` for a key or field that
//! exists without an expiry, `-2` for one that does not exist, and the
//! remaining time otherwise. This module translates those codes into a small
//! closed set of states so callers never pattern-match on sentinels.

use std::time::Duration;

/// Granularity of a raw expiry code.
///
/// Redis speaks two resolutions: `TTL`/`EXPIRE` count seconds,
/// `PTTL`/`PEXPIRE` count milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
}

/// Expiry state of a key or hash field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// The key exists and never expires (code `-1`).
    Persistent,
    /// The key or field does not exist (code `-2`).
    Missing,
    /// The key expires after the given duration.
    Ttl(Duration),
}

/// Per-field outcome of `HEXPIRE` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldExpireOutcome {
    /// The field does not exist (code `-2`).
    Missing,
    /// A `NX`/`XX`/`GT`/`LT` condition was not met (code `0`).
    ConditionNotMet,
    /// The expiry was applied (code `1`).
    Applied,
    /// The field was deleted because the expiry was already due (code `2`).
    Deleted,
}

/// Per-field outcome of `HPERSIST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPersistOutcome {
    /// The field does not exist (code `-2`).
    Missing,
    /// The field exists but carries no expiry (code `-1`).
    NoExpiry,
    /// The expiry was removed (code `1`).
    Removed,
}

/// Condition restricting when a new expiry is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCondition {
    /// Only when the target has no expiry yet (`NX`).
    IfNone,
    /// Only when the target already has an expiry (`XX`).
    IfExists,
    /// Only when the new expiry is later than the current one (`GT`).
    GreaterThan,
    /// Only when the new expiry is earlier than the current one (`LT`).
    LessThan,
}

impl TimeUnit {
    /// Interprets a non-negative amount in this unit as a duration.
    pub fn duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
        }
    }

    /// Measures a duration in this unit, truncating sub-unit precision.
    pub fn count(self, duration: Duration) -> u64 {
        match self {
            TimeUnit::Seconds => duration.as_secs(),
            TimeUnit::Milliseconds => duration.as_millis() as u64,
        }
    }
}

impl Expiration {
    /// Translates a raw server code in the given unit.
    ///
    /// `-1` means persistent and `-2` means missing; any other negative code
    /// is treated as missing as well, matching how servers extend the
    /// sentinel space.
    pub fn from_code(code: i64, unit: TimeUnit) -> Self {
        match code {
            -1 => Expiration::Persistent,
            code if code < 0 => Expiration::Missing,
            code => Expiration::Ttl(unit.duration(code as u64)),
        }
    }

    /// The raw code in the given unit, inverse of
    /// [`from_code`](Self::from_code) for the sentinel states and for codes
    /// that fit the unit exactly.
    pub fn code(&self, unit: TimeUnit) -> i64 {
        match self {
            Expiration::Persistent => -1,
            Expiration::Missing => -2,
            Expiration::Ttl(duration) => unit.count(*duration) as i64,
        }
    }

    /// The remaining time, if the key exists and expires.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Expiration::Ttl(duration) => Some(*duration),
            _ => None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Expiration::Persistent)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Expiration::Missing)
    }
}

impl FieldExpireOutcome {
    pub(crate) fn from_code(code: i64) -> Option<Self> {
        match code {
            -2 => Some(FieldExpireOutcome::Missing),
            0 => Some(FieldExpireOutcome::ConditionNotMet),
            1 => Some(FieldExpireOutcome::Applied),
            2 => Some(FieldExpireOutcome::Deleted),
            _ => None,
        }
    }
}

impl FieldPersistOutcome {
    pub(crate) fn from_code(code: i64) -> Option<Self> {
        match code {
            -2 => Some(FieldPersistOutcome::Missing),
            -1 => Some(FieldPersistOutcome::NoExpiry),
            1 => Some(FieldPersistOutcome::Removed),
            _ => None,
        }
    }
}

impl ExpiryCondition {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            ExpiryCondition::IfNone => "NX",
            ExpiryCondition::IfExists => "XX",
            ExpiryCondition::GreaterThan => "GT",
            ExpiryCondition::LessThan => "LT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes() {
        assert_eq!(
            Expiration::Persistent,
            Expiration::from_code(-1, TimeUnit::Seconds),
        );
        assert_eq!(
            Expiration::Missing,
            Expiration::from_code(-2, TimeUnit::Milliseconds),
        );
        assert_eq!(Expiration::Missing, Expiration::from_code(-7, TimeUnit::Seconds));
    }

    #[test]
    fn sentinels_survive_unit_conversion() {
        for unit in [TimeUnit::Seconds, TimeUnit::Milliseconds] {
            assert_eq!(-1, Expiration::Persistent.code(unit));
            assert_eq!(-2, Expiration::Missing.code(unit));
            assert_eq!(None, Expiration::Persistent.duration());
        }
    }

    #[test]
    fn code_round_trip() {
        for unit in [TimeUnit::Seconds, TimeUnit::Milliseconds] {
            for code in [-2, -1, 0, 1, 10, 86_400] {
                let state = Expiration::from_code(code, unit);
                assert_eq!(code.max(-2), state.code(unit));
            }
        }
    }

    #[test]
    fn conversion_is_idempotent() {
        let state = Expiration::from_code(1_500, TimeUnit::Milliseconds);
        assert_eq!(state.code(TimeUnit::Milliseconds), state.code(TimeUnit::Milliseconds));
        assert_eq!(1, state.code(TimeUnit::Seconds));
        assert_eq!(Some(Duration::from_millis(1_500)), state.duration());
    }

    #[test]
    fn field_outcome_codes() {
        assert_eq!(
            Some(FieldExpireOutcome::Deleted),
            FieldExpireOutcome::from_code(2),
        );
        assert_eq!(None, FieldExpireOutcome::from_code(7));
        assert_eq!(
            Some(FieldPersistOutcome::NoExpiry),
            FieldPersistOutcome::from_code(-1),
        );
    }
}

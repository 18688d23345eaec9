//! Age-based selection.
//!
//! A run computes one [`Cutoff`] up front and tests every file against it.
//! Files whose modification time strictly precedes the cutoff are expired.
//! An expiry of zero days disables the date check entirely.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Expiry used when none is given.
pub const DEFAULT_EXPIRE_DAYS: u64 = 90;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Parse an expiry value given as text.
///
/// Only plain base-10 digits are accepted; signs, whitespace and units are not.
pub fn parse_expire_days(value: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidExpireValue {
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

/// The time boundary for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoff {
    /// `reference - expire_days`, or `reference` itself when the date check is disabled.
    instant: SystemTime,
    expire_days: u64,
}

impl Cutoff {
    /// Compute the cutoff as `now - expire_days`.
    pub fn from_days(expire_days: u64) -> Self {
        Self::from_days_at(expire_days, SystemTime::now())
    }

    /// Compute the cutoff relative to an explicit reference time.
    ///
    /// Day counts too large to subtract clamp to the Unix epoch.
    pub fn from_days_at(expire_days: u64, reference: SystemTime) -> Self {
        let instant = expire_days
            .checked_mul(SECS_PER_DAY)
            .map(Duration::from_secs)
            .and_then(|age| reference.checked_sub(age))
            .unwrap_or(UNIX_EPOCH);

        Self {
            instant,
            expire_days,
        }
    }

    /// The boundary instant.
    pub fn instant(&self) -> SystemTime {
        self.instant
    }

    /// Number of days this cutoff was built from.
    pub fn expire_days(&self) -> u64 {
        self.expire_days
    }

    /// Whether the date check is enabled (false means every file qualifies).
    pub fn checks_date(&self) -> bool {
        self.expire_days != 0
    }

    /// Test a modification time against this cutoff.
    pub fn is_expired(&self, modified_at: SystemTime) -> bool {
        !self.checks_date() || modified_at < self.instant
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.checks_date() {
            return write!(f, "any time (date check disabled)");
        }
        let local: DateTime<Local> = self.instant.into();
        write!(f, "{}", local.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// True iff `modified_at` precedes `cutoff`, or the cutoff disables the date check.
pub fn is_expired(modified_at: SystemTime, cutoff: &Cutoff) -> bool {
    cutoff.is_expired(modified_at)
}

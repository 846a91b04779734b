//! Expiration classification.
//!
//! # Responsibility
//! - Turn a days-to-expiration difference into a severity band.
//! - Keep the band thresholds as domain constants.
//!
//! # Invariants
//! - Band boundaries are inclusive: a can expiring today is `Expired`.
//! - Rendering of bands (colors, icons) stays in the UI shell.

use crate::model::ids::DayNumber;

/// A can counts as expired when it expires today or earlier.
pub const EXPIRED_WITHIN_DAYS: i64 = 0;
/// A can expiring within one week is urgent.
pub const URGENT_WITHIN_DAYS: i64 = 7;
/// A can expiring within one month deserves a warning.
pub const WARNING_WITHIN_DAYS: i64 = 30;

/// Severity band for a can's remaining shelf life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationBand {
    /// Expires today or already expired.
    Expired,
    /// Expires within a week.
    Urgent,
    /// Expires within a month.
    Warning,
    /// More than a month of shelf life left.
    Normal,
}

impl ExpirationBand {
    /// Classifies a days-to-expiration difference into a band.
    pub fn classify(days_to_expiration: i64) -> Self {
        if days_to_expiration <= EXPIRED_WITHIN_DAYS {
            Self::Expired
        } else if days_to_expiration <= URGENT_WITHIN_DAYS {
            Self::Urgent
        } else if days_to_expiration <= WARNING_WITHIN_DAYS {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Days remaining until `expires`, negative when already past.
pub fn days_to_expiration(today: DayNumber, expires: DayNumber) -> i64 {
    expires - today
}

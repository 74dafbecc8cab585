//! Expiration directives of the create operation
//!
//! A create request may carry `month`, `week`, `day` (presence only) or
//! `expires_after=<seconds>`. At most one is honoured, in that precedence
//! order. Resolution happens before the confirmation gate, so a malformed
//! `expires_after` is rejected without issuing a token.

use chrono::{DateTime, Duration, Months, Utc};

/// Raw expiration parameters as they arrive from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryParams {
    pub month: bool,
    pub week: bool,
    pub day: bool,
    pub expires_after: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryDirective {
    Never,
    Month,
    Week,
    Day,
    /// Relative offset in seconds; zero or negative creates an already
    /// expired record.
    After(i32),
}

/// `expires_after` is present but not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidExpiry(pub String);

impl std::fmt::Display for InvalidExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expires_after must be an integer number of seconds, got '{}'", self.0)
    }
}

impl std::error::Error for InvalidExpiry {}

impl ExpiryDirective {
    /// Picks the first directive present: month, week, day, expires_after.
    pub fn resolve(params: &ExpiryParams) -> Result<Self, InvalidExpiry> {
        if params.month {
            return Ok(Self::Month);
        }
        if params.week {
            return Ok(Self::Week);
        }
        if params.day {
            return Ok(Self::Day);
        }

        match params.expires_after.as_deref() {
            Some(raw) => raw
                .parse::<i32>()
                .map(Self::After)
                .map_err(|_| InvalidExpiry(raw.to_string())),
            None => Ok(Self::Never),
        }
    }

    /// Absolute expiry for a record created at `created_at`.
    ///
    /// `Month` adds one calendar month, clamped to the last day of the target
    /// month. Results past the representable range saturate at
    /// `DateTime::<Utc>::MAX_UTC`.
    pub fn expires_at(self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let expires_at = match self {
            Self::Never => return None,
            Self::Month => created_at.checked_add_months(Months::new(1)),
            Self::Week => created_at.checked_add_signed(Duration::weeks(1)),
            Self::Day => created_at.checked_add_signed(Duration::days(1)),
            Self::After(seconds) => {
                created_at.checked_add_signed(Duration::seconds(i64::from(seconds)))
            }
        };
        Some(expires_at.unwrap_or(DateTime::<Utc>::MAX_UTC))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 8, 30, 0).unwrap()
    }

    fn after(raw: &str) -> ExpiryParams {
        ExpiryParams {
            expires_after: Some(raw.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_directive_never_expires() {
        let directive = ExpiryDirective::resolve(&ExpiryParams::default()).unwrap();
        assert_eq!(directive, ExpiryDirective::Never);
        assert_eq!(directive.expires_at(at(2024, 1, 1)), None);
    }

    #[test]
    fn test_precedence_month_week_day_seconds() {
        let all = ExpiryParams {
            month: true,
            week: true,
            day: true,
            expires_after: Some("10".to_string()),
        };
        assert_eq!(ExpiryDirective::resolve(&all), Ok(ExpiryDirective::Month));

        let no_month = ExpiryParams {
            month: false,
            ..all.clone()
        };
        assert_eq!(ExpiryDirective::resolve(&no_month), Ok(ExpiryDirective::Week));

        let day_only = ExpiryParams {
            month: false,
            week: false,
            ..all
        };
        assert_eq!(ExpiryDirective::resolve(&day_only), Ok(ExpiryDirective::Day));
    }

    #[test]
    fn test_earlier_directive_masks_bad_expires_after() {
        let params = ExpiryParams {
            day: true,
            expires_after: Some("soon".to_string()),
            ..Default::default()
        };
        assert_eq!(ExpiryDirective::resolve(&params), Ok(ExpiryDirective::Day));
    }

    #[test]
    fn test_expires_after_parsing() {
        assert_eq!(ExpiryDirective::resolve(&after("3600")), Ok(ExpiryDirective::After(3600)));
        assert_eq!(ExpiryDirective::resolve(&after("-5")), Ok(ExpiryDirective::After(-5)));
        assert_eq!(ExpiryDirective::resolve(&after("+7")), Ok(ExpiryDirective::After(7)));

        for bad in ["", "1.5", "ten", " 10", "99999999999"] {
            assert_eq!(
                ExpiryDirective::resolve(&after(bad)),
                Err(InvalidExpiry(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_offsets() {
        let created = at(2024, 3, 10);
        assert_eq!(
            ExpiryDirective::Week.expires_at(created),
            Some(at(2024, 3, 17))
        );
        assert_eq!(
            ExpiryDirective::Day.expires_at(created),
            Some(at(2024, 3, 11))
        );
        assert_eq!(
            ExpiryDirective::After(90).expires_at(created),
            Some(created + Duration::seconds(90))
        );
        assert_eq!(
            ExpiryDirective::Month.expires_at(created),
            Some(at(2024, 4, 10))
        );
    }

    #[test]
    fn test_month_clamps_to_end_of_month() {
        assert_eq!(
            ExpiryDirective::Month.expires_at(at(2024, 1, 31)),
            Some(at(2024, 2, 29))
        );
        assert_eq!(
            ExpiryDirective::Month.expires_at(at(2023, 1, 31)),
            Some(at(2023, 2, 28))
        );
    }
}

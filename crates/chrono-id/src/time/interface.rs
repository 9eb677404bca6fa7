use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// A trait for time sources that return the current wall-clock instant.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use chrono_id::time::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> DateTime<Utc> {
///         Utc.with_ymd_and_hms(2023, 5, 20, 10, 30, 0).unwrap()
///     }
/// }
///
/// assert_eq!(FixedTime.now().to_rfc3339(), "2023-05-20T10:30:00+00:00");
/// ```
pub trait TimeSource {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Normalizes an instant to UTC before any precision arithmetic.
///
/// Zone-aware inputs are converted; naive inputs are taken to already be UTC.
/// Every entry point that accepts a time goes through this trait so that the
/// same wall-clock reading always lands in the same bucket.
pub trait IntoUtc {
    /// Converts `self` into a UTC instant.
    fn into_utc(self) -> DateTime<Utc>;
}

impl<Tz: TimeZone> IntoUtc for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoUtc for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        self.and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn aware_input_is_converted() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = plus_two.with_ymd_and_hms(2023, 1, 1, 2, 0, 0).unwrap();
        let utc = local.into_utc();
        assert_eq!(utc, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn naive_input_is_treated_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap();
        assert_eq!(
            naive.into_utc(),
            Utc.with_ymd_and_hms(2023, 1, 1, 12, 30, 45).unwrap()
        );
    }
}

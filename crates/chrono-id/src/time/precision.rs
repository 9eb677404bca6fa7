use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::{Error, FormatError, Result};

/// Reference instant, 2020-01-01T00:00:00Z, as seconds since the Unix epoch.
pub const EPOCH_UNIX_SECS: i64 = 1_577_836_800;

/// Calendar year of the reference instant.
pub const EPOCH_YEAR: i32 = 2020;

const MICROS_PER_SEC: i64 = 1_000_000;

/// The supported time granularities, from coarsest to finest.
///
/// Each level maps a UTC instant to a whole number of units since
/// [`EPOCH_UNIX_SECS`] ([`Precision::forward`]) and maps a unit count back to
/// the instant that starts that unit ([`Precision::inverse`]).
///
/// Calendar levels (year, half-year, quarter, month) count from the
/// (year, month) pair so leap years and month lengths never skew a bucket.
/// Every finer level divides the time elapsed since the reference instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Precision {
    Year = 0,
    HalfYear = 1,
    Quarter = 2,
    Month = 3,
    /// Seven days, anchored to the reference instant (a Wednesday).
    Week = 4,
    Day = 5,
    Hour = 6,
    TenMinute = 7,
    Minute = 8,
    /// Two seconds.
    BinarySecond = 9,
    Second = 10,
    Decisecond = 11,
    Centisecond = 12,
    Millisecond = 13,
    Microsecond = 14,
}

type Forward = fn(&DateTime<Utc>) -> i64;
type Inverse = fn(i64) -> Option<DateTime<Utc>>;

// Indexed by `Precision as usize`.
const FORWARD: [Forward; Precision::COUNT] = [
    |dt| i64::from(dt.year() - EPOCH_YEAR),
    |dt| i64::from(dt.year() - EPOCH_YEAR) * 2 + i64::from(dt.month() > 6),
    |dt| i64::from(dt.year() - EPOCH_YEAR) * 4 + i64::from(dt.month0() / 3),
    |dt| i64::from(dt.year() - EPOCH_YEAR) * 12 + i64::from(dt.month0()),
    |dt| elapsed_secs(dt).div_euclid(604_800),
    |dt| elapsed_secs(dt).div_euclid(86_400),
    |dt| elapsed_secs(dt).div_euclid(3_600),
    |dt| elapsed_secs(dt).div_euclid(600),
    |dt| elapsed_secs(dt).div_euclid(60),
    |dt| elapsed_secs(dt).div_euclid(2),
    elapsed_secs,
    |dt| elapsed_secs(dt) * 10 + subsec_micros(dt) / 100_000,
    |dt| elapsed_secs(dt) * 100 + subsec_micros(dt) / 10_000,
    |dt| elapsed_secs(dt) * 1_000 + subsec_micros(dt) / 1_000,
    |dt| elapsed_secs(dt) * MICROS_PER_SEC + subsec_micros(dt),
];

const INVERSE: [Inverse; Precision::COUNT] = [
    |units| from_elapsed_months(units, 12),
    |units| from_elapsed_months(units, 6),
    |units| from_elapsed_months(units, 3),
    |units| from_elapsed_months(units, 1),
    |units| from_elapsed_secs(units, 604_800),
    |units| from_elapsed_secs(units, 86_400),
    |units| from_elapsed_secs(units, 3_600),
    |units| from_elapsed_secs(units, 600),
    |units| from_elapsed_secs(units, 60),
    |units| from_elapsed_secs(units, 2),
    |units| from_elapsed_secs(units, 1),
    |units| from_elapsed_micros(units, 100_000),
    |units| from_elapsed_micros(units, 10_000),
    |units| from_elapsed_micros(units, 1_000),
    |units| from_elapsed_micros(units, 1),
];

fn elapsed_secs(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp() - EPOCH_UNIX_SECS
}

// Leap seconds surface as nanos >= 1e9; clamp them into the current second.
fn subsec_micros(dt: &DateTime<Utc>) -> i64 {
    i64::from(dt.nanosecond().min(999_999_999) / 1_000)
}

fn from_elapsed_months(units: i64, months_per_unit: i64) -> Option<DateTime<Utc>> {
    let months = units.checked_mul(months_per_unit)?;
    let year = i32::try_from(months.div_euclid(12))
        .ok()?
        .checked_add(EPOCH_YEAR)?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
    Some(
        NaiveDate::from_ymd_opt(year, month, 1)?
            .and_hms_opt(0, 0, 0)?
            .and_utc(),
    )
}

fn from_elapsed_secs(units: i64, secs_per_unit: i64) -> Option<DateTime<Utc>> {
    let secs = units.checked_mul(secs_per_unit)?.checked_add(EPOCH_UNIX_SECS)?;
    DateTime::from_timestamp(secs, 0)
}

fn from_elapsed_micros(units: i64, micros_per_unit: i64) -> Option<DateTime<Utc>> {
    let micros = units
        .checked_mul(micros_per_unit)?
        .checked_add(EPOCH_UNIX_SECS * MICROS_PER_SEC)?;
    DateTime::from_timestamp_micros(micros)
}

impl Precision {
    /// Number of precision levels.
    pub const COUNT: usize = 15;

    /// Every level, coarsest first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Year,
        Self::HalfYear,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::TenMinute,
        Self::Minute,
        Self::BinarySecond,
        Self::Second,
        Self::Decisecond,
        Self::Centisecond,
        Self::Millisecond,
        Self::Microsecond,
    ];

    /// Converts a UTC instant into whole units since the reference instant.
    ///
    /// The result is negative for instants before 2020-01-01T00:00:00Z.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use chrono_id::time::Precision;
    ///
    /// let dt = Utc.with_ymd_and_hms(2023, 5, 20, 10, 30, 0).unwrap();
    /// assert_eq!(Precision::Month.forward(&dt), 3 * 12 + 4);
    /// assert_eq!(Precision::Second.forward(&dt), 106_741_800);
    /// ```
    #[inline]
    #[must_use]
    pub fn forward(self, dt: &DateTime<Utc>) -> i64 {
        FORWARD[self as usize](dt)
    }

    /// Converts a unit count back into the instant that starts that unit.
    ///
    /// Returns `None` only when the instant falls outside the range `chrono`
    /// can represent.
    #[inline]
    #[must_use]
    pub fn inverse(self, units: i64) -> Option<DateTime<Utc>> {
        INVERSE[self as usize](units)
    }

    /// Floors an instant to the start of its unit.
    #[must_use]
    pub fn floor(self, dt: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.inverse(self.forward(dt))
    }

    /// Short symbol used in variant names (`y`, `hy`, `q`, `mo`, ...).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::HalfYear => "hy",
            Self::Quarter => "q",
            Self::Month => "mo",
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::TenMinute => "tm",
            Self::Minute => "m",
            Self::BinarySecond => "bs",
            Self::Second => "s",
            Self::Decisecond => "ds",
            Self::Centisecond => "cs",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
        }
    }

    /// Digits of fractional seconds shown in the ISO-8601 text form.
    #[must_use]
    pub const fn iso_fraction_digits(self) -> usize {
        match self {
            Self::Millisecond => 3,
            Self::Microsecond => 6,
            _ => 0,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                FormatError::Precision {
                    input: s.to_owned(),
                }
                .into()
            })
    }
}

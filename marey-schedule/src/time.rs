use std::convert::TryInto;
use std::fmt;
use std::ops::{Add, Div, Sub};

use serde::{de, ser, Deserialize, Serialize};

/// Signed duration in seconds between two schedule times
/// # Examples
/// ```rust
/// use marey_schedule::time::Duration;
/// assert_eq!(Duration::seconds(600), Duration::minutes(10));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Duration {
    seconds: i32,
}

impl Duration {
    /// Construct a duration of a number of seconds
    pub fn seconds(seconds: i32) -> Duration {
        Duration { seconds }
    }

    /// Construct a duration of a number of minutes
    pub fn minutes(minutes: i32) -> Duration {
        Duration {
            seconds: minutes * 60,
        }
    }

    /// Convert to seconds
    pub fn to_secs(&self) -> i32 {
        self.seconds
    }
}

impl Div<Duration> for Duration {
    type Output = f64;

    /// The ratio between two durations
    #[inline(always)]
    fn div(self, rhs: Duration) -> Self::Output {
        f64::from(self.seconds) / f64::from(rhs.seconds)
    }
}

/// Local time within a service day, no attempt to handle leaps:
/// * parses the `[h]h:mm:ss` strings contained in the timetable files
/// * time can go over 24 hours, so a late evening trip can run on past midnight
/// * second precision
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Time {
    seconds_since_midnight: u32,
}

impl Time {
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Time {
        Time {
            seconds_since_midnight: (hours * 60 + minutes) * 60 + seconds,
        }
    }

    pub const fn from_seconds_since_midnight(seconds_since_midnight: u32) -> Time {
        Time {
            seconds_since_midnight,
        }
    }

    pub const fn seconds_since_midnight(self) -> u32 {
        self.seconds_since_midnight
    }

    /// Display as a wall clock, the hour wraps after midnight so `25:10:00` shows as `01:10:00`
    pub fn clock(self) -> Clock {
        Clock {
            time: self,
            with_seconds: true,
        }
    }

    /// Wall clock display without the seconds, as used for axis labels
    pub fn clock_minutes(self) -> Clock {
        Clock {
            time: self,
            with_seconds: false,
        }
    }

    /// get the clock hour, it can be over 23
    fn hour(self) -> u32 {
        self.seconds_since_midnight / 60 / 60
    }

    /// get the minute of the hour
    fn minute(self) -> u8 {
        ((self.seconds_since_midnight / 60) % 60)
            .try_into()
            .unwrap()
    }

    /// get the seconds within the minute
    fn second(self) -> u8 {
        (self.seconds_since_midnight % 60).try_into().unwrap()
    }
}

impl ser::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> de::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TimeVisitor)
    }
}

struct TimeVisitor;

impl<'de> de::Visitor<'de> for TimeVisitor {
    type Value = Time;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "time formatted eg. \"[h]h:mm:ss\"")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        s.parse().map_err(de::Error::custom)
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    /// Add a duration to a time, never rolls over
    /// # Panics
    /// if the duration is negative enough to roll over to yesterday
    #[inline(always)]
    fn add(self, rhs: Duration) -> Self::Output {
        let time: i64 = self.seconds_since_midnight.into();
        let duration: i64 = rhs.seconds.into();
        Time {
            seconds_since_midnight: (time + duration)
                .try_into()
                .expect("duration not to be negative enough to roll over to yesterday"),
        }
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    /// Subtract two `Time`s, returning the `Duration` between. This assumes
    /// both `Time`s are in the same service day.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Duration::seconds(self.seconds_since_midnight as i32 - rhs.seconds_since_midnight as i32)
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Wall clock rendering of a `Time`, see `Time::clock`
#[derive(Clone, Copy)]
pub struct Clock {
    time: Time,
    with_seconds: bool,
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.time.hour() % 24, self.time.minute())?;
        if self.with_seconds {
            write!(f, ":{:02}", self.time.second())?;
        }
        Ok(())
    }
}

/// A period between 2 Times of the same service day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: Time,
    end: Time,
}

impl Period {
    /// Create a new period between these 2 times
    /// # Panics
    /// if start >= end
    pub fn between(start: Time, end: Time) -> Period {
        assert!(start < end);
        Period { start, end }
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// # String representations
/// ```rust
/// use marey_schedule::time::Time;
/// let time: Time = "0:00:00".parse().unwrap();
/// let time: Time = "09:00:00".parse().unwrap();
/// let time: Time = "23:59:59".parse().unwrap();
/// let time: Time = "25:45:00".parse().unwrap();
/// ```
impl std::str::FromStr for Time {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.as_bytes();
        let (hh, mm, ss) = if s.len() == 8 {
            if s[2] != b':' || s[5] != b':' {
                return Err(TimeParseError::InvalidFormat);
            }
            (&s[0..2], &s[3..5], &s[6..8])
        } else if s.len() == 7 {
            if s[1] != b':' || s[4] != b':' {
                return Err(TimeParseError::InvalidFormat);
            }
            (&s[0..1], &s[2..4], &s[5..7])
        } else {
            return Err(TimeParseError::InvalidFormat);
        };
        use std::str::from_utf8;
        let hours: u32 = from_utf8(hh)?.parse()?;
        let minutes: u32 = from_utf8(mm)?.parse()?;
        let seconds: u32 = from_utf8(ss)?.parse()?;
        if seconds > 59 || minutes > 59 {
            return Err(TimeParseError::TooManySecondsOrMinutes);
        }
        Ok(Time::from_hms(hours, minutes, seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    InvalidFormat,
    TooManySecondsOrMinutes,
    ParseIntError(std::num::ParseIntError),
}

impl From<std::num::ParseIntError> for TimeParseError {
    fn from(err: std::num::ParseIntError) -> TimeParseError {
        TimeParseError::ParseIntError(err)
    }
}

impl From<std::str::Utf8Error> for TimeParseError {
    fn from(_err: std::str::Utf8Error) -> TimeParseError {
        TimeParseError::InvalidFormat
    }
}

impl fmt::Display for TimeParseError {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TimeParseError::*;
        match self {
            InvalidFormat => write!(f, "Time should use format eg. 23:59:59"),
            TooManySecondsOrMinutes => write!(f, "Maximum minutes or seconds is 59"),
            ParseIntError(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TimeParseError {}

#[cfg(test)]
mod test {
    use super::{Duration, Period, Time};
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn hms_times() {
        assert_eq!(Time::from_hms(12, 59, 59), "12:59:59".parse().unwrap());
    }

    #[test]
    fn subtract_times() {
        assert_eq!(
            "12:00:15".parse::<Time>().unwrap() - "12:00:00".parse::<Time>().unwrap(),
            Duration::seconds(15)
        );
        assert_eq!(
            "12:00:00".parse::<Time>().unwrap() - "12:00:15".parse::<Time>().unwrap(),
            Duration::seconds(-15)
        );
        assert_eq!(
            "24:00:15".parse::<Time>().unwrap() - "23:59:45".parse::<Time>().unwrap(),
            Duration::seconds(30)
        );
    }

    #[test]
    fn parse_and_to_string() {
        assert_eq!("00:00:00".parse::<Time>().unwrap().to_string(), "00:00:00");
        assert_eq!("23:59:59".parse::<Time>().unwrap().to_string(), "23:59:59");
        assert_eq!("25:45:00".parse::<Time>().unwrap().to_string(), "25:45:00");
        assert_eq!("5:01:00".parse::<Time>().unwrap().to_string(), "05:01:00");
    }

    #[test]
    fn clock_wraps_after_midnight() {
        let late: Time = "25:10:30".parse().unwrap();
        assert_eq!(late.clock().to_string(), "01:10:30");
        assert_eq!(late.clock_minutes().to_string(), "01:10");
        let early: Time = "05:01:00".parse().unwrap();
        assert_eq!(early.clock().to_string(), "05:01:00");
    }

    #[test]
    fn invalid_parses() {
        assert!("".parse::<Time>().is_err());
        assert!("%%:%%:%%".parse::<Time>().is_err());
        assert!("00:00:0".parse::<Time>().is_err());
        assert!("00:00:000".parse::<Time>().is_err());
        assert!("00:00:60".parse::<Time>().is_err());
        assert!("00:60:00".parse::<Time>().is_err());
        assert!("00100100".parse::<Time>().is_err());
    }

    #[test]
    fn serde_as_string() {
        assert_tokens(&Time::from_hms(7, 5, 9), &[Token::Str("07:05:09")]);
        assert_de_tokens_error::<Time>(
            &[Token::Str("7.05")],
            "Time should use format eg. 23:59:59",
        );
    }

    #[test]
    fn period_of_the_service_day() {
        let period = Period::between(Time::from_hms(5, 0, 0), Time::from_hms(25, 45, 0));
        assert_eq!(period.to_string(), "05:00:00-25:45:00");
        assert_eq!(period.duration(), Duration::minutes(20 * 60 + 45));
    }

    #[test]
    fn duration_ratio() {
        assert_eq!(Duration::seconds(30) / Duration::minutes(2), 0.25);
    }
}

use std::collections::HashMap;

use crate::time::{Duration, Period, Time};

/// Ordinal scale which spreads a list of distinct names evenly over a pixel range, the first name
/// at the start of the range and the last at the end. A single name sits in the middle.
#[derive(Debug, Clone)]
pub struct PointScale {
    names: Vec<String>,
    index: HashMap<String, usize>,
    start: f64,
    end: f64,
}

impl PointScale {
    pub fn new<I, S>(names: I, (start, end): (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        let mut domain = vec![];
        for name in names {
            let name = name.into();
            // later duplicates are ignored, a name has one position
            if !index.contains_key(&name) {
                index.insert(name.clone(), domain.len());
                domain.push(name);
            }
        }
        Self {
            names: domain,
            index,
            start,
            end,
        }
    }

    /// Distance between two neighbouring names
    pub fn step(&self) -> f64 {
        let n = self.names.len();
        (self.end - self.start) / (n.max(2) - 1) as f64
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let i = *self.index.get(name)?;
        if self.names.len() == 1 {
            Some((self.start + self.end) / 2.)
        } else {
            Some(self.start + i as f64 * self.step())
        }
    }

    /// Every name alongside its position, in domain order
    pub fn ticks(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .filter_map(move |name| Some((name.as_str(), self.get(name)?)))
    }
}

/// Linear scale from a period of the service day onto a pixel range
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    domain: Period,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: Period, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn pixels_per_second(&self) -> f64 {
        (self.range.1 - self.range.0) / f64::from(self.domain.duration().to_secs())
    }

    pub fn apply(&self, time: Time) -> f64 {
        let seconds = f64::from((time - self.domain.start()).to_secs());
        self.range.0 + seconds * self.pixels_per_second()
    }

    /// The time at a pixel, rounded down to the second. Pixels outside the range extrapolate,
    /// never earlier than midnight.
    pub fn invert(&self, pixel: f64) -> Time {
        let offset = (pixel - self.range.0) / self.pixels_per_second();
        let seconds = f64::from(self.domain.start().seconds_since_midnight()) + offset;
        // absorb rounding error so a pixel computed from a whole second maps back to it
        Time::from_seconds_since_midnight((seconds + 1e-6).max(0.).floor() as u32)
    }

    /// Times within the domain which are whole multiples of `every` since midnight
    pub fn ticks(&self, every: Duration) -> Vec<Time> {
        let step = every.to_secs().max(1) as u32;
        let start = self.domain.start().seconds_since_midnight();
        let end = self.domain.end().seconds_since_midnight();
        let first = (start + step - 1) / step * step;
        (first..=end)
            .step_by(step as usize)
            .map(Time::from_seconds_since_midnight)
            .collect()
    }
}

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::time::Time;

/// Identifies a trip. The timetable files use both numbers and strings, either is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TripId {
    fn deserialize<D>(deserializer: D) -> Result<TripId, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TripIdVisitor)
    }
}

struct TripIdVisitor;

impl<'de> de::Visitor<'de> for TripIdVisitor {
    type Value = TripId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a trip id as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        Ok(TripId::new(s))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
        Ok(TripId(n.to_string()))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
        Ok(TripId(n.to_string()))
    }
}

/// One scheduled call of a trip at a stop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StopTime {
    pub stop: String,
    pub time: Time,
}

/// The bus lines shown alongside the trains, each drawn in its own colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusLine {
    Vtn69,
    Ret40,
    Ret174,
}

impl BusLine {
    /// In the order the datasets are concatenated
    pub const ALL: [BusLine; 3] = [BusLine::Vtn69, BusLine::Ret40, BusLine::Ret174];

    /// The class given to the SVG elements of this line's trips
    pub fn class(self) -> &'static str {
        match self {
            BusLine::Vtn69 => "vtn69",
            BusLine::Ret40 => "ret40",
            BusLine::Ret174 => "ret174",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripKind {
    Train,
    Bus(BusLine),
}

impl TripKind {
    pub fn class(self) -> Option<&'static str> {
        match self {
            TripKind::Train => None,
            TripKind::Bus(line) => Some(line.class()),
        }
    }
}

/// A trip as it appears in the timetable files, before it is told what kind of vehicle runs it
#[derive(Debug, Deserialize)]
pub struct TripRecord {
    pub trip_id: TripId,
    pub stops: Vec<StopTime>,
}

impl TripRecord {
    pub fn into_trip(self, kind: TripKind) -> Trip {
        Trip {
            trip_id: self.trip_id,
            kind,
            stops: self.stops,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub trip_id: TripId,
    pub kind: TripKind,
    /// Sorted by time
    pub stops: Vec<StopTime>,
}

impl Trip {
    pub fn start(&self) -> Option<Time> {
        self.stops.first().map(|stop| stop.time)
    }

    pub fn end(&self) -> Option<Time> {
        self.stops.last().map(|stop| stop.time)
    }

    pub fn first_stop(&self) -> Option<&str> {
        self.stops.first().map(|stop| stop.stop.as_str())
    }

    /// Whether the vehicle is between its first departure and last arrival, exclusive of both
    pub fn is_active(&self, time: Time) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start < time && time < end,
            _ => false,
        }
    }

    /// Whether the stop times never go backwards
    pub fn is_sorted(&self) -> bool {
        self.stops.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timetable {
    pub trains: Vec<Trip>,
    pub buses: Vec<Trip>,
}

impl Timetable {
    pub fn new(trains: Vec<Trip>, buses: Vec<Trip>) -> Self {
        Self { trains, buses }
    }

    pub fn active_trains(&self, time: Time) -> impl Iterator<Item = &Trip> {
        self.trains.iter().filter(move |trip| trip.is_active(time))
    }

    pub fn active_buses(&self, time: Time) -> impl Iterator<Item = &Trip> {
        self.buses.iter().filter(move |trip| trip.is_active(time))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::trip;

    #[test]
    fn active_is_exclusive_of_both_ends() {
        let trip = trip(
            "1",
            TripKind::Train,
            &[("Delft", "08:00:00"), ("Rijswijk", "08:05:00")],
        );
        assert!(!trip.is_active("07:59:59".parse().unwrap()));
        assert!(!trip.is_active("08:00:00".parse().unwrap()));
        assert!(trip.is_active("08:00:01".parse().unwrap()));
        assert!(trip.is_active("08:04:59".parse().unwrap()));
        assert!(!trip.is_active("08:05:00".parse().unwrap()));
    }

    #[test]
    fn short_trips_are_never_active() {
        let empty = trip("1", TripKind::Train, &[]);
        assert!(!empty.is_active("08:00:00".parse().unwrap()));
        let single = trip("2", TripKind::Train, &[("Delft", "08:00:00")]);
        assert!(!single.is_active("08:00:00".parse().unwrap()));
    }

    #[test]
    fn trip_ids_from_numbers_or_strings() {
        let records: Vec<TripRecord> = serde_json::from_str(
            r#"[
                {"trip_id": 123, "stops": [{"stop": "Delft", "time": "08:00:00"}]},
                {"trip_id": "NS:4", "stops": []}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].trip_id, TripId::new("123"));
        assert_eq!(records[0].stops[0].time, Time::from_hms(8, 0, 0));
        assert_eq!(records[1].trip_id.as_str(), "NS:4");
    }

    #[test]
    fn active_filters_keep_order() {
        let timetable = Timetable::new(
            vec![
                trip("a", TripKind::Train, &[("Delft", "08:00:00"), ("Rijswijk", "08:05:00")]),
                trip("b", TripKind::Train, &[("Delft", "09:00:00"), ("Rijswijk", "09:05:00")]),
                trip("c", TripKind::Train, &[("Delft", "07:58:00"), ("Rijswijk", "08:03:00")]),
            ],
            vec![],
        );
        let active: Vec<_> = timetable
            .active_trains("08:02:00".parse().unwrap())
            .map(|trip| trip.trip_id.as_str())
            .collect();
        assert_eq!(active, vec!["a", "c"]);
    }

    #[test]
    fn detects_unsorted_stops() {
        let sorted = trip("1", TripKind::Bus(BusLine::Ret40), &[("Delft", "08:00:00"), ("Delft - Zuidpoort", "08:00:00")]);
        assert!(sorted.is_sorted());
        let unsorted = trip("2", TripKind::Bus(BusLine::Ret40), &[("Delft", "08:03:00"), ("Delft - Zuidpoort", "08:00:00")]);
        assert!(!unsorted.is_sorted());
    }
}

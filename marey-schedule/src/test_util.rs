//! Builders for tests, here and in crates drawing these timetables.

use crate::timetable::{StopTime, Trip, TripId, TripKind};

/// A trip calling at `stops`, each given as a stop name and a `[h]h:mm:ss` time
pub fn trip(trip_id: &str, kind: TripKind, stops: &[(&str, &str)]) -> Trip {
    Trip {
        trip_id: TripId::new(trip_id),
        kind,
        stops: stops
            .iter()
            .map(|(stop, time)| StopTime {
                stop: stop.to_string(),
                time: time.parse().unwrap(),
            })
            .collect(),
    }
}

use serde::Serialize;

use crate::scale::PointScale;
use crate::time::Time;
use crate::timetable::{StopTime, Trip, TripId, TripKind};

/// Which way a vehicle travels along its axis, decided by where its trip starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Trains starting at Rotterdam are `South`, every other train `North`
    pub fn of_train(trip: &Trip) -> Direction {
        if trip.first_stop() == Some("Rotterdam Central") {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Buses starting at Delft station are `East`, every other bus `West`
    pub fn of_bus(trip: &Trip) -> Direction {
        if trip.first_stop() == Some("Delft") {
            Direction::East
        } else {
            Direction::West
        }
    }

    pub fn of(trip: &Trip) -> Direction {
        match trip.kind {
            TripKind::Train => Direction::of_train(trip),
            TripKind::Bus(_) => Direction::of_bus(trip),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePosition {
    pub trip_id: TripId,
    pub kind: TripKind,
    pub direction: Direction,
    /// Position along the scale the trip was interpolated on
    pub pos: f64,
}

/// The last stop served at or before `time` and the next one after it.
/// None unless `time` falls between the first stop and the final one, exclusive of the final one.
pub fn bracket(stops: &[StopTime], time: Time) -> Option<(&StopTime, &StopTime)> {
    stops
        .windows(2)
        .find(|pair| pair[0].time <= time && time < pair[1].time)
        .map(|pair| (&pair[0], &pair[1]))
}

/// Linear interpolation of a vehicle's position between its bracketing stops.
///
/// The ratio of the time elapsed since the last stop to the time between the two stops is applied
/// to the distance between the stops on `scale`. None if either stop is missing from the scale
/// or the bracket has no duration.
pub fn position(stops: &[StopTime], time: Time, scale: &PointScale) -> Option<f64> {
    let (last, next) = bracket(stops, time)?;
    let span = next.time - last.time;
    if span.to_secs() <= 0 {
        return None;
    }
    let ratio = (time - last.time) / span;
    let last_pos = scale.get(&last.stop)?;
    let next_pos = scale.get(&next.stop)?;
    Some(last_pos + ratio * (next_pos - last_pos))
}

/// Positions of `trips` at `time`, one for each trip. The trips are expected to be active at
/// `time`, see `Timetable::active_trains`.
///
/// Vehicles sharing a position and direction are all kept, each is drawn and highlighted on its
/// own. Trips which can't be placed on `scale`, or whose stop times run backwards, are left out.
pub fn positions<'t>(
    trips: impl IntoIterator<Item = &'t Trip>,
    time: Time,
    scale: &PointScale,
) -> Vec<VehiclePosition> {
    trips
        .into_iter()
        .filter(|trip| trip.is_sorted())
        .filter_map(|trip| {
            let pos = position(&trip.stops, time, scale)?;
            Some(VehiclePosition {
                trip_id: trip.trip_id.clone(),
                kind: trip.kind,
                direction: Direction::of(trip),
                pos,
            })
        })
        .collect()
}

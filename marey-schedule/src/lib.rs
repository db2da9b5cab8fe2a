//! Timetable model for the linked Marey diagram and map: schedule times, trips, the scales
//! which place them on screen, and the two pieces of live logic - interpolating where a vehicle
//! is at a given time, and turning a pointer position into that time.

pub mod cursor;
pub mod interpolate;
pub mod scale;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
pub mod time;
pub mod timetable;

pub use cursor::{CursorPosition, Snapshot, TimeCursor};
pub use interpolate::{Direction, VehiclePosition};
pub use scale::{PointScale, TimeScale};
pub use time::{Duration, Period, Time};
pub use timetable::{BusLine, StopTime, Timetable, Trip, TripId, TripKind};

use serde::Serialize;

use crate::interpolate::{positions, VehiclePosition};
use crate::scale::{PointScale, TimeScale};
use crate::time::Time;
use crate::timetable::Timetable;

/// The shared time cursor, a horizontal line across the diagram which follows the pointer.
///
/// The cursor can't be moved above `floor`, the pixel of the time it starts at.
#[derive(Debug, Clone, Copy)]
pub struct TimeCursor {
    scale: TimeScale,
    initial: Time,
    floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorPosition {
    pub y: f64,
    pub time: Time,
}

impl CursorPosition {
    /// The text shown next to the cursor line
    pub fn label(&self) -> String {
        self.time.clock().to_string()
    }
}

impl TimeCursor {
    pub fn new(scale: TimeScale, initial: Time) -> Self {
        Self {
            scale,
            initial,
            floor: scale.apply(initial),
        }
    }

    pub fn initial(&self) -> CursorPosition {
        CursorPosition {
            y: self.floor,
            time: self.initial,
        }
    }

    /// Move the cursor to a pointer's vertical offset within the diagram. The cursor stays
    /// between its initial position and the bottom of the diagram.
    pub fn seek(&self, y: f64) -> CursorPosition {
        if !y.is_finite() || y <= self.floor {
            return self.initial();
        }
        let y = y.min(self.scale.range().1);
        CursorPosition {
            y,
            time: self.scale.invert(y),
        }
    }

    /// The cursor placed at a time rather than a pointer, eg. when a view is asked for a time directly
    pub fn at(&self, time: Time) -> CursorPosition {
        CursorPosition {
            y: self.scale.apply(time),
            time,
        }
    }
}

/// Everything both views need for one cursor position: where the cursor is and where every
/// vehicle is at that time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cursor: CursorPosition,
    pub trains: Vec<VehiclePosition>,
    pub buses: Vec<VehiclePosition>,
}

impl Snapshot {
    /// Interpolates every trip active at the cursor's time, trains on `train_scale` and buses on
    /// `bus_scale`
    pub fn take(
        timetable: &Timetable,
        cursor: CursorPosition,
        train_scale: &PointScale,
        bus_scale: &PointScale,
    ) -> Self {
        Self {
            cursor,
            trains: positions(timetable.active_trains(cursor.time), cursor.time, train_scale),
            buses: positions(timetable.active_buses(cursor.time), cursor.time, bus_scale),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::time::Period;
    use crate::test_util::trip;
    use crate::timetable::{BusLine, TripKind};

    fn cursor() -> TimeCursor {
        // one pixel per second
        let scale = TimeScale::new(
            Period::between(Time::from_hms(5, 0, 0), Time::from_hms(6, 0, 0)),
            (0., 3600.),
        );
        TimeCursor::new(scale, Time::from_hms(5, 1, 0))
    }

    #[test]
    fn cursor_follows_pointer() {
        let position = cursor().seek(600.);
        assert_eq!(position.y, 600.);
        assert_eq!(position.time, Time::from_hms(5, 10, 0));
        assert_eq!(position.label(), "05:10:00");
    }

    #[test]
    fn cursor_stops_at_its_initial_time() {
        let cursor = cursor();
        assert_eq!(cursor.initial().y, 60.);
        let position = cursor.seek(10.);
        assert_eq!(position.y, 60.);
        assert_eq!(position.time, Time::from_hms(5, 1, 0));
        assert_eq!(cursor.seek(f64::NAN), cursor.initial());
        assert_eq!(cursor.seek(f64::INFINITY), cursor.initial());
        assert_eq!(cursor.seek(f64::NEG_INFINITY), cursor.initial());
    }

    #[test]
    fn cursor_stops_at_the_bottom() {
        let position = cursor().seek(1_000_000.);
        assert_eq!(position.y, 3600.);
        assert_eq!(position.time, Time::from_hms(6, 0, 0));
        assert_eq!(position.label(), "06:00:00");
    }

    #[test]
    fn cursor_at_a_time() {
        let position = cursor().at(Time::from_hms(5, 30, 0));
        assert_eq!(position.y, 1800.);
        assert_eq!(cursor().seek(position.y), position);
    }

    #[test]
    fn snapshot_feeds_both_axes() {
        let timetable = Timetable::new(
            vec![
                trip("t", TripKind::Train, &[("A", "05:05:00"), ("B", "05:15:00")]),
                trip("later", TripKind::Train, &[("A", "05:30:00"), ("B", "05:40:00")]),
            ],
            vec![trip("b", TripKind::Bus(BusLine::Ret174), &[("X", "05:00:00"), ("Y", "05:20:00")])],
        );
        let trains = PointScale::new(vec!["A", "B"], (0., 100.));
        let buses = PointScale::new(vec!["X", "Y"], (0., 200.));
        let snapshot = Snapshot::take(&timetable, cursor().seek(600.), &trains, &buses);
        assert_eq!(snapshot.trains.len(), 1);
        assert_eq!(snapshot.trains[0].pos, 50.);
        assert_eq!(snapshot.buses.len(), 1);
        assert_eq!(snapshot.buses[0].pos, 100.);
    }
}

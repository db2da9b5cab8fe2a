//! The diagram and the map, linked by one time cursor.

use std::io;

use marey_schedule::cursor::{CursorPosition, Snapshot};
use marey_schedule::interpolate::VehiclePosition;
use marey_schedule::time::Time;
use marey_schedule::timetable::Timetable;
use serde::Serialize;
use tracing::debug;

use crate::config::Layout;
use crate::draw::map::MapView;
use crate::draw::marey::MareyDiagram;
use crate::draw::page;

pub struct LinkedViews {
    timetable: Timetable,
    marey: MareyDiagram,
    map: MapView,
}

/// What the page needs to follow the pointer: where to put the timeline, what it reads, and the
/// vehicles to show on the map
#[derive(Debug, Serialize)]
pub struct CursorUpdate {
    pub y: f64,
    pub time: Time,
    pub label: String,
    pub trains: Vec<VehiclePosition>,
    pub buses: Vec<VehiclePosition>,
    pub trains_svg: String,
    pub buses_svg: String,
}

impl LinkedViews {
    pub fn new(timetable: Timetable, layout: &Layout) -> Self {
        Self {
            timetable,
            marey: MareyDiagram::new(layout.marey_width),
            map: MapView::new(layout.map_width, layout.marey_width),
        }
    }

    /// Moves the cursor to the pointer's height on the diagram and works out the map for its time
    pub fn seek(&self, y: f64) -> io::Result<CursorUpdate> {
        let cursor = self.marey.cursor().seek(y);
        let snapshot = self.map.snapshot(&self.timetable, cursor);
        debug!(
            "Cursor at {} shows {} trains and {} buses",
            cursor.time,
            snapshot.trains.len(),
            snapshot.buses.len()
        );
        Ok(CursorUpdate {
            y: cursor.y,
            time: cursor.time,
            label: cursor.label(),
            trains_svg: self.map.trains_svg(&snapshot.trains)?,
            buses_svg: self.map.buses_svg(&snapshot.buses)?,
            trains: snapshot.trains,
            buses: snapshot.buses,
        })
    }

    /// Where a time is on the diagram
    pub fn cursor_at(&self, time: Time) -> CursorPosition {
        self.marey.cursor().at(time)
    }

    /// The map at a time, with the cursor where that time is on the diagram
    pub fn snapshot_at(&self, time: Time) -> Snapshot {
        self.map.snapshot(&self.timetable, self.cursor_at(time))
    }

    pub fn write_page_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        page::write_page_to(w, &self.marey, &self.map, &self.timetable)
    }

    pub fn write_marey_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        self.marey.write_svg_to(w, &self.timetable)
    }

    pub fn write_map_to(&self, w: &mut dyn io::Write, time: Time) -> io::Result<()> {
        self.map.write_svg_to(w, &self.snapshot_at(time))
    }
}

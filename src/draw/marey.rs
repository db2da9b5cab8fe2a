use std::io;

use marey_schedule::cursor::{CursorPosition, TimeCursor};
use marey_schedule::scale::{PointScale, TimeScale};
use marey_schedule::time::{Duration, Period, Time};
use marey_schedule::timetable::{Timetable, Trip};

use super::geometry::*;
use super::DEFAULT_CIRCLE_RADIUS;
use crate::network::{self, Side};
use crate::write_xml;

const MAREY_HEIGHT: f64 = 15000.;
const YAXIS_MINUTES_INTERVAL: i32 = 10;
const START_TIME: Time = Time::from_seconds_since_midnight(5 * 60 * 60);
const END_TIME: Time = Time::from_seconds_since_midnight((25 * 60 + 45) * 60);
/// Where the cursor starts, it can't be moved above this
pub const DEFAULT_TIMELINE_TIME: Time = Time::from_seconds_since_midnight((5 * 60 + 1) * 60);
const TICK_SIZE: f64 = 6.;

/// Stop columns across, time downwards
pub struct MareyGeometry {
    x: PointScale,
    y: TimeScale,
}

impl Geometry for MareyGeometry {
    /// A stop column key and a time
    type Coords = (String, Time);

    fn coords(&self, (column, time): &Self::Coords) -> Option<(Pixels, Pixels)> {
        let x = self.x.get(column)?;
        Some((Pixels::new(x), Pixels::new(self.y.apply(*time))))
    }
}

/// The space-time diagram, every trip a line from stop to stop down the service day
pub struct MareyDiagram {
    frame: Frame,
    geometry: MareyGeometry,
    cursor: TimeCursor,
}

impl MareyDiagram {
    pub fn new(marey_width: f64) -> Self {
        let frame = Frame {
            outer_width: marey_width,
            outer_height: MAREY_HEIGHT,
            margin: Margin {
                top: 120.,
                right: 40.,
                bottom: 20.,
                left: 40.,
            },
        };
        let x = PointScale::new(network::marey_columns(), (0., frame.width()));
        let y = TimeScale::new(
            Period::between(START_TIME, END_TIME),
            (0., frame.height()),
        );
        Self {
            frame,
            geometry: MareyGeometry { x, y },
            cursor: TimeCursor::new(y, DEFAULT_TIMELINE_TIME),
        }
    }

    pub fn cursor(&self) -> &TimeCursor {
        &self.cursor
    }

    pub fn write_svg_to(&self, w: &mut dyn io::Write, timetable: &Timetable) -> io::Result<()> {
        let Self { frame, .. } = self;
        write_xml!(w,
            <svg id="marey" xmlns="http://www.w3.org/2000/svg" width={frame.outer_width} height={frame.outer_height}>
            <style>{include_str!("Marey.css")}</style>
            <g transform={frame.inner()}>
        )?;

        // 10px either side so the circles on the outer columns are seen in full
        write_xml!(w,
            <defs><clipPath id="clip">
                <rect x="-10" width={frame.width() + 20.} height={frame.height()} />
            </clipPath></defs>
        )?;

        self.write_x_axis_to(w)?;
        self.write_y_axis_to(w, AxisSide::Left)?;
        self.write_y_axis_to(w, AxisSide::Right)?;
        self.write_timeline_to(w, &self.cursor.initial())?;

        write_xml!(w, <rect id="overlay" width={frame.width()} height={frame.height()} />)?;

        write_xml!(w, <g class="trip train" clip-path="url(#clip)">)?;
        for trip in &timetable.trains {
            self.write_train_to(w, trip)?;
        }
        write_xml!(w, </g>)?;

        write_xml!(w, <g class="trip bus" clip-path="url(#clip)">)?;
        for trip in &timetable.buses {
            self.write_bus_to(w, trip)?;
        }
        write_xml!(w, </g>)?;

        write_xml!(w, </g></svg>)
    }

    /// The horizontal line marking the cursor, with the time it is at
    pub fn write_timeline_to(
        &self,
        w: &mut dyn io::Write,
        cursor: &CursorPosition,
    ) -> io::Result<()> {
        write_xml!(w,
            <g class="timeline" transform={Translate(Pixels::new(0.), Pixels::new(cursor.y))}>
                <line class="timeline" x1="0" x2={self.frame.width()} />
                <text x="5" y="-5">{cursor.label()}</text>
            </g>
        )
    }

    /// Stop names along the top, each with a line down the whole diagram
    fn write_x_axis_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        let height = Pixels::new(self.frame.height());
        write_xml!(w,
            <g class="x axis">
                <path class="domain" d={format!("M0,{}V0H{}V{}", height, Pixels::new(self.frame.width()), height)} />
        )?;
        for (column, x) in self.geometry.x.ticks() {
            write_xml!(w,
                <g class="tick" transform={Translate(Pixels::new(x), Pixels::new(0.))}>
                    <line y2={height} />
                    <text x="9" y="0" dy=".35em" transform="rotate(-90)">{network::real_stop_name(column)}</text>
                </g>
            )?;
        }
        write_xml!(w, </g>)
    }

    fn write_y_axis_to(&self, w: &mut dyn io::Write, side: AxisSide) -> io::Result<()> {
        let (class, offset, direction, anchor) = match side {
            AxisSide::Left => ("y left axis", 0., -1., "end"),
            AxisSide::Right => ("y right axis", self.frame.width(), 1., "start"),
        };
        let tick = Pixels::new(direction * TICK_SIZE);
        write_xml!(w,
            <g class={class} transform={Translate(Pixels::new(offset), Pixels::new(0.))}>
                <path class="domain" d={format!("M{},0H0V{}H{}", tick, Pixels::new(self.frame.height()), tick)} />
        )?;
        for time in self
            .geometry
            .y
            .ticks(Duration::minutes(YAXIS_MINUTES_INTERVAL))
        {
            write_xml!(w,
                <g class="tick" transform={Translate(Pixels::new(0.), Pixels::new(self.geometry.y.apply(time)))}>
                    <line x2={tick} />
                    <text x={Pixels::new(direction * (TICK_SIZE + 3.))} dy=".32em" text-anchor={anchor}>{time.clock_minutes()}</text>
                </g>
            )?;
        }
        write_xml!(w, </g>)
    }

    /// A train is drawn twice, the part of its trip among the left columns and the part among
    /// the right columns
    fn write_train_to(&self, w: &mut dyn io::Write, trip: &Trip) -> io::Result<()> {
        let on_side = |side: Side| -> Vec<(String, Time)> {
            trip.stops
                .iter()
                .filter(|stop| side.contains(&stop.stop))
                .map(|stop| (network::on_side(&stop.stop, side), stop.time))
                .collect()
        };
        self.write_trip_to(w, trip, on_side(Side::A), on_side(Side::B))
    }

    /// A bus is drawn on both sides of the centre column, its whole trip each time
    fn write_bus_to(&self, w: &mut dyn io::Write, trip: &Trip) -> io::Result<()> {
        let on_side = |side: Side| -> Vec<(String, Time)> {
            trip.stops
                .iter()
                .map(|stop| (network::deduplicated_bus_stop(&stop.stop, side), stop.time))
                .collect()
        };
        self.write_trip_to(w, trip, on_side(Side::A), on_side(Side::B))
    }

    fn write_trip_to(
        &self,
        w: &mut dyn io::Write,
        trip: &Trip,
        left: Vec<(String, Time)>,
        right: Vec<(String, Time)>,
    ) -> io::Result<()> {
        let trip_id = trip.trip_id.as_str();
        let class = trip.kind.class();
        let stops: Vec<(String, Time)> = left.iter().chain(right.iter()).cloned().collect();

        write_xml!(w, <g>)?;
        for points in vec![left, right] {
            let mut path = Path::through(trip_id.to_owned(), points);
            path.set_class(class);
            path.write_svg_fragment_to(w, &self.geometry)?;
        }
        for stop in &stops {
            let (x, y) = match self.geometry.coords(stop) {
                Some(xy) => xy,
                None => continue,
            };
            match class {
                Some(class) => write_xml!(w,
                    <circle class={class} transform={Translate(x, y)} r={DEFAULT_CIRCLE_RADIUS} data-trip-id={trip_id} />)?,
                None => write_xml!(w,
                    <circle transform={Translate(x, y)} r={DEFAULT_CIRCLE_RADIUS} data-trip-id={trip_id} />)?,
            }
        }
        write_xml!(w, </g>)
    }
}

#[derive(Clone, Copy)]
enum AxisSide {
    Left,
    Right,
}

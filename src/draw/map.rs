use std::io;

use marey_schedule::cursor::{CursorPosition, Snapshot};
use marey_schedule::interpolate::{Direction, VehiclePosition};
use marey_schedule::scale::PointScale;
use marey_schedule::timetable::Timetable;

use super::geometry::*;
use super::DEFAULT_CIRCLE_RADIUS;
use crate::network::{INTERCHANGE, MAP_BUS_STOPS, MAP_TRAIN_STOPS};
use crate::write_xml;

/// How far a vehicle is drawn from its axis, to one side or the other depending on its direction
const TRIPS_SPACING: f64 = 6.;

/// Places a vehicle beside the axis it runs on
pub struct MapGeometry {
    bus_axis_y: f64,
}

impl Geometry for MapGeometry {
    type Coords = VehiclePosition;

    fn coords(&self, vehicle: &VehiclePosition) -> Option<(Pixels, Pixels)> {
        let (x, y) = match vehicle.direction {
            Direction::North => (TRIPS_SPACING, vehicle.pos),
            Direction::South => (-TRIPS_SPACING, vehicle.pos),
            Direction::West => (vehicle.pos, self.bus_axis_y - TRIPS_SPACING),
            Direction::East => (vehicle.pos, self.bus_axis_y + TRIPS_SPACING),
        };
        if x.is_finite() && y.is_finite() {
            Some((Pixels::new(x), Pixels::new(y)))
        } else {
            None
        }
    }
}

/// Schematic map of the two lines: the train line down the left edge and the bus line crossing it
/// at the interchange. Shows where every vehicle is at one time.
pub struct MapView {
    frame: Frame,
    /// Horizontal offset of the map on the page, it sits to the right of the diagram
    left: f64,
    bus_scale: PointScale,
    train_scale: PointScale,
    geometry: MapGeometry,
}

impl MapView {
    pub fn new(map_width: f64, marey_width: f64) -> Self {
        let frame = Frame {
            outer_width: map_width,
            outer_height: map_width,
            margin: Margin {
                top: 120.,
                right: 20.,
                bottom: 20.,
                left: 120.,
            },
        };
        let bus_scale = PointScale::new(MAP_BUS_STOPS.iter().copied(), (0., frame.width()));
        let train_scale = PointScale::new(MAP_TRAIN_STOPS.iter().copied(), (0., frame.height()));
        let bus_axis_y = train_scale.get(INTERCHANGE).unwrap_or(0.);
        Self {
            frame,
            left: marey_width,
            bus_scale,
            train_scale,
            geometry: MapGeometry { bus_axis_y },
        }
    }

    /// Vertical position of the bus axis, level with the interchange on the train axis
    pub fn bus_axis_y(&self) -> f64 {
        self.geometry.bus_axis_y
    }

    /// Where every active vehicle is at the cursor's time, on this map's axes
    pub fn snapshot(&self, timetable: &Timetable, cursor: CursorPosition) -> Snapshot {
        Snapshot::take(timetable, cursor, &self.train_scale, &self.bus_scale)
    }

    pub fn write_svg_to(&self, w: &mut dyn io::Write, snapshot: &Snapshot) -> io::Result<()> {
        let Self { frame, .. } = self;
        let style = format!(
            "margin-top: -{}px; left: {}px",
            Pixels::new(frame.outer_height / 2.),
            Pixels::new(self.left)
        );
        write_xml!(w,
            <svg id="map" xmlns="http://www.w3.org/2000/svg" style={style} width={frame.outer_width} height={frame.outer_height}>
            <style>{include_str!("Map.css")}</style>
            <g transform={frame.inner()}>
        )?;

        self.write_bus_axis_to(w)?;
        self.write_train_axis_to(w)?;

        write_xml!(w, <g class="trains">)?;
        self.write_trains_to(w, &snapshot.trains)?;
        write_xml!(w, </g>)?;

        write_xml!(w, <g class="buses">)?;
        self.write_buses_to(w, &snapshot.buses)?;
        write_xml!(w, </g>)?;

        write_xml!(w, </g></svg>)
    }

    /// The contents of the trains group, a circle for each train
    pub fn write_trains_to(
        &self,
        w: &mut dyn io::Write,
        trains: &[VehiclePosition],
    ) -> io::Result<()> {
        for train in trains {
            if let Some((cx, cy)) = self.geometry.coords(train) {
                write_xml!(w,
                    <circle r={DEFAULT_CIRCLE_RADIUS} data-trip-id={&train.trip_id} cx={cx} cy={cy} />
                )?;
            }
        }
        Ok(())
    }

    /// The contents of the buses group, a circle for each bus classed by its line
    pub fn write_buses_to(&self, w: &mut dyn io::Write, buses: &[VehiclePosition]) -> io::Result<()> {
        for bus in buses {
            let (cx, cy) = match self.geometry.coords(bus) {
                Some(xy) => xy,
                None => continue,
            };
            match bus.kind.class() {
                Some(class) => write_xml!(w,
                    <circle r={DEFAULT_CIRCLE_RADIUS} data-trip-id={&bus.trip_id} class={class} cx={cx} cy={cy} />
                )?,
                None => write_xml!(w,
                    <circle r={DEFAULT_CIRCLE_RADIUS} data-trip-id={&bus.trip_id} cx={cx} cy={cy} />
                )?,
            }
        }
        Ok(())
    }

    pub fn trains_svg(&self, trains: &[VehiclePosition]) -> io::Result<String> {
        let mut out = vec![];
        self.write_trains_to(&mut out, trains)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn buses_svg(&self, buses: &[VehiclePosition]) -> io::Result<String> {
        let mut out = vec![];
        self.write_buses_to(&mut out, buses)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Bus stops along a line level with the interchange, a circle at each
    fn write_bus_axis_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_xml!(w,
            <g class="bus axis" transform={Translate(Pixels::new(0.), Pixels::new(self.bus_axis_y()))}>
            <path class="domain" d={format!("M0,0H{}", Pixels::new(self.frame.width()))} />
        )?;
        for (stop, x) in self.bus_scale.ticks() {
            write_xml!(w,
                <g class="tick" transform={Translate(Pixels::new(x), Pixels::new(0.))}>
                    <circle r={DEFAULT_CIRCLE_RADIUS} />
                    <text x="9" y="0" dy=".35em" transform="rotate(-90)">{stop}</text>
                </g>
            )?;
        }
        write_xml!(w, </g>)
    }

    /// Train stations down the left edge, a circle at each
    fn write_train_axis_to(&self, w: &mut dyn io::Write) -> io::Result<()> {
        write_xml!(w,
            <g class="train axis">
            <path class="domain" d={format!("M0,0V{}", Pixels::new(self.frame.height()))} />
        )?;
        for (stop, y) in self.train_scale.ticks() {
            write_xml!(w,
                <g class="tick" transform={Translate(Pixels::new(0.), Pixels::new(y))}>
                    <circle r={DEFAULT_CIRCLE_RADIUS} />
                    <text x="-15" dy=".32em" text-anchor="end">{stop}</text>
                </g>
            )?;
        }
        write_xml!(w, </g>)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use marey_schedule::time::Time;
    use marey_schedule::timetable::{BusLine, TripId, TripKind};

    fn vehicle(trip_id: &str, kind: TripKind, direction: Direction, pos: f64) -> VehiclePosition {
        VehiclePosition {
            trip_id: TripId::new(trip_id),
            kind,
            direction,
            pos,
        }
    }

    fn snapshot(trains: Vec<VehiclePosition>, buses: Vec<VehiclePosition>) -> Snapshot {
        Snapshot {
            cursor: CursorPosition {
                y: 0.,
                time: Time::from_hms(8, 0, 0),
            },
            trains,
            buses,
        }
    }

    #[test]
    fn layout_from_width() {
        let map = MapView::new(480., 940.);
        assert_eq!(map.frame.width(), 340.);
        assert_eq!(map.frame.height(), 340.);
        // Delft is the fifth of eight stations
        assert!((map.bus_axis_y() - 340. * 4. / 7.).abs() < 1e-9);
        assert_eq!(map.bus_scale.get("Delft"), Some(0.));
        assert_eq!(map.bus_scale.get("Delft - Technopolis"), Some(340.));
    }

    #[test]
    fn trains_either_side_of_their_axis() {
        let map = MapView::new(480., 940.);
        let svg = map
            .trains_svg(&[
                vehicle("up", TripKind::Train, Direction::North, 100.),
                vehicle("down", TripKind::Train, Direction::South, 120.),
            ])
            .unwrap();
        assert_eq!(
            svg,
            "<circle r=\"3\" data-trip-id=\"up\" cx=\"6.0\" cy=\"100.0\" />\n\
             <circle r=\"3\" data-trip-id=\"down\" cx=\"-6.0\" cy=\"120.0\" />\n"
        );
    }

    #[test]
    fn buses_either_side_of_their_axis() {
        let map = MapView::new(480., 940.);
        let axis = map.bus_axis_y();
        let svg = map
            .buses_svg(&[
                vehicle("out", TripKind::Bus(BusLine::Ret40), Direction::East, 50.),
                vehicle("back", TripKind::Bus(BusLine::Vtn69), Direction::West, 70.),
            ])
            .unwrap();
        assert!(svg.contains(&format!(
            "data-trip-id=\"out\" class=\"ret40\" cx=\"50.0\" cy=\"{}\"",
            Pixels::new(axis + 6.)
        )));
        assert!(svg.contains(&format!(
            "data-trip-id=\"back\" class=\"vtn69\" cx=\"70.0\" cy=\"{}\"",
            Pixels::new(axis - 6.)
        )));
    }

    #[test]
    fn vehicles_off_the_map_are_not_drawn() {
        let map = MapView::new(480., 940.);
        let svg = map
            .trains_svg(&[vehicle("lost", TripKind::Train, Direction::North, f64::NAN)])
            .unwrap();
        assert_eq!(svg, "");
    }

    #[test]
    fn whole_map() {
        let map = MapView::new(480., 940.);
        let mut out = vec![];
        map.write_svg_to(
            &mut out,
            &snapshot(vec![vehicle("up", TripKind::Train, Direction::North, 100.)], vec![]),
        )
        .unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.starts_with(
            "<svg id=\"map\" xmlns=\"http://www.w3.org/2000/svg\" style=\"margin-top: -240.0px; left: 940.0px\""
        ));
        assert!(svg.contains("<g class=\"trains\">\n<circle r=\"3\" data-trip-id=\"up\""));
        assert!(svg.contains(">Delft - TU S&amp;C</text>"));
        assert_eq!(svg.matches(">Rotterdam Central</text>").count(), 1);
        // a tick circle for every stop on both axes, and the one train
        assert_eq!(svg.matches("<circle").count(), 9 + 8 + 1);
    }
}

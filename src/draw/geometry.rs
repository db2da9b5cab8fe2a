use std::{fmt, io, ops};

use crate::write_xml;

/// Maps a view's own coordinates, such as a stop and a time, onto the drawing surface
pub trait Geometry {
    type Coords;

    /// None when the coordinates fall outside the geometry, eg. a stop without a column
    fn coords(&self, coords: &Self::Coords) -> Option<(Pixels, Pixels)>;
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Pixels(f64);

impl Pixels {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }
}

impl ops::Add for Pixels {
    type Output = Pixels;

    fn add(self, rhs: Self) -> Self::Output {
        Pixels(self.0 + rhs.0)
    }
}

impl ops::Sub for Pixels {
    type Output = Pixels;

    fn sub(self, rhs: Self) -> Self::Output {
        Pixels(self.0 - rhs.0)
    }
}

impl ops::Neg for Pixels {
    type Output = Pixels;

    fn neg(self) -> Self::Output {
        Pixels(-self.0)
    }
}

impl ops::Deref for Pixels {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// `transform` attribute value moving an element by x and y
pub struct Translate(pub Pixels, pub Pixels);

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{})", self.0, self.1)
    }
}

/// Space kept clear around a chart for its axes and labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The outer size of an svg and the margin inside it, charts draw within the inner area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub outer_width: f64,
    pub outer_height: f64,
    pub margin: Margin,
}

impl Frame {
    pub fn width(&self) -> f64 {
        self.outer_width - self.margin.left - self.margin.right
    }

    pub fn height(&self) -> f64 {
        self.outer_height - self.margin.top - self.margin.bottom
    }

    /// Moves the chart group inside the margin
    pub fn inner(&self) -> Translate {
        Translate(Pixels(self.margin.left), Pixels(self.margin.top))
    }
}

pub struct Path<G: Geometry> {
    pub class: Option<&'static str>,
    pub trip_id: String,
    pub ops: Vec<PathTo<G>>,
}

pub enum PathTo<G: Geometry> {
    Move(G::Coords),
    Line(G::Coords),
}

impl<G: Geometry> Path<G> {
    pub fn begin_path(trip_id: String) -> Self {
        Self {
            class: None,
            trip_id,
            ops: vec![],
        }
    }

    pub fn set_class(&mut self, class: Option<&'static str>) {
        self.class = class;
    }

    pub fn move_to(&mut self, coords: G::Coords) {
        self.ops.push(PathTo::Move(coords));
    }

    pub fn line_to(&mut self, coords: G::Coords) {
        self.ops.push(PathTo::Line(coords));
    }

    /// Joins all the points with straight lines
    pub fn through(trip_id: String, points: impl IntoIterator<Item = G::Coords>) -> Self {
        let mut path = Self::begin_path(trip_id);
        for coords in points {
            if path.ops.is_empty() {
                path.move_to(coords);
            } else {
                path.line_to(coords);
            }
        }
        path
    }

    pub fn write_svg_fragment_to(&self, w: &mut dyn io::Write, geometry: &G) -> io::Result<()> {
        if self.ops.is_empty() {
            return Ok(());
        }
        let d = DisplayInGeometry {
            ops: &self.ops,
            geometry,
        };
        match self.class {
            Some(class) => write_xml!(w, <path class={class} data-trip-id={&self.trip_id} d={d} />),
            None => write_xml!(w, <path data-trip-id={&self.trip_id} d={d} />),
        }
    }
}

struct DisplayInGeometry<'p, G: Geometry> {
    ops: &'p [PathTo<G>],
    geometry: &'p G,
}

impl<G: Geometry> fmt::Display for DisplayInGeometry<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // points outside the geometry are skipped, the next point starts the line again
        let mut pen_down = false;
        for op in self.ops {
            let (coords, is_move) = match op {
                PathTo::Move(coords) => (coords, true),
                PathTo::Line(coords) => (coords, false),
            };
            let (x, y) = match self.geometry.coords(coords) {
                Some(xy) => xy,
                None => {
                    pen_down = false;
                    continue;
                }
            };
            if is_move || !pen_down {
                write!(f, "M{},{}", x, y)?;
            } else {
                write!(f, "L{},{}", x, y)?;
            }
            pen_down = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// x is the number itself, negative numbers are off the chart
    struct Line;

    impl Geometry for Line {
        type Coords = (f64, f64);

        fn coords(&self, &(x, y): &Self::Coords) -> Option<(Pixels, Pixels)> {
            if x < 0. {
                None
            } else {
                Some((Pixels(x), Pixels(y)))
            }
        }
    }

    fn svg(path: &Path<Line>) -> String {
        let mut out = vec![];
        path.write_svg_fragment_to(&mut out, &Line).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn straight_lines_through_points() {
        let path = Path::through("7".to_owned(), vec![(0., 0.), (10., 5.), (20., 7.5)]);
        assert_eq!(
            svg(&path),
            "<path data-trip-id=\"7\" d=\"M0.0,0.0L10.0,5.0L20.0,7.5\" />\n"
        );
    }

    #[test]
    fn skips_points_off_the_geometry() {
        let mut path = Path::through("7".to_owned(), vec![(-1., 0.), (10., 5.), (20., 7.)]);
        path.set_class(Some("ret40"));
        assert_eq!(
            svg(&path),
            "<path class=\"ret40\" data-trip-id=\"7\" d=\"M10.0,5.0L20.0,7.0\" />\n"
        );
    }

    #[test]
    fn line_breaks_at_a_point_off_the_geometry() {
        let path = Path::through("7".to_owned(), vec![(0., 0.), (-1., 3.), (20., 7.), (30., 9.)]);
        assert_eq!(
            svg(&path),
            "<path data-trip-id=\"7\" d=\"M0.0,0.0M20.0,7.0L30.0,9.0\" />\n"
        );
    }

    #[test]
    fn empty_paths_are_not_drawn() {
        let path: Path<Line> = Path::through("7".to_owned(), vec![]);
        assert_eq!(svg(&path), "");
    }

    #[test]
    fn frame_inside_margin() {
        let frame = Frame {
            outer_width: 940.,
            outer_height: 15000.,
            margin: Margin {
                top: 120.,
                right: 40.,
                bottom: 20.,
                left: 40.,
            },
        };
        assert_eq!(frame.width(), 860.);
        assert_eq!(frame.height(), 14860.);
        assert_eq!(frame.inner().to_string(), "translate(40.0,120.0)");
    }
}

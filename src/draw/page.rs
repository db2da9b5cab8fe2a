use std::io;

use marey_schedule::timetable::Timetable;

use super::map::MapView;
use super::marey::MareyDiagram;
use super::{
    AUGMENTED_CIRCLE_RADIUS, AUGMENTED_TRIPPATH_THICKNESS, DEFAULT_CIRCLE_RADIUS,
    DEFAULT_TRIPPATH_THICKNESS,
};
use crate::write_xml;

/// The html page with the diagram on the left and the map beside it, starting at the diagram's
/// initial cursor. Script and style are written as they are, html doesn't decode entities in them.
pub fn write_page_to(
    w: &mut dyn io::Write,
    marey: &MareyDiagram,
    map: &MapView,
    timetable: &Timetable,
) -> io::Result<()> {
    w.write_all(b"<!DOCTYPE html>\n")?;
    write_xml!(w,
        <html lang="en"><head>
        <meta charset="utf-8" />
        <title>"Transit Marey"</title>
        <style>
    )?;
    w.write_all(include_str!("page.css").as_bytes())?;
    write_xml!(w, </style></head><body>)?;

    marey.write_svg_to(w, timetable)?;
    map.write_svg_to(w, &map.snapshot(timetable, marey.cursor().initial()))?;

    write_xml!(w, <script>)?;
    writeln!(
        w,
        "const DEFAULT_CIRCLE_RADIUS = {}, AUGMENTED_CIRCLE_RADIUS = {}, DEFAULT_TRIPPATH_THICKNESS = '{}', AUGMENTED_TRIPPATH_THICKNESS = '{}';",
        DEFAULT_CIRCLE_RADIUS,
        AUGMENTED_CIRCLE_RADIUS,
        DEFAULT_TRIPPATH_THICKNESS,
        AUGMENTED_TRIPPATH_THICKNESS
    )?;
    w.write_all(include_str!("page.js").as_bytes())?;
    write_xml!(w, </script></body></html>)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn page_holds_both_views() {
        let marey = MareyDiagram::new(940.);
        let map = MapView::new(480., 940.);
        let mut out = vec![];
        write_page_to(&mut out, &marey, &map, &Timetable::default()).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<svg id=\"marey\""));
        assert!(html.contains("<svg id=\"map\""));
        assert!(html.contains("const DEFAULT_CIRCLE_RADIUS = 3, AUGMENTED_CIRCLE_RADIUS = 6, DEFAULT_TRIPPATH_THICKNESS = '1px', AUGMENTED_TRIPPATH_THICKNESS = '3px';"));
        // the script is not escaped
        assert!(html.contains("(event) => {"));
        assert!(html.contains("request !== latestRequest"));
        assert!(html.ends_with("</script></body></html>\n"));
    }
}

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use marey_schedule::timetable::{BusLine, Timetable, Trip, TripKind, TripRecord};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const TRAINS_FILE: &str = "timetableTrains.min.json";

pub fn bus_file(line: BusLine) -> &'static str {
    match line {
        BusLine::Vtn69 => "timetableVTN69.min.json",
        BusLine::Ret40 => "timetableRET40.min.json",
        BusLine::Ret174 => "timetableRET174.min.json",
    }
}

/// Loads the train timetable and the three bus timetables from `data_dir`, the buses concatenated
/// in line order
pub fn load_timetable(data_dir: &Path) -> Result<Timetable> {
    let now = Instant::now();
    let trains = read_trips(&data_dir.join(TRAINS_FILE), TripKind::Train)?;
    let mut buses = vec![];
    for &line in BusLine::ALL.iter() {
        buses.extend(read_trips(&data_dir.join(bus_file(line)), TripKind::Bus(line))?);
    }
    info!(
        "Loaded {} train trips and {} bus trips from {} in {}ms",
        trains.len(),
        buses.len(),
        data_dir.display(),
        now.elapsed().as_millis()
    );
    Ok(Timetable::new(trains, buses))
}

fn read_trips(path: &Path, kind: TripKind) -> Result<Vec<Trip>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_trips(BufReader::new(file), kind).map_err(|source| Error::Timetable {
        path: path.to_owned(),
        source,
    })
}

/// Parses a JSON array of trips. Trips whose stop times go backwards are kept for the diagram,
/// but they can't be interpolated and won't be placed on the map.
pub fn parse_trips<R: Read>(reader: R, kind: TripKind) -> serde_json::Result<Vec<Trip>> {
    let records: Vec<TripRecord> = serde_json::from_reader(reader)?;
    let mut trips = Vec::with_capacity(records.len());
    for record in records {
        let trip = record.into_trip(kind);
        if !trip.is_sorted() {
            warn!("trip {} has stop times out of order and will never be on the map", trip.trip_id);
        } else if trip.stops.len() < 2 {
            debug!("trip {} has fewer than 2 stops and will never be on the map", trip.trip_id);
        }
        trips.push(trip);
    }
    Ok(trips)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    const ONE_TRIP: &str =
        r#"[{"trip_id": "1", "stops": [{"stop": "Delft", "time": "08:00:00"}, {"stop": "Rijswijk", "time": "08:04:00"}]}]"#;

    #[test]
    fn keeps_unsorted_trips() {
        let json = r#"[
            {"trip_id": 1, "stops": [{"stop": "Delft", "time": "08:00:00"}, {"stop": "Rijswijk", "time": "08:04:00"}]},
            {"trip_id": 2, "stops": [{"stop": "Delft", "time": "08:10:00"}, {"stop": "Rijswijk", "time": "08:04:00"}]}
        ]"#;
        let trips = parse_trips(json.as_bytes(), TripKind::Train).unwrap();
        assert_eq!(trips.len(), 2);
        assert!(trips[0].is_sorted());
        assert_eq!(trips[1].trip_id.as_str(), "2");
        assert!(!trips[1].is_sorted());
    }

    #[test]
    fn rejects_bad_times() {
        let json = r#"[{"trip_id": 1, "stops": [{"stop": "Delft", "time": "8am"}]}]"#;
        let err = parse_trips(json.as_bytes(), TripKind::Train).unwrap_err();
        assert!(err.to_string().contains("23:59:59"), "{}", err);
    }

    #[test]
    fn loads_all_four_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TRAINS_FILE), ONE_TRIP).unwrap();
        for &line in BusLine::ALL.iter() {
            std::fs::write(dir.path().join(bus_file(line)), ONE_TRIP).unwrap();
        }
        let timetable = load_timetable(dir.path()).unwrap();
        assert_eq!(timetable.trains.len(), 1);
        let kinds: Vec<TripKind> = timetable.buses.iter().map(|trip| trip.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TripKind::Bus(BusLine::Vtn69),
                TripKind::Bus(BusLine::Ret40),
                TripKind::Bus(BusLine::Ret174)
            ]
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_timetable(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with(TRAINS_FILE)));
    }

    #[test]
    fn bundled_timetables_load() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let timetable = load_timetable(&dir).unwrap();
        assert!(!timetable.trains.is_empty());
        assert!(!timetable.buses.is_empty());
        assert!(timetable
            .trains
            .iter()
            .chain(&timetable.buses)
            .all(|trip| trip.is_sorted() && trip.stops.len() > 1));
    }
}

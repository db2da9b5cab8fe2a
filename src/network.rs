//! The stops of the network and the order they are laid out in on each view.
//!
//! The train line runs from Den Haag to Rotterdam through Delft, where the buses start and run
//! out to the TU campus and Technopolis.

/// Stops of the map's bus axis, left to right
pub const MAP_BUS_STOPS: [&str; 9] = [
    "Delft",
    "Delft - Zuidpoort",
    "Delft - Julianalaan",
    "Delft - TU Aula",
    "Delft - TU Mekelpark",
    "Delft - TU S&C",
    "Delft - TU Kluyverpark",
    "Delft - TU Technopolis",
    "Delft - Technopolis",
];

/// Stops of the map's train axis, top to bottom
pub const MAP_TRAIN_STOPS: [&str; 8] = [
    "Den Haag Central",
    "Den Haag HS",
    "Den Haag Moerwijk",
    "Rijswijk",
    "Delft",
    "Delft Zuid",
    "Schiedam Central",
    "Rotterdam Central",
];

/// The stop where the bus axis crosses the train axis
pub const INTERCHANGE: &str = "Delft";

/// Left hand columns of the diagram, from Den Haag in to the campus
pub const MAREY_LEFT_STOPS: [&str; 12] = [
    "Den Haag Central",
    "Den Haag HS",
    "Den Haag Moerwijk",
    "Rijswijk",
    "Delft",
    "Delft - Zuidpoort",
    "Delft - Julianalaan",
    "Delft - TU Aula",
    "Delft - TU Mekelpark",
    "Delft - TU S&C",
    "Delft - TU Kluyverpark",
    "Delft - TU Technopolis",
];

/// The turning point of the buses, the only stop drawn once
pub const MAREY_CENTRE_STOP: &str = "Delft - Technopolis";

/// Right hand columns of the diagram, from the campus back out to Rotterdam
pub const MAREY_RIGHT_STOPS: [&str; 11] = [
    "Delft - TU Technopolis",
    "Delft - TU Kluyverpark",
    "Delft - TU S&C",
    "Delft - TU Mekelpark",
    "Delft - TU Aula",
    "Delft - Julianalaan",
    "Delft - Zuidpoort",
    "Delft",
    "Delft Zuid",
    "Schiedam Central",
    "Rotterdam Central",
];

/// Most stops appear twice on the diagram, once on each side of the centre column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Side::A => "|A",
            Side::B => "|B",
        }
    }

    pub fn stops(self) -> &'static [&'static str] {
        match self {
            Side::A => &MAREY_LEFT_STOPS,
            Side::B => &MAREY_RIGHT_STOPS,
        }
    }

    pub fn contains(self, stop: &str) -> bool {
        self.stops().contains(&stop)
    }
}

/// The column key of a stop on one side of the diagram
pub fn on_side(stop: &str, side: Side) -> String {
    format!("{}{}", stop, side.suffix())
}

/// The column key of a bus stop, the centre stop has only one column
pub fn deduplicated_bus_stop(stop: &str, side: Side) -> String {
    if stop == MAREY_CENTRE_STOP {
        stop.to_owned()
    } else {
        on_side(stop, side)
    }
}

/// The stop name of a column key
pub fn real_stop_name(key: &str) -> &str {
    key.strip_suffix(Side::A.suffix())
        .or_else(|| key.strip_suffix(Side::B.suffix()))
        .unwrap_or(key)
}

/// Every column of the diagram, left to right
pub fn marey_columns() -> Vec<String> {
    MAREY_LEFT_STOPS
        .iter()
        .map(|stop| on_side(stop, Side::A))
        .chain(std::iter::once(MAREY_CENTRE_STOP.to_owned()))
        .chain(MAREY_RIGHT_STOPS.iter().map(|stop| on_side(stop, Side::B)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn columns_are_unique() {
        let columns = marey_columns();
        assert_eq!(columns.len(), 24);
        let mut sorted = columns.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 24);
        assert_eq!(columns[0], "Den Haag Central|A");
        assert_eq!(columns[12], "Delft - Technopolis");
        assert_eq!(columns[23], "Rotterdam Central|B");
    }

    #[test]
    fn names_round_trip_through_keys() {
        assert_eq!(real_stop_name("Delft - TU S&C|B"), "Delft - TU S&C");
        assert_eq!(real_stop_name("Delft - Technopolis"), "Delft - Technopolis");
        assert_eq!(deduplicated_bus_stop("Delft - Technopolis", Side::A), "Delft - Technopolis");
        assert_eq!(deduplicated_bus_stop("Delft", Side::B), "Delft|B");
    }

    #[test]
    fn interchange_on_both_axes() {
        assert!(MAP_BUS_STOPS.contains(&INTERCHANGE));
        assert!(MAP_TRAIN_STOPS.contains(&INTERCHANGE));
        assert!(Side::A.contains("Rijswijk"));
        assert!(!Side::A.contains("Schiedam Central"));
    }
}

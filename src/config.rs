use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8085,
            data_dir: PathBuf::from("data"),
            layout: Layout::for_window(1440.),
        }
    }
}

impl Config {
    /// `PORT`, `DATA_DIR` and `WINDOW_WIDTH`, each falling back to its default when unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let layout = match parse_var::<f64>(&lookup, "WINDOW_WIDTH")? {
            Some(width) if width > 0. => Layout::for_window(width),
            Some(width) => {
                return Err(Error::Config {
                    var: "WINDOW_WIDTH",
                    value: width.to_string(),
                })
            }
            None => defaults.layout,
        };
        Ok(Self {
            port,
            data_dir,
            layout,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>> {
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config { var, value }),
        None => Ok(None),
    }
}

/// Sizes of the two views, the diagram takes two thirds of the window and the map the rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub marey_width: f64,
    pub map_width: f64,
}

impl Layout {
    pub fn for_window(window_width: f64) -> Self {
        Self {
            marey_width: window_width * (2. / 3.) - 20.,
            map_width: window_width * (1. / 3.),
        }
    }
}

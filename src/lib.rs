//! A Marey diagram of the trains and buses around Delft, linked to a schematic map by a time
//! cursor: point at a time on the diagram and the map shows where every vehicle is.

pub mod config;
pub mod data;
pub mod draw;
pub mod error;
pub mod logger;
pub mod network;
pub mod server;
pub mod views;

pub use error::{Error, Result};
pub use views::LinkedViews;

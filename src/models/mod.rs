//! Core data models for the machine finder.

pub mod machine;
pub mod point;

pub use machine::{NearestResult, VendingMachine};
pub use point::{GeoBbox, GeoPoint};

//! Nearest vending machine resolver.
//!
//! Great-circle (haversine) distance between two points and a linear
//! arg-min scan over the machine list. Everything here is pure and safe to
//! call from any thread.

mod error;
mod haversine;
mod nearest;

pub use error::ResolveError;
pub use haversine::{distance_km, EARTH_RADIUS_KM};
pub use nearest::find_nearest;

//! Otto finder - nearest vending machine lookup
//!
//! This library provides the resolver, dataset and client state shared by the
//! query and nearest binaries.

pub mod app;
pub mod config;
pub mod dataset;
pub mod models;
pub mod resolver;
pub mod scanner;

pub use dataset::Dataset;
pub use models::{GeoPoint, NearestResult, VendingMachine};
pub use resolver::{distance_km, find_nearest, ResolveError};

//! Device geolocation with a single retry

pub mod controller;
pub mod source;

pub use controller::{GeolocationController, GeolocationState, LocateOutcome};
pub use source::{FixedPositionSource, Position, PositionError, PositionOptions, PositionSource};

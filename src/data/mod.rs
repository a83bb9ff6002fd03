//! Spot records, their loading and the links derived from them

pub mod links;
pub mod loader;
pub mod spot;

pub use loader::SpotLoader;
pub use spot::{Spot, SpotKey, SpotStore};

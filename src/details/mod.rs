//! Placement of scenery on a finished terrain.
//!
//! Both passes only read the final position array and return where things
//! should go; spawning them is up to the caller.

mod vegetation;
mod weather;

pub use vegetation::{DetailsError, HeightBand, VegetationGroup, VegetationPlacement, place_vegetation};
pub use weather::place_weather_emitters;

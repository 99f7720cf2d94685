//! Safe SQL builder: identifiers from registered schemas only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;

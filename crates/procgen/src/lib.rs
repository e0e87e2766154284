//! Procedural generation of mushroom fields: noise-driven terrain, randomly
//! scattered anchors, and chains of offspring bred between close anchors.

pub mod attributes;
pub mod config;
pub mod connector;
pub mod error;
pub mod field;
pub mod instance;
pub mod noise_field;
pub mod placement;
pub mod terrain;

pub use attributes::*;
pub use config::*;
pub use connector::*;
pub use error::{GenError, Result};
pub use field::*;
pub use instance::*;
pub use noise_field::*;
pub use placement::*;
pub use terrain::*;

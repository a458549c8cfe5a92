//! Types and traits shared by the rsdbal backend adapters
//!
//! Each supported database driver provides one concrete set of the
//! capability traits defined here. The generic front-end depends only
//! on these traits, never on a concrete backend.

mod backend;
mod error;
mod params;

pub use backend::*;
pub use error::Error;
pub use params::ConnParams;

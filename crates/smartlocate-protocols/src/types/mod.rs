//! Shared data types.

mod geometry;
mod outcome;
mod screenshot;
mod tag;

pub use geometry::*;
pub use outcome::*;
pub use screenshot::*;
pub use tag::*;

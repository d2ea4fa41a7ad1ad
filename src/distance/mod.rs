//! Planar geometry.
//!
//! Provides 2D positions and the Euclidean metric used for every travel leg.

mod position;

pub use position::{euclidean, Position};

//! Analytic rasterizer for rotated ellipses (ovals).
//!
//! Main features:
//!  - Scanline conversion of a union of ellipses into runs of pixels
//!  - Anti-aliasing computed from signed distances at pixel corners
//!  - Removal of (almost) duplicate ellipses
//!  - Text and JSON ellipse lists
//!
//! ```
//! use ovalraster::{Ellipse, rasterize};
//!
//! let runs = rasterize(&[Ellipse::circle((5.5, 5.5), 3.0)], 10, 10);
//! assert!(runs.iter().any(|run| run.coverage == 1.0));
//! ```
#![deny(warnings)]
mod coverage;
mod dedup;
mod edge;
mod ellipse;
mod format;
mod geometry;
mod mask;
mod rasterize;
mod utils;

pub use coverage::pixel_coverage;
pub use dedup::{DEFAULT_COVER_LIMIT, deduplicate};
pub use ellipse::{Ellipse, hit_test};
pub use format::{EllipseParseError, RunsDump, ellipses_from_floats, read_ellipses, write_ellipses};
#[cfg(feature = "serde")]
pub use format::{read_ellipses_json, write_ellipses_json};
pub use geometry::{Bounds, EPSILON, PI, Point, Scalar, intervals_intersect, scalar_fmt};
pub use mask::{Mask, Shape};
pub use rasterize::{PixelRun, probe, push_run, rasterize};
pub use utils::{ArrayIter, clamp};

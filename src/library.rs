//! Track records and the master catalog.
//!
//! A `Catalog` is the immutable source list a playlist is seeded from. It can
//! be read from a TOML catalog file or built by scanning a music directory.

mod catalog;
mod model;
mod scan;

pub use catalog::*;
pub use model::*;
pub use scan::scan;

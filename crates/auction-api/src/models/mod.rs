//! Data types for the auction search backend.
//!
//! The wire format is camelCase JSON as served by the search API.

mod category;
mod item;

pub use category::*;
pub use item::*;

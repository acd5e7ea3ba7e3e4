//! Catalog browsing: the page on display, the tag filter, the tag
//! vocabulary and the operator's selection.

mod coordinator;
mod types;

pub use coordinator::*;
pub use types::*;

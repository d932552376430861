//! An ordered map backed by a red-black tree.
//!
//! Nodes live in an index-addressed arena, parent links are plain indices
//! and absent children are `None`, so the balancing code needs no `unsafe`.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod error;
mod node;
mod red_black_tree;

pub use error::{MapError, MapResult};
pub use node::Color;
pub use red_black_tree::{NodeRef, OrderedMap};

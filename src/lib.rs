//! # kopt - k-opt scoring and quadtree depth registry
//!
//! Two small containers used inside a spatial k-opt search:
//!
//! - [`BoundedTopK`] keeps the `k` largest segment lengths of a stream and derives the
//!   aggregate scores (`sum`, `sum_top_two`, `min`, `kopt_sum`) used to compare search states.
//! - [`DepthRegistry`] indexes quadtree nodes per subdivision depth by grid position, with
//!   O(log n) insert, lookup and removal, without owning the nodes.
//!
//! ## Quick Start
//!
//! ```rust
//! use kopt::prelude::*;
//!
//! // Keep the three longest segments of a tour
//! let mut longest = BoundedTopK::new(3);
//! for length in [4, 12, 6, 3, 10] {
//!     longest.insert(length);
//! }
//! assert_eq!(longest.to_vec(), vec![6, 10, 12]);
//! // (6 + 10 + 1) / 2 + 12
//! assert_eq!(longest.kopt_sum(), 20);
//!
//! // Index quadtree cells by depth and grid position
//! let cells = ["root", "north-east"];
//! let mut registry = DepthRegistry::new();
//! registry.add_root(&cells[0]);
//! registry.add_node(1, 1, 1, &cells[1]).unwrap();
//! assert_eq!(registry.get_node_at(1, 1, 1).unwrap(), Some(&cells[1]));
//! assert_eq!(registry.get_node_at(1, 0, 1).unwrap(), None);
//! ```
//!
//! ## Sentinels
//!
//! Aggregate queries never fail. When there is not enough data they return zero, which
//! callers must tell apart from a genuine zero via [`BoundedTopK::len`].
//!
//! ## Logging
//!
//! Evictions, overwrites and misses are reported through [`tracing`] at `trace` level.
//! The crate never installs a subscriber.

pub mod depth_registry;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod top_k;
pub mod transform;

pub use depth_registry::{DepthRegistry, NodeTable};
pub use error::DepthError;
pub use primitives::{GridCoord, Length, MAX_TREE_DEPTH, NodeHash, Value};
pub use top_k::BoundedTopK;
pub use transform::{HilbertTransform, MortonTransform, Transform};

#[cfg(test)]
mod top_k_tests;

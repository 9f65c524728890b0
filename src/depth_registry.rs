//! Depth-indexed lookup of quadtree nodes by grid position.
//!
//! The registry keeps one ordered table per depth, mapping a cell key (see
//! [`Transform`]) to a node handle. Lookups, inserts and removals are O(log n) in the
//! size of that depth's table.
//!
//! The registry never owns nodes. It stores a `Copy` handle chosen by the owning tree,
//! typically `&'a Node` or an arena index:
//! - with references the borrow checker guarantees every node outlives the registry
//! - with indices the tree must call [`DepthRegistry::remove_node`] before it frees or
//!   moves a node, otherwise the registry keeps answering with a stale index
//!
//! ```
//! use kopt::DepthRegistry;
//!
//! struct Node { depth: usize }
//! let root = Node { depth: 0 };
//! let child = Node { depth: 1 };
//!
//! let mut registry = DepthRegistry::new();
//! registry.add_root(&root);
//! registry.add_node(1, 1, 0, &child)?;
//!
//! let key = registry.key(1, 0);
//! let found = registry.get_node(1, key)?.map(|node| node.depth);
//! assert_eq!(found, Some(1));
//! assert!(registry.get_nodes(2)?.is_empty());
//! # Ok::<(), kopt::DepthError>(())
//! ```

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::DepthError;
use crate::primitives::{GridCoord, MAX_TREE_DEPTH, NodeHash};
use crate::transform::{HilbertTransform, Transform};

/// Nodes registered at one depth, ordered by key.
pub type NodeTable<H> = BTreeMap<NodeHash, H>;

/// Per-depth map from cell key to a non-owning node handle.
///
/// `DEPTH` fixes the number of tables; depths `0..DEPTH` are valid and anything else
/// is rejected with [`DepthError::OutOfRange`].
#[derive(Clone, Debug)]
pub struct DepthRegistry<H, T = HilbertTransform, const DEPTH: usize = MAX_TREE_DEPTH> {
    /// One table per depth, indexed by depth
    tables: [NodeTable<H>; DEPTH],
    /// Grid coordinate to key transform shared by every depth
    transform: T,
}

impl<H: Copy> DepthRegistry<H> {
    /// Creates an empty registry with [`MAX_TREE_DEPTH`] depths keyed by [`HilbertTransform`].
    pub fn new() -> Self {
        Self::with_transform(HilbertTransform)
    }
}

impl<H: Copy> Default for DepthRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy, T: Transform, const DEPTH: usize> DepthRegistry<H, T, DEPTH> {
    /// Creates an empty registry that keys cells with `transform`.
    ///
    /// # Example
    /// ```
    /// use kopt::{DepthRegistry, MortonTransform};
    /// let registry: DepthRegistry<u32, MortonTransform, 4> =
    ///     DepthRegistry::with_transform(MortonTransform);
    /// assert_eq!(registry.max_depth(), 4);
    /// assert!(registry.is_empty());
    /// ```
    pub fn with_transform(transform: T) -> Self {
        const { assert!(DEPTH > 0, "a registry needs at least the root depth") };
        debug!(depths = DEPTH, "depth registry created");
        Self {
            tables: std::array::from_fn(|_| NodeTable::new()),
            transform,
        }
    }

    /// Registers the root node at depth 0, cell `(0, 0)`.
    ///
    /// Returns the handle previously stored there, if any.
    pub fn add_root(&mut self, node: H) -> Option<H> {
        let key = self.transform.key(0, 0);
        // DEPTH > 0 is checked at construction
        Self::store(&mut self.tables[0], 0, key, node)
    }

    /// Registers `node` for cell `(x, y)` at `depth`.
    ///
    /// An existing entry with the same key is overwritten and its handle returned.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn add_node(
        &mut self,
        depth: usize,
        x: GridCoord,
        y: GridCoord,
        node: H,
    ) -> Result<Option<H>, DepthError> {
        let key = self.transform.key(x, y);
        let table = self.table_mut(depth)?;
        Ok(Self::store(table, depth, key, node))
    }

    /// Looks up the node stored under `hash` at `depth`.
    ///
    /// `Ok(None)` means no node is registered there.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn get_node(&self, depth: usize, hash: NodeHash) -> Result<Option<H>, DepthError> {
        Ok(self.table(depth)?.get(&hash).copied())
    }

    /// Looks up the node registered for cell `(x, y)` at `depth`.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn get_node_at(
        &self,
        depth: usize,
        x: GridCoord,
        y: GridCoord,
    ) -> Result<Option<H>, DepthError> {
        self.get_node(depth, self.transform.key(x, y))
    }

    /// Every node registered at `depth`, ordered by key.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn get_nodes(&self, depth: usize) -> Result<&NodeTable<H>, DepthError> {
        self.table(depth)
    }

    /// Unregisters cell `(x, y)` at `depth` and returns the handle it held.
    ///
    /// Removing a cell that holds nothing is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn remove_node(
        &mut self,
        depth: usize,
        x: GridCoord,
        y: GridCoord,
    ) -> Result<Option<H>, DepthError> {
        let key = self.transform.key(x, y);
        let removed = self.table_mut(depth)?.remove(&key);
        if removed.is_none() {
            trace!(depth, x, y, key, "remove of unregistered cell");
        }
        Ok(removed)
    }

    /// Returns true if a node is registered for cell `(x, y)` at `depth`.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn contains(&self, depth: usize, x: GridCoord, y: GridCoord) -> Result<bool, DepthError> {
        Ok(self.table(depth)?.contains_key(&self.transform.key(x, y)))
    }

    /// Key the registry's transform assigns to `(x, y)`, as accepted by [`Self::get_node`].
    pub fn key(&self, x: GridCoord, y: GridCoord) -> NodeHash {
        self.transform.key(x, y)
    }

    /// The transform used to key cells.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Number of nodes registered at `depth`.
    ///
    /// # Errors
    /// [`DepthError::OutOfRange`] if `depth >= DEPTH`.
    pub fn depth_len(&self, depth: usize) -> Result<usize, DepthError> {
        Ok(self.table(depth)?.len())
    }

    /// Number of nodes registered across all depths.
    pub fn len(&self) -> usize {
        self.tables.iter().map(BTreeMap::len).sum()
    }

    /// Returns true if no depth holds a node.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(BTreeMap::is_empty)
    }

    /// Number of depth tables; valid depths are `0..max_depth()`.
    pub fn max_depth(&self) -> usize {
        DEPTH
    }

    /// Forgets every registered node. The nodes themselves are untouched.
    pub fn clear(&mut self) {
        self.tables.iter_mut().for_each(BTreeMap::clear);
    }

    fn table(&self, depth: usize) -> Result<&NodeTable<H>, DepthError> {
        self.tables
            .get(depth)
            .ok_or(DepthError::OutOfRange { depth, max: DEPTH })
    }

    fn table_mut(&mut self, depth: usize) -> Result<&mut NodeTable<H>, DepthError> {
        self.tables
            .get_mut(depth)
            .ok_or(DepthError::OutOfRange { depth, max: DEPTH })
    }

    fn store(table: &mut NodeTable<H>, depth: usize, key: NodeHash, node: H) -> Option<H> {
        let previous = table.insert(key, node);
        if previous.is_some() {
            trace!(depth, key, "registry entry overwritten");
        }
        previous
    }
}

//! Grid-coordinate to key transforms used by the [`DepthRegistry`](crate::DepthRegistry).
//!
//! A transform must be pure: the same `(x, y)` always yields the same key, so that
//! insertion, lookup and removal agree. Two distinct cells mapping to the same key at one
//! depth silently share a registry slot.
//!
//! Both provided transforms are bijections from the 16-bit grid onto `u32`, so they never
//! collide:
//! - [`HilbertTransform`] - Hilbert curve order, neighbouring cells get nearby keys
//! - [`MortonTransform`] - Z-order bit interleave, cheaper to compute

use crate::primitives::{GridCoord, NodeHash};

/// Maps a cell's grid coordinates to its registry key.
pub trait Transform {
    /// Key of the cell at `(x, y)`.
    fn key(&self, x: GridCoord, y: GridCoord) -> NodeHash;
}

impl<F> Transform for F
where
    F: Fn(GridCoord, GridCoord) -> NodeHash,
{
    fn key(&self, x: GridCoord, y: GridCoord) -> NodeHash {
        self(x, y)
    }
}

/// Keys cells by their position along a Hilbert curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HilbertTransform;

impl Transform for HilbertTransform {
    #[inline]
    fn key(&self, x: GridCoord, y: GridCoord) -> NodeHash {
        hilbert_key(x, y)
    }
}

/// Keys cells by interleaving the bits of `x` (even bits) and `y` (odd bits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MortonTransform;

impl Transform for MortonTransform {
    #[inline]
    fn key(&self, x: GridCoord, y: GridCoord) -> NodeHash {
        morton_key(x, y)
    }
}

/// Z-order key of `(x, y)`.
///
/// # Example
/// ```
/// use kopt::transform::morton_key;
/// assert_eq!(morton_key(0, 0), 0);
/// assert_eq!(morton_key(1, 0), 1);
/// assert_eq!(morton_key(0, 1), 2);
/// assert_eq!(morton_key(3, 3), 15);
/// ```
pub fn morton_key(x: GridCoord, y: GridCoord) -> NodeHash {
    interleave(u32::from(x)) | (interleave(u32::from(y)) << 1)
}

/// Hilbert curve index of `(x, y)` on the `65536 x 65536` grid.
///
/// Computed with the branch-free prefix-scan method from
/// <https://github.com/rawrunprotected/hilbert_curves> (public domain).
///
/// # Example
/// ```
/// use kopt::transform::hilbert_key;
/// // the curve starts in the origin cell and its first step moves along one axis
/// assert_eq!(hilbert_key(0, 0), 0);
/// assert_eq!(hilbert_key(0, 1).min(hilbert_key(1, 0)), 1);
/// ```
pub fn hilbert_key(x: GridCoord, y: GridCoord) -> NodeHash {
    let x = u32::from(x);
    let y = u32::from(y);

    // Initial prefix scan round, prime with x and y
    let mut a = x ^ y;
    let mut b = 0xFFFF ^ a;
    let mut c = 0xFFFF ^ (x | y);
    let mut d = x & (y ^ 0xFFFF);
    let mut next_a = a | (b >> 1);
    let mut next_b = (a >> 1) ^ a;
    let mut next_c = ((c >> 1) ^ (b & (d >> 1))) ^ c;
    let mut next_d = ((a & (c >> 1)) ^ (d >> 1)) ^ d;

    for shift in [2, 4] {
        a = next_a;
        b = next_b;
        c = next_c;
        d = next_d;
        next_a = (a & (a >> shift)) ^ (b & (b >> shift));
        next_b = (a & (b >> shift)) ^ (b & ((a ^ b) >> shift));
        next_c ^= (a & (c >> shift)) ^ (b & (d >> shift));
        next_d ^= (b & (c >> shift)) ^ ((a ^ b) & (d >> shift));
    }

    // Final round and projection
    a = next_a;
    b = next_b;
    c = next_c;
    d = next_d;
    next_c ^= (a & (c >> 8)) ^ (b & (d >> 8));
    next_d ^= (b & (c >> 8)) ^ ((a ^ b) & (d >> 8));

    // Undo transformation prefix scan
    a = next_c ^ (next_c >> 1);
    b = next_d ^ (next_d >> 1);

    // Recover index bits
    let i0 = x ^ y;
    let i1 = b | (0xFFFF ^ (i0 | a));

    (interleave(i1) << 1) | interleave(i0)
}

/// Spreads the low 16 bits of `x` over the even bit positions.
fn interleave(mut x: u32) -> u32 {
    x &= 0xFFFF;
    x = (x | (x << 8)) & 0x00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333;
    x = (x | (x << 1)) & 0x5555_5555;
    x
}

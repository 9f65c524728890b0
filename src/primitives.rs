//! Shared scalar types and compile-time limits.

use std::fmt::Debug;

/// Default value type for segment lengths fed into a [`BoundedTopK`](crate::BoundedTopK).
pub type Length = i64;

/// Grid coordinate of a quadtree cell within one depth level.
pub type GridCoord = u16;

/// Key produced by a [`Transform`](crate::Transform) from a pair of grid coordinates.
pub type NodeHash = u32;

/// Number of quadtree depth levels a [`DepthRegistry`](crate::DepthRegistry) indexes by default.
///
/// Depth `d` spans a `2^d x 2^d` grid, so every coordinate below this depth fits a [`GridCoord`].
pub const MAX_TREE_DEPTH: usize = 16;

/// Numeric capability required by [`BoundedTopK`](crate::BoundedTopK).
///
/// Aggregates never overflow: sums clamp at the type's bounds.
pub trait Value: Copy + Ord + Debug {
    /// Additive identity, also the "no data" sentinel.
    const ZERO: Self;

    /// Addition clamped to `MIN..=MAX`.
    #[must_use]
    fn saturating_add(self, rhs: Self) -> Self;

    /// `(low + high + 1) / 2`, truncating toward zero.
    ///
    /// Exact for every pair of types up to 64 bits; the 128-bit types clamp the
    /// intermediate sum.
    #[must_use]
    fn fold_pair(low: Self, high: Self) -> Self;
}

macro_rules! impl_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl Value for $t {
                const ZERO: Self = 0;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }

                #[inline]
                fn fold_pair(low: Self, high: Self) -> Self {
                    // i128 holds the sum of any two values of this type
                    let folded = (low as i128 + high as i128 + 1) / 2;
                    Self::try_from(folded).unwrap_or(if folded < 0 { Self::MIN } else { Self::MAX })
                }
            }
        )*
    };
}

macro_rules! impl_value_wide {
    ($($t:ty),* $(,)?) => {
        $(
            impl Value for $t {
                const ZERO: Self = 0;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }

                #[inline]
                fn fold_pair(low: Self, high: Self) -> Self {
                    low.saturating_add(high).saturating_add(1) / 2
                }
            }
        )*
    };
}

impl_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_value_wide!(i128, u128);

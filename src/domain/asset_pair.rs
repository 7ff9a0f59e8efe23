//! Canonically ordered pair of distinct assets.

use core::fmt;

use super::AssetId;
use crate::error::{DexError, Result};

/// An unordered pair of distinct assets, stored in canonical order.
///
/// The constructor sorts its inputs so that `first() < second()`; `(A, B)`
/// and `(B, A)` therefore produce equal pairs and a single registry key.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.second(), b);
/// assert_eq!(pair, AssetPair::new(a, b).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::IdenticalAssets`] if both identifiers are equal.
    pub fn new(x: AssetId, y: AssetId) -> Result<Self> {
        if x == y {
            return Err(DexError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { asset_a, asset_b })
    }

    /// The lower asset.
    #[must_use]
    pub const fn first(&self) -> AssetId {
        self.asset_a
    }

    /// The higher asset.
    #[must_use]
    pub const fn second(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the two assets.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns `true` if `asset` is the pair's first (lower) asset.
    #[must_use]
    pub fn is_first(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(DexError::InvalidAsset("asset is not part of this pair"))
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}

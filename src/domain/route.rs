//! Multi-hop swap routes.

use super::AssetId;
use crate::error::{DexError, Result};

/// An ordered sequence of assets `[a0, a1, .., aN]` traded hop by hop.
///
/// A valid route has at least two assets and no hop whose input and
/// output are the same asset.  Whether each hop resolves to a registered
/// pool is checked by the router at call time.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{AssetId, Route};
///
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
/// let c = AssetId::from_bytes([3u8; 20]);
///
/// let route = Route::new(vec![a, b, c]).expect("valid route");
/// assert_eq!(route.hop_count(), 2);
/// assert!(Route::new(vec![a]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<AssetId>", into = "Vec<AssetId>")
)]
pub struct Route {
    assets: Vec<AssetId>,
}

impl Route {
    /// Validates and wraps a path.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidPath`] if fewer than two assets are given or
    /// two consecutive assets are equal.
    pub fn new(assets: Vec<AssetId>) -> Result<Self> {
        if assets.len() < 2 {
            return Err(DexError::InvalidPath("route needs at least two assets"));
        }
        if assets.windows(2).any(|w| w[0] == w[1]) {
            return Err(DexError::InvalidPath("route hop trades an asset for itself"));
        }
        Ok(Self { assets })
    }

    /// Direct single-hop route.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidPath`] if `from == to`.
    pub fn direct(from: AssetId, to: AssetId) -> Result<Self> {
        Self::new(vec![from, to])
    }

    /// All assets in order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Number of assets, which equals the length of the amounts vector
    /// returned for this route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Number of pool hops (`len - 1`).
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.assets.len() - 1
    }

    /// The asset paid in.
    #[must_use]
    pub fn input(&self) -> AssetId {
        self.assets[0]
    }

    /// The asset received.
    #[must_use]
    pub fn output(&self) -> AssetId {
        self.assets[self.assets.len() - 1]
    }

    /// Iterates over `(asset_in, asset_out)` hops in trade order.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (AssetId, AssetId)> + '_ {
        self.assets.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<Vec<AssetId>> for Route {
    type Error = DexError;

    fn try_from(assets: Vec<AssetId>) -> Result<Self> {
        Self::new(assets)
    }
}

impl From<Route> for Vec<AssetId> {
    fn from(route: Route) -> Self {
        route.assets
    }
}

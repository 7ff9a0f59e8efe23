//! 20-byte identifiers for assets and accounts.

use core::fmt;

/// Byte length of every identifier.
pub const ADDRESS_LEN: usize = 20;

macro_rules! address_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name([u8; ADDRESS_LEN]);

        impl $name {
            /// Creates an identifier from raw bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }

            /// Returns the raw bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> [u8; ADDRESS_LEN] {
                self.0
            }

            /// The all-zero identifier.
            #[must_use]
            pub const fn zero() -> Self {
                Self([0u8; ADDRESS_LEN])
            }

            /// Returns `true` for the all-zero identifier.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl From<[u8; ADDRESS_LEN]> for $name {
            fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("0x")?;
                for b in &self.0 {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    };
}

address_newtype!(
    /// Identifier of a fungible asset.
    ///
    /// Ordering is lexicographic on the bytes; it defines the canonical
    /// order of an [`AssetPair`](super::AssetPair).
    ///
    /// ```
    /// use hydra_dex::domain::AssetId;
    ///
    /// let lo = AssetId::from_bytes([1u8; 20]);
    /// let hi = AssetId::from_bytes([2u8; 20]);
    /// assert!(lo < hi);
    /// ```
    AssetId
);

address_newtype!(
    /// Identifier of an account: a trader, liquidity provider, or the router.
    AccountId
);

//! Top-level configuration bundle.

use super::{RegistryConfig, RouterConfig};
use crate::error::Result;

/// Everything needed to stand up an [`Exchange`](crate::exchange::Exchange)
/// and its [`Router`](crate::router::Router).
///
/// # Examples
///
/// ```
/// use hydra_dex::config::ExchangeConfig;
///
/// let cfg = ExchangeConfig::default();
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.registry().default_fee_tier().basis_points().get(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeConfig {
    registry: RegistryConfig,
    router: RouterConfig,
}

impl ExchangeConfig {
    /// Creates a validated `ExchangeConfig`.
    ///
    /// # Errors
    ///
    /// Propagates any error from the nested configs' `validate`.
    pub fn new(registry: RegistryConfig, router: RouterConfig) -> Result<Self> {
        let config = Self { registry, router };
        config.validate()?;
        Ok(config)
    }

    /// Validates every nested configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from the nested configs' `validate`.
    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        self.router.validate()
    }

    /// Registry defaults.
    #[must_use]
    pub const fn registry(&self) -> &RegistryConfig {
        &self.registry
    }

    /// Router identity.
    #[must_use]
    pub const fn router(&self) -> &RouterConfig {
        &self.router
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, FeeTier};

    #[test]
    fn nested_accessors() {
        let Ok(registry) = RegistryConfig::new(FeeTier::TIER_0_05_PERCENT) else {
            panic!("expected Ok");
        };
        let Ok(router) = RouterConfig::new(AccountId::from_bytes([9u8; 20])) else {
            panic!("expected Ok");
        };
        let Ok(cfg) = ExchangeConfig::new(registry, router) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.registry().default_fee_tier(), FeeTier::TIER_0_05_PERCENT);
        assert_eq!(cfg.router().address(), AccountId::from_bytes([9u8; 20]));
    }
}

//! Configuration for the identity gate.
//!
//! Builder-style settings with development and production presets and
//! explicit validation.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use crate::error::{CoreError, Result};

/// Hard ceiling for [`GateConfig::max_identity_len`].
pub const IDENTITY_LEN_CAP: usize = 4096;

/// Identity gate settings.
///
/// # Examples
/// ```rust
/// use zkid_core::config::GateConfig;
///
/// let config = GateConfig::new()
///     .with_max_identity_len(64)
///     .build()
///     .expect("valid config");
///
/// // Accepts the key carried in the transcript; never use outside development.
/// let dev_config = GateConfig::for_development();
/// assert!(!dev_config.require_registered_key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Longest identity, in bytes, the gate will consider.
    ///
    /// Default: 256
    pub max_identity_len: usize,

    /// Whether the transcript's public key must match the key registered for
    /// the identity.
    ///
    /// When disabled, any internally consistent transcript is accepted and the
    /// gate only proves that *some* key holder bound the proof to the identity.
    /// Default: `true`
    pub require_registered_key: bool,

    /// Whether denied requests are logged at `warn` level.
    ///
    /// Default: `true`
    pub log_rejections: bool,

    /// Whether insecure combinations are refused by [`GateConfig::validate`].
    ///
    /// Default: `true`
    pub strict_validation: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_identity_len: 256,
            require_registered_key: true,
            log_rejections: true,
            strict_validation: true,
        }
    }
}

impl GateConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Relaxed settings for local development.
    ///
    /// Not suitable for production use.
    #[must_use]
    pub fn for_development() -> Self {
        Self::default().with_registered_key_required(false).with_strict_validation(false)
    }

    /// Settings for production deployments.
    #[must_use]
    pub fn for_production() -> Self {
        Self::default().with_registered_key_required(true).with_strict_validation(true)
    }

    /// Set the maximum identity length.
    #[must_use]
    pub fn with_max_identity_len(mut self, len: usize) -> Self {
        self.max_identity_len = len;
        self
    }

    /// Require (or stop requiring) a registered key per identity.
    #[must_use]
    pub fn with_registered_key_required(mut self, required: bool) -> Self {
        self.require_registered_key = required;
        self
    }

    /// Enable or disable rejection logging.
    #[must_use]
    pub fn with_rejection_logging(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    /// Enable or disable strict validation.
    #[must_use]
    pub fn with_strict_validation(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    /// See [`GateConfig::validate`].
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_identity_len` is zero or above [`IDENTITY_LEN_CAP`]
    /// - strict validation is on and registered keys are not required
    pub fn validate(&self) -> Result<()> {
        if self.max_identity_len == 0 {
            return Err(CoreError::ConfigurationError(
                "max_identity_len cannot be zero".to_string(),
            ));
        }

        if self.max_identity_len > IDENTITY_LEN_CAP {
            return Err(CoreError::ConfigurationError(format!(
                "max_identity_len cannot exceed {}",
                IDENTITY_LEN_CAP
            )));
        }

        if self.strict_validation && !self.require_registered_key {
            return Err(CoreError::ConfigurationError(
                "Strict validation requires registered keys".to_string(),
            ));
        }

        Ok(())
    }
}

//! # zkid Logging Utilities
//!
//! Structured logging through `tracing`, plus helpers that keep identities,
//! keys and transcripts out of log output in raw form.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zkid_core::logging::{fingerprint, init_tracing, sanitize_data};
//!
//! // Sets the global subscriber; call once per process.
//! init_tracing().expect("Failed to init tracing");
//!
//! let identity = b"user-1";
//! tracing::info!(identity = %fingerprint(identity), "authorizing");
//! tracing::debug!("transcript: {}", sanitize_data(&[0u8; 98]));
//! ```

use std::fmt;

use sha2::{Digest, Sha256};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CoreError, Result};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "zkid_core=info,zkid_zkp=warn";

/// Data at or below this length is shown as a length only.
const SMALL_DATA_LEN: usize = 32;

/// Initialize tracing.
///
/// Filtering comes from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`];
/// output uses the compact formatter without targets or thread details.
///
/// # Errors
///
/// Returns [`CoreError::LoggingInit`] if a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| CoreError::LoggingInit(e.to_string()))?;

    info!("zkid logging initialized");
    Ok(())
}

/// First 8 bytes of SHA-256 over `data`, hex encoded.
///
/// Stable across runs, so log lines about the same identity correlate without
/// the identity itself appearing.
///
/// ```rust
/// use zkid_core::logging::fingerprint;
///
/// assert_eq!(fingerprint(b"abc"), "ba7816bf8f01cfea");
/// ```
#[must_use]
pub fn fingerprint(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.get(..8).map_or_else(|| hex::encode(digest), hex::encode)
}

/// Wrap bytes so they display as a length and fingerprint, never raw.
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Wrapper type for sanitized data display
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= SMALL_DATA_LEN {
            write!(f, "[{} bytes]", self.0.len())
        } else {
            write!(f, "[{} bytes, fingerprint: {}]", self.0.len(), fingerprint(self.0))
        }
    }
}

impl fmt::Debug for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

//! Single-shot acquisition of the user's position.
//!
//! The [`LocationProvider`] trait abstracts the platform geolocation
//! capability: one request, one position or one failure, no subscription.

use geo::Coord;
use thiserror::Error;

/// Errors from [`LocationProvider::current_position`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or platform denied the position request.
    #[error("position request was denied")]
    PermissionDenied,
    /// No position source is available.
    #[error("position is unavailable: {message}")]
    Unavailable {
        /// Platform-provided detail.
        message: String,
    },
    /// The platform did not answer within its deadline.
    #[error("position request timed out after {timeout_secs}s")]
    Timeout {
        /// The platform deadline in seconds.
        timeout_secs: u64,
    },
}

/// Acquire the caller's current geographic position.
pub trait LocationProvider: Send + Sync {
    /// Return the current position (`x = longitude`, `y = latitude`).
    fn current_position(&self) -> Result<Coord<f64>, LocationError>;
}

/// A provider that always reports one configured position.
///
/// Backs non-interactive environments where coordinates arrive out of band,
/// such as CLI flags or environment variables.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use spotfinder_core::{FixedLocationProvider, LocationProvider};
///
/// let provider = FixedLocationProvider::new(Coord { x: -71.11, y: 42.35 });
/// let position = provider.current_position()?;
/// assert_eq!(position.y, 42.35);
/// # Ok::<(), spotfinder_core::LocationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocationProvider {
    position: Coord<f64>,
}

impl FixedLocationProvider {
    /// Create a provider reporting `position`.
    pub const fn new(position: Coord<f64>) -> Self {
        Self { position }
    }

    /// The configured position.
    pub const fn position(&self) -> Coord<f64> {
        self.position
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_position(&self) -> Result<Coord<f64>, LocationError> {
        Ok(self.position)
    }
}

//! Test utilities shared across Spotfinder crates.
//!
//! Enable the `test-support` feature to use these helpers from dependent
//! crates' tests.

use geo::Coord;

use crate::location::{LocationError, LocationProvider};

/// Deterministic [`LocationProvider`] double.
///
/// # Examples
/// ```
/// use spotfinder_core::LocationProvider;
/// use spotfinder_core::test_support::StubLocationProvider;
///
/// let provider = StubLocationProvider::denied();
/// assert!(provider.current_position().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StubLocationProvider {
    response: Result<Coord<f64>, LocationError>,
}

impl StubLocationProvider {
    /// A provider that reports `position`.
    pub fn with_position(position: Coord<f64>) -> Self {
        Self {
            response: Ok(position),
        }
    }

    /// A provider that fails with `error`.
    pub fn with_error(error: LocationError) -> Self {
        Self {
            response: Err(error),
        }
    }

    /// A provider that reports a denied position request.
    pub fn denied() -> Self {
        Self::with_error(LocationError::PermissionDenied)
    }
}

impl LocationProvider for StubLocationProvider {
    fn current_position(&self) -> Result<Coord<f64>, LocationError> {
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_position() {
        let provider = StubLocationProvider::with_position(Coord { x: 1.0, y: 2.0 });
        assert_eq!(provider.current_position(), Ok(Coord { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn stub_reports_error() {
        let provider = StubLocationProvider::with_error(LocationError::Timeout { timeout_secs: 5 });
        assert_eq!(
            provider.current_position(),
            Err(LocationError::Timeout { timeout_secs: 5 })
        );
    }
}

//! Study spot records and their noise classification.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. A spot's
//! `name` doubles as the join key when ranking results are matched back to
//! the catalog, so it must stay stable across the catalog and the ranking
//! service.

use geo::Coord;
use thiserror::Error;

/// Ambient noise classification for a study spot.
///
/// # Examples
/// ```
/// use spotfinder_core::NoiseLevel;
///
/// assert_eq!(NoiseLevel::Quiet.as_str(), "quiet");
/// assert_eq!("moderate".parse::<NoiseLevel>(), Ok(NoiseLevel::Moderate));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum NoiseLevel {
    /// Silent or near-silent individual study.
    Quiet,
    /// Background conversation and movement.
    Moderate,
    /// Open collaborative areas.
    Loud,
}

impl NoiseLevel {
    /// Return the level as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Moderate => "moderate",
            Self::Loud => "loud",
        }
    }
}

impl std::fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`NoiseLevel`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown noise level '{value}'")]
pub struct NoiseLevelParseError {
    /// The token that failed to parse.
    pub value: String,
}

impl std::str::FromStr for NoiseLevel {
    type Err = NoiseLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "moderate" => Ok(Self::Moderate),
            "loud" => Ok(Self::Loud),
            _ => Err(NoiseLevelParseError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Errors returned by [`StudySpot::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpotError {
    /// The rating fell outside `0.0..=5.0` or was not a finite number.
    #[error("rating {rating} must be a finite value between 0.0 and 5.0")]
    InvalidRating {
        /// The rejected rating.
        rating: f32,
    },
}

/// A single campus study location.
///
/// Records are immutable once the catalog is built; there is no update path.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use spotfinder_core::{NoiseLevel, StudySpot};
///
/// # fn main() -> Result<(), spotfinder_core::SpotError> {
/// let spot = StudySpot::new(
///     1,
///     "Mugar Memorial Library",
///     "Library",
///     4.5,
///     Coord { x: -71.1081, y: 42.3510 },
/// )?
/// .with_noise(NoiseLevel::Quiet)
/// .with_amenities(["WiFi", "Power Outlets"]);
///
/// assert_eq!(spot.name, "Mugar Memorial Library");
/// assert_eq!(spot.noise, Some(NoiseLevel::Quiet));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudySpot {
    /// Unique identifier within the catalog.
    pub id: u64,
    /// Display name; also the join key for ranking resolution.
    pub name: String,
    /// Category label such as "Library" or "Student Center".
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub category: String,
    /// Aggregate user rating in `0.0..=5.0`.
    pub rating: f32,
    /// Noise classification; absent records never match a noise filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub noise: Option<NoiseLevel>,
    /// Free-text capability tags, in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub amenities: Vec<String>,
    /// Free-text availability description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hours: String,
    /// Free-text summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Geographic position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
}

impl StudySpot {
    /// Validate and construct a [`StudySpot`] with no optional attributes.
    ///
    /// # Errors
    /// Returns [`SpotError::InvalidRating`] when the rating is not a finite
    /// value in `0.0..=5.0`.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: impl Into<String>,
        rating: f32,
        location: Coord<f64>,
    ) -> Result<Self, SpotError> {
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            return Err(SpotError::InvalidRating { rating });
        }
        Ok(Self {
            id,
            name: name.into(),
            category: category.into(),
            rating,
            noise: None,
            amenities: Vec::new(),
            hours: String::new(),
            description: String::new(),
            location,
        })
    }

    /// Attach a noise classification while returning `self` for chaining.
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseLevel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Replace the amenity tags while returning `self` for chaining.
    #[must_use]
    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the availability description while returning `self` for chaining.
    #[must_use]
    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = hours.into();
        self
    }

    /// Set the summary text while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

//! Pure filter predicate over the study spot catalog.
//!
//! All active predicates combine with logical AND. The filter is
//! deterministic and allocation-light, so callers can re-derive the
//! filtered view on every input change.

use crate::spot::{NoiseLevel, StudySpot};

/// Filter parameters for the catalog.
///
/// The default value matches every record: an empty search term, no noise
/// restriction, and no amenity restriction.
///
/// # Examples
/// ```
/// use spotfinder_core::{Catalog, NoiseLevel, SpotFilter};
///
/// let catalog = Catalog::campus_default();
/// let filter = SpotFilter::default()
///     .with_search("library")
///     .with_noise(NoiseLevel::Quiet);
///
/// for spot in catalog.filtered(&filter) {
///     assert_eq!(spot.noise, Some(NoiseLevel::Quiet));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpotFilter {
    /// Free-text search term matched against name and category.
    pub search: String,
    /// Restrict results to a single noise level; `None` admits all.
    pub noise: Option<NoiseLevel>,
    /// Restrict results to spots with a matching amenity; `None` admits all.
    pub amenity: Option<String>,
}

impl SpotFilter {
    /// Set the search term while returning `self` for chaining.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to a noise level while returning `self` for chaining.
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseLevel) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Restrict to an amenity while returning `self` for chaining.
    #[must_use]
    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenity = Some(amenity.into());
        self
    }

    /// Return true when `spot` satisfies every active predicate.
    ///
    /// Absent record fields are non-matches rather than errors: a spot
    /// without a noise classification never satisfies an active noise
    /// restriction.
    pub fn matches(&self, spot: &StudySpot) -> bool {
        self.matches_search(spot) && self.matches_noise(spot) && self.matches_amenity(spot)
    }

    /// An empty term matches everything; otherwise the term must appear in
    /// the name or the category, case-insensitively.
    fn matches_search(&self, spot: &StudySpot) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        spot.name.to_lowercase().contains(&term) || spot.category.to_lowercase().contains(&term)
    }

    fn matches_noise(&self, spot: &StudySpot) -> bool {
        match self.noise {
            None => true,
            Some(level) => spot.noise == Some(level),
        }
    }

    /// Amenity matching is substring-based: "power" admits "Power Outlets".
    fn matches_amenity(&self, spot: &StudySpot) -> bool {
        match &self.amenity {
            None => true,
            Some(value) => {
                let needle = value.to_lowercase();
                spot.amenities
                    .iter()
                    .any(|amenity| amenity.to_lowercase().contains(&needle))
            }
        }
    }
}

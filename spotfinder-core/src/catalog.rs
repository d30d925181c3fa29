//! The read-only catalog of study spots.
//!
//! A [`Catalog`] is built once at startup and never mutated afterwards;
//! there are no create, update, or delete operations. Lookup by name is the
//! join used to resolve ranking results, so it is exact and case-sensitive.

use geo::Coord;
use thiserror::Error;

use crate::filter::SpotFilter;
use crate::spot::{NoiseLevel, StudySpot};

/// Errors returned by [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two records shared the same identifier.
    #[error("duplicate study spot id {id}")]
    DuplicateId {
        /// The identifier that appeared more than once.
        id: u64,
    },
}

/// Fixed, in-memory list of study spot records.
///
/// # Examples
/// ```
/// use spotfinder_core::Catalog;
///
/// let catalog = Catalog::campus_default();
/// let mugar = catalog.find_by_name("Mugar Memorial Library");
/// assert!(mugar.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    spots: Vec<StudySpot>,
}

impl Catalog {
    /// Validate and construct a catalog from a list of records.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateId`] when two records share an id.
    pub fn new(spots: Vec<StudySpot>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for spot in &spots {
            if !seen.insert(spot.id) {
                return Err(CatalogError::DuplicateId { id: spot.id });
            }
        }
        Ok(Self { spots })
    }

    /// The built-in campus catalog used when no catalog file is supplied.
    pub fn campus_default() -> Self {
        let spots = vec![
            seed(
                1,
                "Mugar Memorial Library",
                "Library",
                4.5,
                Some(NoiseLevel::Quiet),
                &["WiFi", "Power Outlets", "Printing", "24/7"],
                "24/7 during semester",
                "Main library with multiple floors offering study environments \
                 from silent floors to collaborative spaces.",
                -71.1081,
                42.3510,
            ),
            seed(
                2,
                "GSU Study Lounge",
                "Student Center",
                4.2,
                Some(NoiseLevel::Moderate),
                &["WiFi", "Power Outlets", "Food Nearby", "Collaborative"],
                "7am - 2am",
                "Popular student center with comfortable seating and group \
                 study areas.",
                -71.1064,
                42.3508,
            ),
            seed(
                3,
                "Stokes Hall Reading Room",
                "Academic Building",
                4.7,
                Some(NoiseLevel::Quiet),
                &["WiFi", "Power Outlets", "Beautiful Architecture"],
                "8am - 10pm",
                "Reading room with high ceilings and natural light, suited to \
                 focused individual study.",
                -71.1040,
                42.3501,
            ),
            seed(
                4,
                "CDS Collaborative Space",
                "Academic Building",
                4.0,
                Some(NoiseLevel::Loud),
                &["WiFi", "Power Outlets", "Whiteboards", "Collaborative"],
                "8am - 11pm",
                "Open collaborative space designed for group projects and \
                 discussion.",
                -71.1031,
                42.3499,
            ),
            seed(
                5,
                "Pardee Library",
                "Library",
                4.6,
                Some(NoiseLevel::Quiet),
                &["WiFi", "Power Outlets", "Printing", "Reserved Rooms"],
                "8am - 12am",
                "Peaceful library with individual carrels and reservable group \
                 study rooms.",
                -71.0998,
                42.3493,
            ),
            seed(
                6,
                "BU Beach",
                "Outdoor",
                3.8,
                Some(NoiseLevel::Moderate),
                &["WiFi", "Outdoor Seating", "Scenic"],
                "Always Open",
                "Outdoor lawn by the Charles River with a relaxed atmosphere \
                 on nice days.",
                -71.1073,
                42.3516,
            ),
        ];
        Self { spots }
    }

    /// All records, in catalog order.
    pub fn spots(&self) -> &[StudySpot] {
        &self.spots
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// True when the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Iterate over records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, StudySpot> {
        self.spots.iter()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: u64) -> Option<&StudySpot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    /// Look up a record by exact, case-sensitive name.
    pub fn find_by_name(&self, name: &str) -> Option<&StudySpot> {
        self.spots.iter().find(|spot| spot.name == name)
    }

    /// Return the records satisfying `filter`, preserving catalog order.
    ///
    /// # Examples
    /// ```
    /// use spotfinder_core::{Catalog, SpotFilter};
    ///
    /// let catalog = Catalog::campus_default();
    /// let all = catalog.filtered(&SpotFilter::default());
    /// assert_eq!(all.len(), catalog.len());
    /// ```
    pub fn filtered(&self, filter: &SpotFilter) -> Vec<&StudySpot> {
        self.spots.iter().filter(|spot| filter.matches(spot)).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StudySpot;
    type IntoIter = std::slice::Iter<'a, StudySpot>;

    fn into_iter(self) -> Self::IntoIter {
        self.spots.iter()
    }
}

#[expect(clippy::too_many_arguments, reason = "internal seed-row constructor")]
fn seed(
    id: u64,
    name: &str,
    category: &str,
    rating: f32,
    noise: Option<NoiseLevel>,
    amenities: &[&str],
    hours: &str,
    description: &str,
    lon: f64,
    lat: f64,
) -> StudySpot {
    StudySpot {
        id,
        name: name.to_owned(),
        category: category.to_owned(),
        rating,
        noise,
        amenities: amenities.iter().map(|&a| a.to_owned()).collect(),
        hours: hours.to_owned(),
        description: description.to_owned(),
        location: Coord { x: lon, y: lat },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::campus_default()
    }

    #[rstest]
    fn rejects_duplicate_ids(catalog: Catalog) {
        let mut spots = catalog.spots().to_vec();
        if let Some(first) = spots.first().cloned() {
            spots.push(first);
        }
        let err = Catalog::new(spots).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId { id: 1 });
    }

    #[rstest]
    fn campus_default_has_unique_ids(catalog: Catalog) {
        let revalidated = Catalog::new(catalog.spots().to_vec());
        assert!(revalidated.is_ok());
    }

    #[rstest]
    fn lookup_by_name_is_exact(catalog: Catalog) {
        assert!(catalog.find_by_name("Pardee Library").is_some());
        assert!(catalog.find_by_name("pardee library").is_none());
        assert!(catalog.find_by_name("Pardee").is_none());
    }

    #[rstest]
    fn lookup_by_id(catalog: Catalog) {
        let spot = catalog.get(4).expect("spot 4 exists");
        assert_eq!(spot.name, "CDS Collaborative Space");
        assert!(catalog.get(99).is_none());
    }

    #[rstest]
    fn default_filter_returns_whole_catalog_in_order(catalog: Catalog) {
        let filtered = catalog.filtered(&SpotFilter::default());
        let ids: Vec<u64> = filtered.iter().map(|spot| spot.id).collect();
        let expected: Vec<u64> = catalog.iter().map(|spot| spot.id).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn power_amenity_selects_substring_matches(catalog: Catalog) {
        let filter = SpotFilter::default().with_amenity("power");
        let names: Vec<&str> = catalog
            .filtered(&filter)
            .iter()
            .map(|spot| spot.name.as_str())
            .collect();
        // Every indoor spot lists "Power Outlets"; BU Beach does not.
        assert_eq!(names.len(), 5);
        assert!(!names.contains(&"BU Beach"));
    }

    #[rstest]
    fn unmatched_search_term_yields_empty_result(catalog: Catalog) {
        let filter = SpotFilter::default().with_search("observatory");
        assert!(catalog.filtered(&filter).is_empty());
    }

    #[rstest]
    fn repeated_filtering_is_idempotent(catalog: Catalog) {
        let filter = SpotFilter::default().with_search("library");
        let first = catalog.filtered(&filter);
        let second = catalog.filtered(&filter);
        assert_eq!(first, second);
    }
}

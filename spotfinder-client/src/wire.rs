//! Wire types for the ranking endpoint response.
//!
//! The endpoint answers with a JSON array of two-element `[entry, score]`
//! arrays, ordered best-first. `entry` is either a bare name string or a
//! full record object; record objects carry the spot name under `name` or
//! `Name` and any other keys are ignored.

use serde::Deserialize;
use spotfinder_core::{RankedList, RankedSpot};

/// One `[entry, score]` pair from the response array.
#[derive(Debug, Deserialize)]
pub(crate) struct RankedPairWire(pub(crate) SpotRefWire, pub(crate) f32);

/// The entry half of a pair: a bare name or a record object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SpotRefWire {
    /// A bare name string.
    Name(String),
    /// A record object carrying at least a name field.
    Record(SpotRecordWire),
}

impl SpotRefWire {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Record(record) => &record.name,
        }
    }
}

/// A record object; only the name is consumed.
#[derive(Debug, Deserialize)]
pub(crate) struct SpotRecordWire {
    /// The spot name used for catalog resolution.
    #[serde(alias = "Name")]
    pub(crate) name: String,
}

/// Convert the decoded response into a [`RankedList`], preserving order.
///
/// Scores pass through [`RankedSpot::new`] and are therefore sanitised.
pub(crate) fn into_ranked_list(pairs: Vec<RankedPairWire>) -> RankedList {
    RankedList::new(
        pairs
            .into_iter()
            .map(|RankedPairWire(entry, score)| RankedSpot::new(entry.name(), score))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_bare_name_pairs() {
        let json = r#"[["Mugar", 0.75], ["CDS", 0.66]]"#;

        let pairs: Vec<RankedPairWire> = serde_json::from_str(json).expect("should deserialise");
        let list = into_ranked_list(pairs);

        assert_eq!(list.len(), 2);
        let top = list.top().expect("non-empty");
        assert_eq!(top.name(), "Mugar");
        assert_eq!(top.score(), 0.75);
    }

    #[test]
    fn deserialises_record_object_pairs() {
        let json = r#"[
            [{"Name": "Mugar Memorial Library", "Latitude": 42.351, "Longitude": -71.108}, 0.9],
            [{"name": "BU Beach"}, 0.4]
        ]"#;

        let pairs: Vec<RankedPairWire> = serde_json::from_str(json).expect("should deserialise");
        let list = into_ranked_list(pairs);

        let names: Vec<&str> = list.iter().map(|entry| entry.name()).collect();
        assert_eq!(names, vec!["Mugar Memorial Library", "BU Beach"]);
    }

    #[test]
    fn preserves_response_order_without_sorting() {
        let json = r#"[["Low", 0.1], ["High", 0.9]]"#;

        let pairs: Vec<RankedPairWire> = serde_json::from_str(json).expect("should deserialise");
        let list = into_ranked_list(pairs);

        let names: Vec<&str> = list.iter().map(|entry| entry.name()).collect();
        assert_eq!(names, vec!["Low", "High"]);
    }

    #[test]
    fn sanitises_out_of_range_scores() {
        let json = r#"[["Mugar", 1.5], ["CDS", -0.2]]"#;

        let pairs: Vec<RankedPairWire> = serde_json::from_str(json).expect("should deserialise");
        let list = into_ranked_list(pairs);

        let scores: Vec<f32> = list.iter().map(|entry| entry.score()).collect();
        assert_eq!(scores, vec![1.0, 0.0]);
    }

    #[test]
    fn rejects_malformed_pairs() {
        let json = r#"[["Mugar"]]"#;
        let result: Result<Vec<RankedPairWire>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_records_without_a_name() {
        let json = r#"[[{"Latitude": 42.35}, 0.5]]"#;
        let result: Result<Vec<RankedPairWire>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn empty_response_is_an_empty_list() {
        let pairs: Vec<RankedPairWire> = serde_json::from_str("[]").expect("should deserialise");
        assert!(into_ranked_list(pairs).is_empty());
    }
}

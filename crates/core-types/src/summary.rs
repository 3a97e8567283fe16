use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Message carried by the sentinel served before any model has been run.
pub const NO_RESULTS_MESSAGE: &str = "No model results yet";

/// The structural-break summary produced by the offline model.
///
/// The document's schema belongs to the offline process, so its content is
/// carried as an opaque JSON object. Absence and corruption are explicit
/// states rather than failures so a query can always answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangePointSummary {
    Available(Map<String, Value>),
    Unavailable,
    Malformed(String),
}

impl ChangePointSummary {
    /// Looks up a key in an available summary.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            ChangePointSummary::Available(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ChangePointSummary::Available(_))
    }
}

impl Serialize for ChangePointSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChangePointSummary::Available(map) => map.serialize(serializer),
            ChangePointSummary::Unavailable => {
                let mut out = serializer.serialize_map(Some(2))?;
                out.serialize_entry("status", "unavailable")?;
                out.serialize_entry("message", NO_RESULTS_MESSAGE)?;
                out.end()
            }
            ChangePointSummary::Malformed(cause) => {
                let mut out = serializer.serialize_map(Some(2))?;
                out.serialize_entry("status", "error")?;
                out.serialize_entry("error", cause)?;
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn available_summary_passes_through_unchanged() {
        let doc = json!({ "cp_median_date": "2020-03-09", "mu1_mean": 0.0004, "extra": [1, 2] });
        let Value::Object(map) = doc.clone() else { unreachable!() };
        let summary = ChangePointSummary::Available(map);

        assert_eq!(serde_json::to_value(&summary).unwrap(), doc);
        assert_eq!(summary.get("mu1_mean"), Some(&json!(0.0004)));
    }

    #[test]
    fn sentinels_serialize_to_explanatory_objects() {
        let unavailable = serde_json::to_value(ChangePointSummary::Unavailable).unwrap();
        assert_eq!(unavailable["status"], "unavailable");
        assert_eq!(unavailable["message"], NO_RESULTS_MESSAGE);

        let malformed =
            serde_json::to_value(ChangePointSummary::Malformed("bad json".into())).unwrap();
        assert_eq!(malformed["status"], "error");
        assert_eq!(malformed["error"], "bad json");
        assert!(ChangePointSummary::Unavailable.get("cp_median_date").is_none());
    }
}

use crate::domain::input::FounderInput;
use crate::domain::valuation::ValuationRequest;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

pub const MAX_SUBJECT_ID_LEN: usize = 128;
pub const MAX_VALUATIONS_PER_REQUEST: usize = 10;

/// What a caller submits for a full analysis run.
///
/// The engine accepts any founder data; only the envelope is validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub subject_id: Option<String>,
    #[serde(default)]
    pub input: FounderInput,
    #[serde(default)]
    pub valuations: Vec<ValuationRequest>,
}

impl AnalysisRequest {
    pub fn validate_and_normalize(self) -> anyhow::Result<Self> {
        let subject_id = self
            .subject_id
            .as_deref()
            .map(normalize_subject_id)
            .transpose()?;

        ensure!(
            self.valuations.len() <= MAX_VALUATIONS_PER_REQUEST,
            "at most {MAX_VALUATIONS_PER_REQUEST} valuations per request (got {})",
            self.valuations.len()
        );

        Ok(Self {
            subject_id,
            input: self.input,
            valuations: self.valuations,
        })
    }
}

/// Trims a subject id and checks it is usable as a storage key.
pub fn normalize_subject_id(raw: &str) -> anyhow::Result<String> {
    let id = raw.trim();
    ensure!(!id.is_empty(), "subject_id must be non-empty when present");
    ensure!(
        id.len() <= MAX_SUBJECT_ID_LEN,
        "subject_id must be at most {MAX_SUBJECT_ID_LEN} characters (got {})",
        id.len()
    );
    ensure!(
        id.chars().all(|c| !c.is_control()),
        "subject_id must not contain control characters"
    );
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn berkus_request() -> serde_json::Value {
        json!({
            "method": "berkus",
            "input": {
                "sound_idea": 50.0,
                "prototype": 50.0,
                "quality_team": 50.0,
                "strategic_relationships": 50.0,
                "product_rollout": 50.0
            }
        })
    }

    #[test]
    fn trims_subject_id() {
        let req: AnalysisRequest = serde_json::from_value(json!({
            "subject_id": "  founder-42  ",
            "input": {},
        }))
        .unwrap();
        let req = req.validate_and_normalize().unwrap();
        assert_eq!(req.subject_id.as_deref(), Some("founder-42"));
        assert!(req.valuations.is_empty());
    }

    #[test]
    fn rejects_blank_subject_id() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"subject_id": "   "})).unwrap();
        assert!(req.validate_and_normalize().is_err());
    }

    #[test]
    fn rejects_overlong_subject_id() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"subject_id": "x".repeat(129)})).unwrap();
        assert!(req.validate_and_normalize().is_err());
    }

    #[test]
    fn rejects_too_many_valuations() {
        let valuations: Vec<_> = (0..11).map(|_| berkus_request()).collect();
        let req: AnalysisRequest =
            serde_json::from_value(json!({"valuations": valuations})).unwrap();
        assert!(req.validate_and_normalize().is_err());
    }

    #[test]
    fn accepts_missing_subject_and_input() {
        let req: AnalysisRequest =
            serde_json::from_value(json!({"valuations": [berkus_request()]})).unwrap();
        let req = req.validate_and_normalize().unwrap();
        assert!(req.subject_id.is_none());
        assert_eq!(req.valuations.len(), 1);
    }
}

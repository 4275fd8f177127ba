use anyhow::Context;
use runway_core::domain::analysis::AnalysisReport;
use runway_core::domain::contract::AnalysisRequest;

/// Upper bound on requests per batch file.
pub const MAX_BATCH_SIZE: usize = 1_000;

/// Parses a JSON array of analysis requests and validates each envelope.
///
/// Validation failures are returned per entry so one bad request does not
/// sink the rest of the batch.
pub fn parse_batch(raw: &str) -> anyhow::Result<Vec<anyhow::Result<AnalysisRequest>>> {
    let requests: Vec<AnalysisRequest> =
        serde_json::from_str(raw).context("batch must be a JSON array of analysis requests")?;
    anyhow::ensure!(
        requests.len() <= MAX_BATCH_SIZE,
        "batch has {} requests; at most {MAX_BATCH_SIZE} are allowed",
        requests.len()
    );

    Ok(requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            request
                .validate_and_normalize()
                .with_context(|| format!("request #{index} is invalid"))
        })
        .collect())
}

pub fn render_report(report: &AnalysisReport, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    rendered.context("serialize analysis report failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_core::engine;

    #[test]
    fn parses_and_validates_each_entry() {
        let raw = r#"[
            {"subject_id": " a ", "input": {}},
            {"subject_id": "   "},
            {"input": {"tier": "basic"}}
        ]"#;
        let batch = parse_batch(raw).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].as_ref().unwrap().subject_id.as_deref(), Some("a"));
        let err = batch[1].as_ref().unwrap_err();
        assert!(format!("{err:#}").contains("request #1"));
        assert!(batch[2].as_ref().unwrap().subject_id.is_none());
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(parse_batch(r#"{"subject_id": "a"}"#).is_err());
    }

    #[test]
    fn compact_report_is_a_single_line() {
        let batch = parse_batch(r#"[{"subject_id": "a"}]"#).unwrap();
        let request = batch.into_iter().next().unwrap().unwrap();
        let report = engine::analyze(&request);

        let compact = render_report(&report, false).unwrap();
        assert!(!compact.contains('\n'));
        let pretty = render_report(&report, true).unwrap();
        assert!(pretty.contains('\n'));

        let round: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(round["subject_id"], "a");
    }
}

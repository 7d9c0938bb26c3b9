use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "originalJD", default)]
    pub original_jd: String,
    #[serde(default)]
    pub comparators: Vec<String>,
}

/// The three stage outputs. Replaced wholesale by every analyze run; each field
/// may be edited independently by the client before rendering or export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub revision: String,
    /// Expected, not guaranteed, to hold a pipe-delimited table.
    #[serde(default)]
    pub documentation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_uses_original_jd_key() {
        let json = r#"{"originalJD": "Engineer role", "comparators": ["Peer A", "Peer B"]}"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.original_jd, "Engineer role");
        assert_eq!(request.comparators.len(), 2);
    }

    #[test]
    fn test_analyze_request_missing_fields_default_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.original_jd.is_empty());
        assert!(request.comparators.is_empty());
    }

    #[test]
    fn test_analysis_result_wire_shape() {
        let result = AnalysisResult {
            analysis: "a".to_string(),
            revision: "r".to_string(),
            documentation: "d".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"analysis": "a", "revision": "r", "documentation": "d"})
        );
    }
}

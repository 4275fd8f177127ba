use serde::{Deserialize, Serialize};

/// One weighted input to the aggregated confidence score. `value` is in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSignal {
    pub weight: f64,
    pub value: f64,
}

impl ConfidenceSignal {
    pub fn contribution(&self) -> f64 {
        self.weight * self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub tier_factor: ConfidenceSignal,
    pub data_completeness: ConfidenceSignal,
    pub method_agreement: ConfidenceSignal,
    pub market_data_quality: ConfidenceSignal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceExplanation {
    /// 20..=95.
    pub confidence: u32,
    pub factors: ConfidenceFactors,
    pub explanations: Vec<String>,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Risk assessment recorded against a profile. The decision policy reads
/// `overall_score`; the component scores ride along for logging and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub id: Uuid,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub object_id: Option<Uuid>,
    #[serde(default)]
    pub object_type: Option<String>,
    pub overall_score: f64,
    #[serde(default)]
    pub impact_score: Option<f64>,
    #[serde(default)]
    pub probability_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScoresResponse {
    pub risk_scores: Vec<RiskScore>,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the school-response generation endpoint. Every field is
/// optional on the wire; absent fields collapse to empty values before prompt
/// construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolResponseRequest {
    #[serde(default)]
    pub scenario_background: String,
    #[serde(default)]
    pub school_line: String,
    #[serde(default)]
    pub parent_history: Vec<Value>,
    #[serde(default)]
    pub irp_type: String,
}

/// Request body for the outcome-scoring endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutcomesRequest {
    #[serde(default)]
    pub previous_scores: Vec<Value>,
    #[serde(default)]
    pub potential_outcomes: Vec<Value>,
    #[serde(default)]
    pub last_exchange: Value,
}

/// Request body for the simulation-logging endpoint. Start/end times are
/// accepted as arbitrary JSON and stored as free text, never parsed as dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationLogRequest {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub parent_choices: Vec<Value>,
    #[serde(default)]
    pub outcome_scores: Vec<Value>,
    #[serde(default)]
    pub start_time: Option<Value>,
    #[serde(default)]
    pub end_time: Option<Value>,
    #[serde(default)]
    pub elapsed_seconds: Option<i64>,
    #[serde(default)]
    pub meta: Value,
}

/// Request body for the scenario-suggestion endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestScenarioRequest {
    #[serde(default)]
    pub suggestion: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

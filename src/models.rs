use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct CalculationRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalculationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub ai_explanation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_operaciones: Option<u64>,
    #[serde(default)]
    pub usuarios_unicos: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stats: Option<StatsSnapshot>,
}

/// One row of history. Every field may be absent or `null`; a bad row must not
/// sink the rest of the list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Operation {
    #[serde(default)]
    pub operacion: Option<String>,
    #[serde(default)]
    pub resultado: Value,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub fecha_hora: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LatestOperationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub operation: Option<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecentOperationsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Text shown for the success panel of one calculation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultPanel {
    pub result_text: String,
    pub explanation_text: String,
    pub location_text: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CalculatorView {
    pub expression: String,
    pub loading: bool,
    pub result: Option<ResultPanel>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: String,
    pub latest_operation: String,
    pub recent_operations: String,
    pub refreshed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ExamplesView {
    pub modal_open: bool,
    pub feedback: bool,
    pub focus_input: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalculateForm {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Deserialize)]
pub struct ExampleForm {
    pub example: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}

/// Renders a loosely typed JSON value the way a template literal would.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

use serde::Serialize;

use crate::inputs::Inputs;
use crate::metrics::calc::CalcValue;
use crate::metrics::present::DisplayPair;

#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub label: String,
    pub code: String,
    pub message: String,
    pub received: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricData {
    pub key: String,
    pub label: String,
    pub result: CalcValue,
    pub display: DisplayPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowData {
    pub window: String,
    pub label: String,
    pub metrics: Vec<MetricData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationData {
    pub mode: String,
    pub mode_label: String,
    pub refund_rate_delta_points: Option<f64>,
    pub refund_rate_delta: DisplayPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricSheetData {
    pub policy_version: String,
    pub inputs_schema_version: String,
    pub inputs: Inputs,
    pub field_issues: Vec<FieldIssue>,
    pub windows: Vec<WindowData>,
    pub target: WindowData,
    pub reconciliation: ReconciliationData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummaryRow {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub created_at_display: String,
    pub base_mode: String,
    pub fee_rate: DisplayPair,
    pub net_return: DisplayPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioListData {
    pub count: usize,
    pub capacity: usize,
    pub rows: Vec<ScenarioSummaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSaveData {
    pub scenario: ScenarioSummaryRow,
    pub count: usize,
    pub capacity: usize,
    /// False when the store could not be written and the change lives only in
    /// this process.
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioShowData {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub created_at_display: String,
    pub sheet: MetricSheetData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDeleteData {
    pub id: String,
    pub name: String,
    pub remaining: usize,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioClearData {
    pub removed: usize,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioExportData {
    pub rows: usize,
    pub csv: String,
}

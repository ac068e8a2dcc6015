use crate::ClientResult;
use crate::commands::common::metric_sheet_data;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::inputs::Inputs;

/// Evaluates one set of raw fields. Field problems are reported inside the
/// sheet, never as a command failure.
pub fn run(inputs: &Inputs) -> ClientResult<SuccessEnvelope> {
    success("calc", metric_sheet_data(inputs))
}

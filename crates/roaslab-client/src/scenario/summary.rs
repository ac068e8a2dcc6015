use crate::inputs::Inputs;
use crate::metrics::compose::window_metrics;
use crate::metrics::policy::{BaseMode, select_base_window};
use crate::metrics::present::{DisplayPair, format_percent, format_ratio, present};
use crate::metrics::validate::FieldReadings;

/// Read-only list-view summary of a saved scenario's base window.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct QuickMetrics {
    pub mode: BaseMode,
    pub fee_rate: DisplayPair,
    pub net_return: DisplayPair,
}

/// Goes through the same readings, defaulting, and base-window selection as
/// the full composer, so list and detail views never disagree.
pub fn quick_metrics(inputs: &Inputs) -> QuickMetrics {
    let readings = FieldReadings::read(inputs);
    let source = select_base_window(&readings);
    let metrics = window_metrics(source.gross, source.spend, source.refund_rate);

    QuickMetrics {
        mode: source.mode,
        fee_rate: present(&metrics.fee_rate, format_percent),
        net_return: present(&metrics.net_return, format_ratio),
    }
}

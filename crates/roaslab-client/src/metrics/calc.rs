use serde::Serialize;

pub const GENERIC_BOTH_ZERO_REASON: &str = "0/0 is undefined.";

/// Classified result of a division.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalcValue {
    Value { value: f64 },
    Infinite { reason: String },
    Undefined { reason: String },
}

impl CalcValue {
    pub fn undefined(reason: &str) -> Self {
        Self::Undefined {
            reason: reason.to_string(),
        }
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value { value } => Some(*value),
            Self::Infinite { .. } | Self::Undefined { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Value { .. } => None,
            Self::Infinite { reason } | Self::Undefined { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DivideReasons<'a> {
    pub missing: &'a str,
    pub denominator_zero: &'a str,
    pub both_zero: Option<&'a str>,
}

/// The single division primitive behind every ratio.
pub fn divide(
    numerator: Option<f64>,
    denominator: Option<f64>,
    reasons: DivideReasons<'_>,
) -> CalcValue {
    // Non-finite operands cannot come out of the parser; treat them as absent.
    let finite = |value: Option<f64>| value.filter(|candidate| candidate.is_finite());
    let (Some(numerator), Some(denominator)) = (finite(numerator), finite(denominator)) else {
        return CalcValue::undefined(reasons.missing);
    };

    if denominator == 0.0 {
        if numerator == 0.0 {
            return CalcValue::undefined(reasons.both_zero.unwrap_or(GENERIC_BOTH_ZERO_REASON));
        }
        return CalcValue::Infinite {
            reason: reasons.denominator_zero.to_string(),
        };
    }

    CalcValue::Value {
        value: numerator / denominator,
    }
}

/// Refund-adjusted amount: `gmv * (1 - refund_rate)`.
pub fn net_amount(gmv: Option<f64>, refund_rate: Option<f64>) -> Option<f64> {
    Some(gmv? * (1.0 - refund_rate?))
}

#[cfg(test)]
mod tests {
    use super::{CalcValue, DivideReasons, GENERIC_BOTH_ZERO_REASON, divide, net_amount};

    const REASONS: DivideReasons<'static> = DivideReasons {
        missing: "missing",
        denominator_zero: "zero spend",
        both_zero: Some("nothing yet"),
    };

    #[test]
    fn nonzero_over_zero_is_infinite() {
        assert_eq!(
            divide(Some(5.0), Some(0.0), REASONS),
            CalcValue::Infinite {
                reason: "zero spend".to_string()
            }
        );
        assert!(matches!(
            divide(Some(-5.0), Some(-0.0), REASONS),
            CalcValue::Infinite { .. }
        ));
    }

    #[test]
    fn zero_over_zero_uses_both_zero_reason() {
        assert_eq!(
            divide(Some(0.0), Some(0.0), REASONS),
            CalcValue::undefined("nothing yet")
        );

        let generic = DivideReasons {
            both_zero: None,
            ..REASONS
        };
        assert_eq!(
            divide(Some(0.0), Some(0.0), generic),
            CalcValue::undefined(GENERIC_BOTH_ZERO_REASON)
        );
    }

    #[test]
    fn absent_operand_is_undefined_with_missing_reason() {
        for denominator in [None, Some(0.0), Some(3.0)] {
            assert_eq!(
                divide(None, denominator, REASONS),
                CalcValue::undefined("missing")
            );
        }
        assert_eq!(
            divide(Some(0.0), None, REASONS),
            CalcValue::undefined("missing")
        );
    }

    #[test]
    fn definite_quotient() {
        assert_eq!(
            divide(Some(125_000.0), Some(32_000.0), REASONS).as_value(),
            Some(3.90625)
        );
        assert_eq!(divide(Some(0.0), Some(4.0), REASONS).as_value(), Some(0.0));
    }

    #[test]
    fn net_amount_requires_both_operands() {
        assert_eq!(net_amount(Some(200.0), Some(0.25)), Some(150.0));
        assert_eq!(net_amount(None, Some(0.25)), None);
        assert_eq!(net_amount(Some(200.0), None), None);
        assert_eq!(net_amount(Some(200.0), Some(1.0)), Some(0.0));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let value = serde_json::to_value(CalcValue::undefined("x"));
        assert!(value.is_ok());
        if let Ok(json) = value {
            assert_eq!(json["kind"], "undefined");
            assert_eq!(json["reason"], "x");
        }
    }
}

use serde::{Deserialize, Serialize};

pub const INPUTS_SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FieldKind {
    Money,
    RefundRate,
    FeeRate,
}

/// One raw-text field of the `v1` input schema.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputField {
    TodayGmv,
    TodaySpend,
    TodayRefundRate,
    HourGmv,
    HourSpend,
    HourRefundRate,
    MonthGmv,
    MonthSpend,
    MonthRefundRate,
    MonthExpectedRefundRate,
    TargetFeeRate,
    TargetRefundRate,
}

pub const INPUT_FIELD_COUNT: usize = 12;

pub const INPUT_FIELDS: [InputField; INPUT_FIELD_COUNT] = [
    InputField::TodayGmv,
    InputField::TodaySpend,
    InputField::TodayRefundRate,
    InputField::HourGmv,
    InputField::HourSpend,
    InputField::HourRefundRate,
    InputField::MonthGmv,
    InputField::MonthSpend,
    InputField::MonthRefundRate,
    InputField::MonthExpectedRefundRate,
    InputField::TargetFeeRate,
    InputField::TargetRefundRate,
];

impl InputField {
    /// Key used in the persisted record and in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Self::TodayGmv => "todayGmv",
            Self::TodaySpend => "todaySpend",
            Self::TodayRefundRate => "todayRefundRate",
            Self::HourGmv => "hourGmv",
            Self::HourSpend => "hourSpend",
            Self::HourRefundRate => "hourRefundRate",
            Self::MonthGmv => "monthGmv",
            Self::MonthSpend => "monthSpend",
            Self::MonthRefundRate => "monthRefundRate",
            Self::MonthExpectedRefundRate => "monthExpectedRefundRate",
            Self::TargetFeeRate => "targetFeeRate",
            Self::TargetRefundRate => "targetRefundRate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TodayGmv => "Today GMV",
            Self::TodaySpend => "Today ad spend",
            Self::TodayRefundRate => "Today refund rate",
            Self::HourGmv => "Trailing-hour GMV",
            Self::HourSpend => "Trailing-hour ad spend",
            Self::HourRefundRate => "Trailing-hour refund rate",
            Self::MonthGmv => "Month GMV",
            Self::MonthSpend => "Month ad spend",
            Self::MonthRefundRate => "Month refund rate",
            Self::MonthExpectedRefundRate => "Expected final refund rate",
            Self::TargetFeeRate => "Target fee rate",
            Self::TargetRefundRate => "Target refund rate",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::TodayGmv
            | Self::TodaySpend
            | Self::HourGmv
            | Self::HourSpend
            | Self::MonthGmv
            | Self::MonthSpend => FieldKind::Money,
            Self::TargetFeeRate => FieldKind::FeeRate,
            Self::TodayRefundRate
            | Self::HourRefundRate
            | Self::MonthRefundRate
            | Self::MonthExpectedRefundRate
            | Self::TargetRefundRate => FieldKind::RefundRate,
        }
    }
}

/// Raw field text exactly as the operator entered it. Never holds parsed numbers.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub today_gmv: String,
    pub today_spend: String,
    pub today_refund_rate: String,
    pub hour_gmv: String,
    pub hour_spend: String,
    pub hour_refund_rate: String,
    pub month_gmv: String,
    pub month_spend: String,
    pub month_refund_rate: String,
    pub month_expected_refund_rate: String,
    pub target_fee_rate: String,
    pub target_refund_rate: String,
}

impl Inputs {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::TodayGmv => &self.today_gmv,
            InputField::TodaySpend => &self.today_spend,
            InputField::TodayRefundRate => &self.today_refund_rate,
            InputField::HourGmv => &self.hour_gmv,
            InputField::HourSpend => &self.hour_spend,
            InputField::HourRefundRate => &self.hour_refund_rate,
            InputField::MonthGmv => &self.month_gmv,
            InputField::MonthSpend => &self.month_spend,
            InputField::MonthRefundRate => &self.month_refund_rate,
            InputField::MonthExpectedRefundRate => &self.month_expected_refund_rate,
            InputField::TargetFeeRate => &self.target_fee_rate,
            InputField::TargetRefundRate => &self.target_refund_rate,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::TodayGmv => &mut self.today_gmv,
            InputField::TodaySpend => &mut self.today_spend,
            InputField::TodayRefundRate => &mut self.today_refund_rate,
            InputField::HourGmv => &mut self.hour_gmv,
            InputField::HourSpend => &mut self.hour_spend,
            InputField::HourRefundRate => &mut self.hour_refund_rate,
            InputField::MonthGmv => &mut self.month_gmv,
            InputField::MonthSpend => &mut self.month_spend,
            InputField::MonthRefundRate => &mut self.month_refund_rate,
            InputField::MonthExpectedRefundRate => &mut self.month_expected_refund_rate,
            InputField::TargetFeeRate => &mut self.target_fee_rate,
            InputField::TargetRefundRate => &mut self.target_refund_rate,
        };
        *slot = value.into();
    }

    pub fn with(mut self, field: InputField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_blank(&self) -> bool {
        INPUT_FIELDS
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }
}

use clap::{Args, Parser, Subcommand};
use roaslab_client::{InputField, Inputs};

/// Extended help shown after `roaslab calc --help`.
pub const CALC_AFTER_HELP: &str = "\
How fields are read:
  Amounts accept grouping separators: `125,000` and `125000` are the same.
  Rates accept `12%`, `12`, or `0.12`. A bare number above 1 is read as a
  percentage, so `1` means 100%. Blank refund rates count as 0%.

Base window:
  With both --hour-gmv and --hour-spend the base window is exact.
  Otherwise it is estimated from today's cumulative figures.

Month forecast:
  Needs --month-expected-refund-rate; without it the forecast stays empty
  instead of reusing the realized month rate.
";

#[derive(Debug, Parser)]
#[command(
    name = "roaslab",
    version,
    about = "ad return and refund-rate calculator",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate return, fee rate, and break-even targets for raw figures
    #[command(after_help = CALC_AFTER_HELP)]
    Calc {
        #[command(flatten)]
        fields: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// Save, browse, and export named input snapshots
    #[command(arg_required_else_help = true)]
    Scenario {
        #[command(subcommand)]
        command: ScenarioCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScenarioCommand {
    /// Save the given fields under a name (newest first, 100 kept)
    Save {
        name: String,
        #[command(flatten)]
        fields: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// List saved scenarios with quick base-window metrics
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a scenario's raw fields and full metric sheet
    Show {
        scenario_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete one scenario by id
    Delete {
        scenario_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete every saved scenario
    Clear {
        /// Confirm removal of all scenarios
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        json: bool,
    },
    /// Write saved scenarios as CSV
    Export {
        #[arg(long)]
        json: bool,
    },
}

/// Raw field flags. Values are kept exactly as typed; validation happens
/// in the metric sheet, not at parse time.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Today's cumulative GMV
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub today_gmv: Option<String>,
    /// Today's cumulative ad spend
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub today_spend: Option<String>,
    /// Today's refund rate
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub today_refund_rate: Option<String>,
    /// Trailing-hour platform GMV
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub hour_gmv: Option<String>,
    /// Trailing-hour platform ad spend
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub hour_spend: Option<String>,
    /// Trailing-hour refund rate
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub hour_refund_rate: Option<String>,
    /// Month-to-date GMV
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub month_gmv: Option<String>,
    /// Month-to-date ad spend
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub month_spend: Option<String>,
    /// Month-to-date realized refund rate
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub month_refund_rate: Option<String>,
    /// Expected final refund rate for the month
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub month_expected_refund_rate: Option<String>,
    /// Target fee rate (spend over net amount)
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub target_fee_rate: Option<String>,
    /// Refund rate assumed for the target
    #[arg(long, value_name = "RATE", allow_hyphen_values = true)]
    pub target_refund_rate: Option<String>,
}

impl InputArgs {
    pub fn to_inputs(&self) -> Inputs {
        let flags = [
            (InputField::TodayGmv, &self.today_gmv),
            (InputField::TodaySpend, &self.today_spend),
            (InputField::TodayRefundRate, &self.today_refund_rate),
            (InputField::HourGmv, &self.hour_gmv),
            (InputField::HourSpend, &self.hour_spend),
            (InputField::HourRefundRate, &self.hour_refund_rate),
            (InputField::MonthGmv, &self.month_gmv),
            (InputField::MonthSpend, &self.month_spend),
            (InputField::MonthRefundRate, &self.month_refund_rate),
            (
                InputField::MonthExpectedRefundRate,
                &self.month_expected_refund_rate,
            ),
            (InputField::TargetFeeRate, &self.target_fee_rate),
            (InputField::TargetRefundRate, &self.target_refund_rate),
        ];

        let mut inputs = Inputs::default();
        for (field, value) in flags {
            if let Some(text) = value {
                inputs.set(field, text.as_str());
            }
        }
        inputs
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

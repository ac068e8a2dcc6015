pub mod calc;
pub mod compose;
pub mod parse;
pub mod policy;
pub mod present;
pub mod validate;

pub use calc::{CalcValue, DivideReasons, divide, net_amount};
pub use compose::{MetricSheet, Window, compose};
pub use parse::{parse_money, parse_rate};
pub use policy::{BaseMode, default_blank_rate, select_base_window};
pub use present::{DisplayPair, present};

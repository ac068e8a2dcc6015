pub mod commands;
pub mod contracts;
pub mod error;
pub mod inputs;
pub mod metrics;
pub mod migrations;
pub mod scenario;
pub mod state;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use inputs::{InputField, Inputs};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

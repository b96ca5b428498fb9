pub mod commands;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod session;
pub mod source;
pub mod state;
pub mod store;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod commands;
pub mod contracts;
pub mod date;
pub mod error;
pub mod home;
pub mod migrations;
pub mod model;
pub mod report;
pub mod screen;
pub mod session;
pub mod setup;
pub mod store;
pub mod validate;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

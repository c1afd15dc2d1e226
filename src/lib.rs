pub mod calc;
pub mod cli;
pub mod config;
pub mod loan;
pub mod logging;
pub mod server;

pub use calc::{calculate, InterestRequest, InterestResult, ValidationError};
pub use server::InterestServer;

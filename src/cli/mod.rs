pub mod commands;

pub use commands::{CliArgs, Commands, EstimateArgs, ScanArgs, ValidateNameArgs};

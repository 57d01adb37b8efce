pub mod argument;
pub mod command;
pub mod config;
pub mod error;

pub use argument::StreamArgumentParser;
pub use argument::StreamTarget;
pub use command::Command;
pub use command::IntegerKind;
pub use config::InspectConfig;
pub use error::InspectError;

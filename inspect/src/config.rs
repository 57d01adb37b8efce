use serde::{ Deserialize, Serialize };
use std::path::Path;

use crate::InspectError;

/// Configuration read from a `.toml` file. Every field has a default, so an empty file (or no file at all) is valid.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct InspectConfig {
	pub stream: StreamConfig,
}

/// How stream arguments are opened.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StreamConfig {
	/// Mode used by commands that only read.
	pub read_mode: String,
	/// Mode used by commands that write.
	pub write_mode: String,
	/// Buffer size hint passed to the stream. Unset or `0` means unbuffered.
	pub buffer_size: Option<usize>,
}

impl Default for StreamConfig {
	fn default() -> Self {
		StreamConfig {
			read_mode: String::from("rb"),
			write_mode: String::from("r+b"),
			buffer_size: None,
		}
	}
}

impl InspectConfig {
	pub fn from_toml(contents: &str) -> Result<InspectConfig, InspectError> {
		Ok(toml::from_str::<InspectConfig>(contents)?)
	}

	/// Parse a TOML config file. A missing `file_name` gives the default configuration.
	pub fn read_file(file_name: Option<&Path>) -> Result<InspectConfig, InspectError> {
		let Some(file_name) = file_name else {
			return Ok(InspectConfig::default());
		};

		let contents = std::fs::read_to_string(file_name)?;
		log::debug!("loaded config from {}", file_name.display());

		InspectConfig::from_toml(&contents)
	}
}

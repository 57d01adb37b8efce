use streams::StreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
	#[error(transparent)]
	Stream(#[from] StreamError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("could not parse config: {0}")]
	Config(#[from] toml::de::Error),

	/// `-` was given for a stream whose mode neither reads nor writes.
	#[error("argument \"-\" with mode '{0}'")]
	StandardStreamMode(String),

	#[error("invalid value '{0}'")]
	InvalidValue(String),
}

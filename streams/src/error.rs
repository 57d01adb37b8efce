use std::io::SeekFrom;

use thiserror::Error;

/// Errors emitted by `BinaryCursor` operations. None of these are recovered from inside the cursor, they are always
/// handed back to the caller.
#[derive(Debug, Error)]
pub enum StreamError {
	/// A fixed-width read found fewer bytes than it needed. The cursor is left where the read started.
	#[error("truncated read: needed {needed} bytes, only {available} available")]
	TruncatedRead {
		needed: usize,
		available: usize,
	},
	/// `read_until_zero` hit the end of the stream before finding a terminator.
	#[error("unterminated string: reached end of stream after {read} bytes")]
	UnterminatedString {
		read: usize,
	},
	/// Value passed to a fixed-width write does not fit in the target width.
	#[error("value {value} does not fit in {width} byte(s)")]
	EncodingOverflow {
		value: String,
		width: usize,
	},
	#[error("could not seek to {target:?}: {source}")]
	SeekOutOfRange {
		target: SeekFrom,
		source: std::io::Error,
	},
	#[error(transparent)]
	ResourceError(#[from] std::io::Error),
	#[error("invalid open mode '{0}'")]
	InvalidMode(String),
	/// The body of a peek failed, and so did seeking back to the saved offset.
	#[error("{original} (additionally, restoring offset {saved} failed: {restore})")]
	RestoreFailed {
		original: Box<StreamError>,
		saved: u64,
		restore: Box<StreamError>,
	},
}

impl StreamError {
	/// Whether this error describes running out of data, including unterminated strings.
	pub fn is_truncation(&self) -> bool {
		matches!(self, StreamError::TruncatedRead { .. } | StreamError::UnterminatedString { .. })
	}
}

use std::io::{ Read, Seek, };

use crate::{ BinaryCursor, StreamError, };

/// Describes a stream that can have an end.
pub trait Endable {
	/// Whether there is nothing left to read. Does not move the stream's position.
	fn is_at_end(&mut self) -> Result<bool, StreamError>;
}

impl<S: Read + Seek> Endable for BinaryCursor<S> {
	fn is_at_end(&mut self) -> Result<bool, StreamError> {
		let mut buffer = [0];
		let bytes_read = self.get_mut().read(&mut buffer)?;

		if bytes_read == 0 {
			return Ok(true);
		} else {
			self.skip(-1)?;
			return Ok(false);
		}
	}
}

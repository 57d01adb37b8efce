use std::io::{ ErrorKind, Read, Seek, SeekFrom, Write, };

use crate::{ Decode, Encode, StreamError, };
use crate::byte_order::{ ByteOrder, FixedWidth, MAX_WIDTH, };
use crate::u8_io::{ U8ReadStream, U8WriteStream, };

/// Byte cursor over a seekable stream. Adds fixed-width integer codecs, null-terminated/read-to-end string extraction
/// and scoped peeking (see `PeekGuard`) on top of the stream, and forwards a small set of raw operations to it.
///
/// The cursor owns its stream. Dropping the cursor drops (and therefore closes) the stream; use `close` to find out
/// whether the final flush succeeded.
#[derive(Debug)]
pub struct BinaryCursor<S> {
	stream: S,
}

impl<S> BinaryCursor<S> {
	pub fn new(stream: S) -> Self {
		BinaryCursor {
			stream,
		}
	}

	pub fn get_ref(&self) -> &S {
		&self.stream
	}

	pub fn get_mut(&mut self) -> &mut S {
		&mut self.stream
	}

	/// Gives the stream back without flushing it.
	pub fn into_inner(self) -> S {
		self.stream
	}

	/// Use the `Decode` trait to decode an object out of the stream.
	pub fn decode<T: Decode<S>>(&mut self) -> Result<T, StreamError> {
		T::decode(self)
	}

	/// Use the `Encode` trait to encode an object into the stream.
	pub fn encode<T: Encode<S>>(&mut self, object: &T) -> Result<(), StreamError> {
		object.encode(self)
	}
}

impl<S: Seek> BinaryCursor<S> {
	/// Moves the cursor `bytes` forward (or backward, if negative) relative to the current position.
	pub fn skip(&mut self, bytes: i64) -> Result<(), StreamError> {
		self.seek(SeekFrom::Current(bytes))?;
		Ok(())
	}

	pub fn seek(&mut self, target: SeekFrom) -> Result<u64, StreamError> {
		self.stream.seek(target).map_err(|source| match source.kind() {
			// the stream refused the position, anything else is an i/o fault passed through as is
			ErrorKind::InvalidInput => StreamError::SeekOutOfRange {
				target,
				source,
			},
			_ => StreamError::ResourceError(source),
		})
	}

	/// Current offset in the stream.
	pub fn tell(&mut self) -> Result<u64, StreamError> {
		Ok(self.stream.stream_position()?)
	}

	/// Moves back to `position` after a failed read, so no partially read value is consumed. Errors from this seek
	/// are chained onto the read error, since the caller can no longer trust the offset.
	fn rewind_to(&mut self, position: u64, error: StreamError) -> StreamError {
		match self.seek(SeekFrom::Start(position)) {
			Ok(_) => error,
			Err(restore) => StreamError::RestoreFailed {
				original: Box::new(error),
				saved: position,
				restore: Box::new(restore),
			},
		}
	}
}

impl<S: Read> BinaryCursor<S> {
	/// Raw read, forwarded to the stream. May return fewer bytes than requested.
	pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StreamError> {
		Ok(self.stream.read(buffer)?)
	}

	/// Reads until `buffer` is full or the stream is exhausted, returning how many bytes were read.
	fn fill(&mut self, buffer: &mut [u8]) -> Result<usize, StreamError> {
		let mut read = 0;
		while read < buffer.len() {
			match self.stream.read(&mut buffer[read..]) {
				Ok(0) => break,
				Ok(length) => read += length,
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(error.into()),
			}
		}

		Ok(read)
	}
}

impl<S: Write> BinaryCursor<S> {
	/// Raw write, forwarded to the stream. May write fewer bytes than given.
	pub fn write(&mut self, buffer: &[u8]) -> Result<usize, StreamError> {
		Ok(self.stream.write(buffer)?)
	}

	pub fn flush(&mut self) -> Result<(), StreamError> {
		Ok(self.stream.flush()?)
	}

	/// Flushes and releases the stream. The stream is closed when it is dropped at the end of this call.
	pub fn close(mut self) -> Result<(), StreamError> {
		self.flush()
	}
}

impl<S: Read + Seek> U8ReadStream for BinaryCursor<S> {
	fn read_fixed<T: FixedWidth>(&mut self, order: ByteOrder) -> Result<T, StreamError> {
		let start = self.tell()?;

		let mut buffer = [0; MAX_WIDTH];
		let buffer = &mut buffer[..T::WIDTH];
		let read = match self.fill(buffer) {
			Ok(read) => read,
			Err(error) => return Err(self.rewind_to(start, error)),
		};

		if read < T::WIDTH {
			let error = StreamError::TruncatedRead {
				needed: T::WIDTH,
				available: read,
			};

			return Err(self.rewind_to(start, error));
		}

		Ok(T::decode(buffer, order))
	}

	fn read_until_zero(&mut self) -> Result<Vec<u8>, StreamError> {
		let start = self.tell()?;

		let mut output = Vec::new();
		let mut byte = [0];
		loop {
			// a zero length read means the stream is exhausted, checked before comparing against the terminator
			let read = match self.fill(&mut byte) {
				Ok(read) => read,
				Err(error) => return Err(self.rewind_to(start, error)),
			};

			if read == 0 {
				let error = StreamError::UnterminatedString {
					read: output.len(),
				};

				return Err(self.rewind_to(start, error));
			}

			if byte[0] == 0 {
				break;
			}

			output.push(byte[0]);
		}

		log::trace!("read {} byte string at offset {}", output.len(), start);

		Ok(output)
	}

	fn read_until_end(&mut self) -> Result<Vec<u8>, StreamError> {
		let mut output = Vec::new();
		self.stream.read_to_end(&mut output)?;
		Ok(output)
	}
}

impl<S: Write> U8WriteStream for BinaryCursor<S> {
	fn write_fixed<T: FixedWidth>(&mut self, number: T, order: ByteOrder) -> Result<(), StreamError> {
		let mut buffer = [0; MAX_WIDTH];
		let buffer = &mut buffer[..T::WIDTH];
		number.encode(buffer, order);

		self.stream.write_all(buffer)?;
		Ok(())
	}
}

/// std::io::Read implementation so we can pass the cursor to things expecting a std reader
impl<S: Read> Read for BinaryCursor<S> {
	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		self.stream.read(buffer)
	}
}

/// std::io::Write implementation so we can pass the cursor to things expecting a std writer
impl<S: Write> Write for BinaryCursor<S> {
	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		self.stream.write(buffer)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		self.stream.flush()
	}
}

/// std::io::Seek implementation so we can pass the cursor to things expecting a seekable stream
impl<S: Seek> Seek for BinaryCursor<S> {
	fn seek(&mut self, position: SeekFrom) -> std::io::Result<u64> {
		self.stream.seek(position)
	}
}

use crate::{ BinaryCursor, StreamError, };

/// Decode an object out of a cursor. This is the extension point for format parsers built on top of `BinaryCursor`.
pub trait Decode<Stream>: Sized {
	fn decode(cursor: &mut BinaryCursor<Stream>) -> Result<Self, StreamError>;
}

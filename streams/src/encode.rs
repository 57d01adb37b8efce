use crate::{ BinaryCursor, StreamError, };

/// Encode an object into a cursor.
pub trait Encode<Stream> {
	fn encode(&self, cursor: &mut BinaryCursor<Stream>) -> Result<(), StreamError>;
}

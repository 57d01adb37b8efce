use crate::StreamError;
use crate::byte_order::{ ByteOrder, FixedWidth, };

/// Expands into one fixed-width read per (name, width, order) triple, all routed through `read_fixed`.
macro_rules! read_methods {
	($($(#[$meta:meta])* $name:ident => $number:ty, $order:expr;)*) => {
		$(
			$(#[$meta])*
			fn $name(&mut self) -> Result<$number, StreamError> {
				self.read_fixed::<$number>($order)
			}
		)*
	};
}

/// Trait for a stream that implements byte-exact reading. Implementors only supply `read_fixed` and the two string
/// reads, every width/order combination is derived from `read_fixed`.
pub trait U8ReadStream {
	/// Reads exactly `T::WIDTH` bytes and decodes them in the given order. Fails with `StreamError::TruncatedRead` if
	/// the stream runs out, without consuming anything.
	fn read_fixed<T: FixedWidth>(&mut self, order: ByteOrder) -> Result<T, StreamError>;

	/// Reads bytes up to and including a `0x00` terminator. The terminator is not part of the returned buffer.
	fn read_until_zero(&mut self) -> Result<Vec<u8>, StreamError>;

	/// Reads everything between the current position and the end of the stream.
	fn read_until_end(&mut self) -> Result<Vec<u8>, StreamError>;

	read_methods! {
		/// Reads one byte.
		read_u8 => u8, ByteOrder::Little;
		/// Reads two bytes in little-endian format.
		read_u16_le => u16, ByteOrder::Little;
		/// Reads two bytes in big-endian format.
		read_u16_be => u16, ByteOrder::Big;
		/// Reads four bytes in little-endian format.
		read_u32_le => u32, ByteOrder::Little;
		/// Reads four bytes in big-endian format.
		read_u32_be => u32, ByteOrder::Big;
		/// Reads eight bytes in little-endian format.
		read_u64_le => u64, ByteOrder::Little;
		/// Reads eight bytes in big-endian format.
		read_u64_be => u64, ByteOrder::Big;
	}
}

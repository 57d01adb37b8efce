use std::fmt::Display;

use crate::StreamError;
use crate::byte_order::{ ByteOrder, FixedWidth, };

/// Expands into one fixed-width write per (name, width, order) triple. Values are range checked before anything is
/// handed to `write_fixed`, so an overflowing value never produces a partial write.
macro_rules! write_methods {
	($($(#[$meta:meta])* $name:ident => $number:ty, $order:expr;)*) => {
		$(
			$(#[$meta])*
			fn $name<V>(&mut self, value: V) -> Result<(), StreamError>
			where
				V: TryInto<$number> + Copy + Display,
			{
				let Ok(number) = TryInto::<$number>::try_into(value) else {
					return Err(StreamError::EncodingOverflow {
						value: value.to_string(),
						width: <$number as FixedWidth>::WIDTH,
					});
				};

				self.write_fixed::<$number>(number, $order)
			}
		)*
	};
}

/// Trait for a stream that implements byte-exact writing. Implementors only supply `write_fixed`.
pub trait U8WriteStream {
	/// Encodes `number` into exactly `T::WIDTH` bytes in the given order and writes them.
	fn write_fixed<T: FixedWidth>(&mut self, number: T, order: ByteOrder) -> Result<(), StreamError>;

	write_methods! {
		/// Writes one byte.
		write_u8 => u8, ByteOrder::Little;
		/// Writes two bytes in little-endian format.
		write_u16_le => u16, ByteOrder::Little;
		/// Writes two bytes in big-endian format.
		write_u16_be => u16, ByteOrder::Big;
		/// Writes four bytes in little-endian format.
		write_u32_le => u32, ByteOrder::Little;
		/// Writes four bytes in big-endian format.
		write_u32_be => u32, ByteOrder::Big;
		/// Writes eight bytes in little-endian format.
		write_u64_le => u64, ByteOrder::Little;
		/// Writes eight bytes in big-endian format.
		write_u64_be => u64, ByteOrder::Big;
	}
}

/// Byte order used by a multi-byte codec operation. There is no native order, every operation picks one explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
	/// Least significant byte first.
	Little,
	/// Most significant byte first.
	Big,
}

/// Largest width supported by `FixedWidth`, used to size scratch buffers.
pub const MAX_WIDTH: usize = 8;

/// Unsigned integer with a fixed wire width.
pub trait FixedWidth: Copy + Sized {
	/// Number of bytes this integer occupies in a stream.
	const WIDTH: usize;

	/// Decodes from exactly `WIDTH` bytes.
	fn decode(bytes: &[u8], order: ByteOrder) -> Self;

	/// Encodes into exactly `WIDTH` bytes.
	fn encode(self, bytes: &mut [u8], order: ByteOrder);
}

macro_rules! impl_fixed_width {
	($($number:ty),*) => {
		$(
			impl FixedWidth for $number {
				const WIDTH: usize = std::mem::size_of::<$number>();

				fn decode(bytes: &[u8], order: ByteOrder) -> Self {
					let mut buffer = [0; std::mem::size_of::<$number>()];
					buffer.copy_from_slice(&bytes[..Self::WIDTH]);

					match order {
						ByteOrder::Little => <$number>::from_le_bytes(buffer),
						ByteOrder::Big => <$number>::from_be_bytes(buffer),
					}
				}

				fn encode(self, bytes: &mut [u8], order: ByteOrder) {
					let buffer = match order {
						ByteOrder::Little => self.to_le_bytes(),
						ByteOrder::Big => self.to_be_bytes(),
					};

					bytes[..Self::WIDTH].copy_from_slice(&buffer);
				}
			}
		)*
	};
}

impl_fixed_width!(u8, u16, u32, u64);

pub mod binary_cursor;
pub mod byte_order;
pub mod decode;
pub mod encode;
pub mod endable;
pub mod error;
pub mod file_stream;
pub mod peek;
pub mod u8_io;

pub use binary_cursor::BinaryCursor;
pub use byte_order::ByteOrder;
pub use byte_order::FixedWidth;
pub use decode::Decode;
pub use encode::Encode;
pub use endable::Endable;
pub use error::StreamError;
pub use file_stream::FileStream;
pub use file_stream::OpenKind;
pub use file_stream::OpenMode;
pub use peek::PeekGuard;

use std::fmt;
use std::fs::{ File, OpenOptions, };
use std::io::{ BufReader, BufWriter, Cursor, ErrorKind, Read, Seek, SeekFrom, Write, };
use std::path::Path;
use std::str::FromStr;

use crate::{ BinaryCursor, StreamError, };

/// What an `OpenMode` does to the file, from its leading character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpenKind {
	/// `r`: the file must exist.
	Read,
	/// `w`: create or truncate.
	Write,
	/// `a`: create if needed, writes go to the end.
	Append,
	/// `x`: the file must not exist yet.
	Create,
}

/// Host-style open mode, e.g. `rb`, `r+b`, `wb`, `ab`, `xb`. Exactly one of `r`, `w`, `a`, `x`, optionally followed by
/// `+` (read and write) and `b`. Text mode (`t`) is rejected since cursors are binary only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenMode {
	mode: String,
	kind: OpenKind,
	read: bool,
	write: bool,
	append: bool,
	create: bool,
	create_new: bool,
	truncate: bool,
}

impl OpenMode {
	pub fn kind(&self) -> OpenKind {
		self.kind
	}

	pub fn reads(&self) -> bool {
		self.read
	}

	pub fn writes(&self) -> bool {
		self.write
	}

	pub fn as_str(&self) -> &str {
		&self.mode
	}

	fn options(&self) -> OpenOptions {
		let mut options = OpenOptions::new();
		options
			.read(self.read)
			.write(self.write && !self.append)
			.append(self.append)
			.create(self.create)
			.create_new(self.create_new)
			.truncate(self.truncate);
		options
	}
}

impl FromStr for OpenMode {
	type Err = StreamError;

	fn from_str(mode: &str) -> Result<Self, Self::Err> {
		let invalid = || StreamError::InvalidMode(mode.to_string());

		let mut primary = None;
		let mut update = false;
		let mut binary = false;
		for character in mode.chars() {
			match character {
				'r' | 'w' | 'a' | 'x' if primary.is_none() => primary = Some(character),
				'+' if !update => update = true,
				'b' if !binary => binary = true,
				_ => return Err(invalid()),
			}
		}

		let kind = match primary.ok_or_else(invalid)? {
			'r' => OpenKind::Read,
			'w' => OpenKind::Write,
			'a' => OpenKind::Append,
			_ => OpenKind::Create,
		};

		let mut open_mode = OpenMode {
			mode: mode.to_string(),
			kind,
			read: update,
			write: update,
			append: false,
			create: false,
			create_new: false,
			truncate: false,
		};

		match kind {
			OpenKind::Read => open_mode.read = true,
			OpenKind::Write => {
				open_mode.write = true;
				open_mode.create = true;
				open_mode.truncate = true;
			},
			OpenKind::Append => {
				open_mode.write = true;
				open_mode.append = true;
				open_mode.create = true;
			},
			OpenKind::Create => {
				open_mode.write = true;
				open_mode.create_new = true;
			},
		}

		Ok(open_mode)
	}
}

impl fmt::Display for OpenMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.mode)
	}
}

/// Stream a `BinaryCursor` opened by path (or staged in memory) runs on top of. The buffered variants only go one way,
/// operations in the other direction fail with `ErrorKind::Unsupported`.
#[derive(Debug)]
pub enum FileStream {
	Direct(File),
	BufferedRead(BufReader<File>),
	BufferedWrite(BufWriter<File>),
	Memory(Cursor<Vec<u8>>),
}

impl FileStream {
	/// Bytes held by a `Memory` stream.
	pub fn memory_contents(&self) -> Option<&[u8]> {
		match self {
			FileStream::Memory(cursor) => Some(cursor.get_ref()),
			_ => None,
		}
	}
}

fn unsupported(operation: &str) -> std::io::Error {
	std::io::Error::new(ErrorKind::Unsupported, format!("{} is not supported by this stream's mode", operation))
}

impl Read for FileStream {
	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		match self {
			FileStream::Direct(file) => file.read(buffer),
			FileStream::BufferedRead(reader) => reader.read(buffer),
			FileStream::BufferedWrite(_) => Err(unsupported("reading")),
			FileStream::Memory(cursor) => cursor.read(buffer),
		}
	}
}

impl Write for FileStream {
	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		match self {
			FileStream::Direct(file) => file.write(buffer),
			FileStream::BufferedRead(_) => Err(unsupported("writing")),
			FileStream::BufferedWrite(writer) => writer.write(buffer),
			FileStream::Memory(cursor) => cursor.write(buffer),
		}
	}

	fn flush(&mut self) -> std::io::Result<()> {
		match self {
			FileStream::Direct(file) => file.flush(),
			FileStream::BufferedRead(_) => Ok(()),
			FileStream::BufferedWrite(writer) => writer.flush(),
			FileStream::Memory(cursor) => cursor.flush(),
		}
	}
}

impl Seek for FileStream {
	fn seek(&mut self, position: SeekFrom) -> std::io::Result<u64> {
		match self {
			FileStream::Direct(file) => file.seek(position),
			FileStream::BufferedRead(reader) => reader.seek(position),
			FileStream::BufferedWrite(writer) => writer.seek(position),
			FileStream::Memory(cursor) => cursor.seek(position),
		}
	}
}

impl BinaryCursor<FileStream> {
	/// Opens `path` with `mode`. Errors from the open call are handed back unchanged as `StreamError::ResourceError`.
	///
	/// `buffer_size` is a hint: a non-zero size buffers read-only and write-only modes, update modes stay unbuffered.
	pub fn open<P: AsRef<Path>>(path: P, mode: &OpenMode, buffer_size: Option<usize>) -> Result<Self, StreamError> {
		let path = path.as_ref();
		let file = mode.options().open(path)?;

		let stream = match buffer_size.filter(|size| *size > 0) {
			None => FileStream::Direct(file),
			Some(size) if mode.reads() && !mode.writes() => {
				FileStream::BufferedRead(BufReader::with_capacity(size, file))
			},
			Some(size) if mode.writes() && !mode.reads() => {
				FileStream::BufferedWrite(BufWriter::with_capacity(size, file))
			},
			Some(size) => {
				log::debug!("ignoring buffer size {} for update mode '{}'", size, mode);
				FileStream::Direct(file)
			},
		};

		log::debug!("opened {} with mode '{}'", path.display(), mode);

		Ok(BinaryCursor::new(stream))
	}

	/// In-memory stream, positioned at the start of `bytes`.
	pub fn memory(bytes: Vec<u8>) -> Self {
		BinaryCursor::new(FileStream::Memory(Cursor::new(bytes)))
	}
}

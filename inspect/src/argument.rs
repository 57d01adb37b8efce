use std::fmt;
use std::io::{ Read, Write, };
use std::path::PathBuf;

use streams::{ BinaryCursor, FileStream, OpenKind, OpenMode, };

use crate::InspectError;

/// Where a stream argument points.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StreamTarget {
	Stdin,
	Stdout,
	Path(PathBuf),
}

/// Turns a command line token into a stream. The special token `-` means standard input for `r` modes and standard
/// output for `w` modes (append and exclusive-create modes have no standard stream), every other token is a file name
/// opened with the configured mode and buffer size.
///
/// Standard streams cannot seek, so they are staged in memory: standard input is read completely when opened, and
/// bytes written to standard output are emitted by `finish`.
#[derive(Clone, Debug)]
pub struct StreamArgumentParser {
	mode: OpenMode,
	buffer_size: Option<usize>,
}

impl StreamArgumentParser {
	pub fn new(mode: OpenMode, buffer_size: Option<usize>) -> Self {
		StreamArgumentParser {
			mode,
			buffer_size,
		}
	}

	pub fn mode(&self) -> &OpenMode {
		&self.mode
	}

	pub fn parse(&self, argument: &str) -> Result<StreamTarget, InspectError> {
		if argument != "-" {
			return Ok(StreamTarget::Path(PathBuf::from(argument)));
		}

		match self.mode.kind() {
			OpenKind::Read => Ok(StreamTarget::Stdin),
			OpenKind::Write => Ok(StreamTarget::Stdout),
			OpenKind::Append | OpenKind::Create => Err(InspectError::StandardStreamMode(self.mode.to_string())),
		}
	}

	pub fn open(&self, target: &StreamTarget) -> Result<BinaryCursor<FileStream>, InspectError> {
		self.open_from(target, &mut std::io::stdin().lock())
	}

	/// `open`, with `stdin` standing in for standard input.
	pub fn open_from<R: Read>(
		&self,
		target: &StreamTarget,
		stdin: &mut R,
	) -> Result<BinaryCursor<FileStream>, InspectError> {
		match target {
			StreamTarget::Stdin => {
				let mut bytes = Vec::new();
				stdin.read_to_end(&mut bytes)?;
				log::debug!("staged {} bytes from standard input", bytes.len());
				Ok(BinaryCursor::memory(bytes))
			},
			StreamTarget::Stdout => Ok(BinaryCursor::memory(Vec::new())),
			StreamTarget::Path(path) => Ok(BinaryCursor::open(path, &self.mode, self.buffer_size)?),
		}
	}

	/// Flushes and closes a stream opened by this parser. Standard output (and standard input opened for update) gets
	/// the staged bytes.
	pub fn finish(&self, target: &StreamTarget, cursor: BinaryCursor<FileStream>) -> Result<(), InspectError> {
		self.finish_into(target, cursor, &mut std::io::stdout().lock())
	}

	/// `finish`, with `stdout` standing in for standard output.
	pub fn finish_into<W: Write>(
		&self,
		target: &StreamTarget,
		cursor: BinaryCursor<FileStream>,
		stdout: &mut W,
	) -> Result<(), InspectError> {
		// standard input opened for update acts as a filter, the patched bytes go to standard output
		let emit = match target {
			StreamTarget::Stdout => true,
			StreamTarget::Stdin => self.mode.writes(),
			StreamTarget::Path(_) => false,
		};

		if emit {
			if let Some(bytes) = cursor.get_ref().memory_contents() {
				stdout.write_all(bytes)?;
				stdout.flush()?;
			}
		}

		cursor.close()?;
		Ok(())
	}
}

impl fmt::Display for StreamArgumentParser {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.buffer_size {
			Some(size) => write!(f, "StreamArgumentParser({:?}, {})", self.mode.as_str(), size),
			None => write!(f, "StreamArgumentParser({:?})", self.mode.as_str()),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use streams::u8_io::{ U8ReadStream, U8WriteStream, };
	use tempdir::TempDir;

	use super::{ StreamArgumentParser, StreamTarget, };
	use crate::InspectError;

	fn parser(mode: &str) -> StreamArgumentParser {
		StreamArgumentParser::new(mode.parse().expect("Could not parse mode"), None)
	}

	#[test]
	fn dash_maps_to_standard_streams() {
		assert_eq!(parser("rb").parse("-").expect("Could not parse"), StreamTarget::Stdin);
		assert_eq!(parser("r+b").parse("-").expect("Could not parse"), StreamTarget::Stdin);
		assert_eq!(parser("wb").parse("-").expect("Could not parse"), StreamTarget::Stdout);
		assert_eq!(parser("w+b").parse("-").expect("Could not parse"), StreamTarget::Stdout);
	}

	#[test]
	fn dash_without_standard_stream() {
		for mode in ["ab", "a+", "xb"] {
			match parser(mode).parse("-") {
				Err(InspectError::StandardStreamMode(text)) => assert_eq!(text, mode),
				other => panic!("expected a configuration error for '{}', got {:?}", mode, other),
			}
		}

		// files are still fine
		assert!(parser("ab").parse("log.bin").is_ok());
	}

	#[test]
	fn other_tokens_are_paths() {
		assert_eq!(
			parser("rb").parse("data/file.bin").expect("Could not parse"),
			StreamTarget::Path(PathBuf::from("data/file.bin"))
		);
		assert_eq!(parser("rb").parse("--").expect("Could not parse"), StreamTarget::Path(PathBuf::from("--")));
	}

	#[test]
	fn display() {
		assert_eq!(parser("rb").to_string(), "StreamArgumentParser(\"rb\")");

		let buffered = StreamArgumentParser::new("wb".parse().expect("Could not parse mode"), Some(4096));
		assert_eq!(buffered.to_string(), "StreamArgumentParser(\"wb\", 4096)");
	}

	#[test]
	fn stdin_is_staged() {
		let parser = parser("rb");
		let mut stdin: &[u8] = &[0x00, 0x2A, 0xFF];

		let mut cursor = parser.open_from(&StreamTarget::Stdin, &mut stdin).expect("Could not open");
		cursor.skip(1).expect("Could not skip");
		assert_eq!(cursor.read_u16_be().expect("Could not read u16"), 0x2AFF);
	}

	#[test]
	fn stdout_is_emitted_on_finish() {
		let parser = parser("wb");
		let target = parser.parse("-").expect("Could not parse");

		let mut cursor = parser.open_from(&target, &mut std::io::empty()).expect("Could not open");
		cursor.write_u32_le(0x6463_6261).expect("Could not write u32");

		let mut stdout = Vec::new();
		parser.finish_into(&target, cursor, &mut stdout).expect("Could not finish");
		assert_eq!(stdout, b"abcd");
	}

	#[test]
	fn stdin_update_is_a_filter() {
		let parser = parser("r+b");
		let target = parser.parse("-").expect("Could not parse");
		let mut stdin: &[u8] = b"xyz";

		let mut cursor = parser.open_from(&target, &mut stdin).expect("Could not open");
		cursor.skip(1).expect("Could not skip");
		cursor.write_u8(b'Y').expect("Could not write u8");

		let mut stdout = Vec::new();
		parser.finish_into(&target, cursor, &mut stdout).expect("Could not finish");
		assert_eq!(stdout, b"xYz");

		// read-only standard input is never echoed
		let parser = StreamArgumentParser::new("rb".parse().expect("Could not parse mode"), None);
		let mut stdin: &[u8] = b"xyz";
		let cursor = parser.open_from(&target, &mut stdin).expect("Could not open");

		let mut stdout = Vec::new();
		parser.finish_into(&target, cursor, &mut stdout).expect("Could not finish");
		assert!(stdout.is_empty());
	}

	#[test]
	fn paths_use_mode() {
		let directory = TempDir::new("inspect").expect("Could not create temporary directory");
		let path = directory.path().join("out.bin");
		let path_argument = path.to_str().expect("Could not convert path");

		let writer = StreamArgumentParser::new("wb".parse().expect("Could not parse mode"), Some(16));
		let target = writer.parse(path_argument).expect("Could not parse");
		let mut cursor = writer.open(&target).expect("Could not open");
		cursor.write_u8(9).expect("Could not write u8");
		writer.finish(&target, cursor).expect("Could not finish");

		let reader = parser("rb");
		let target = reader.parse(path_argument).expect("Could not parse");
		let mut cursor = reader.open(&target).expect("Could not open");
		assert_eq!(cursor.read_u8().expect("Could not read u8"), 9);

		// read-only mode refuses to create a missing file
		let missing = reader.parse("/nonexistent/missing.bin").expect("Could not parse");
		assert!(matches!(reader.open(&missing), Err(InspectError::Stream(_))));
	}
}

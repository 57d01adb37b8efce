use std::io::{ Read, Seek, SeekFrom, Write, };

use clap::{ Subcommand, ValueEnum, };
use streams::{ BinaryCursor, OpenMode, StreamError, };
use streams::u8_io::{ U8ReadStream, U8WriteStream, };

use crate::{ InspectConfig, InspectError, StreamArgumentParser, };

/// Bytes per line in `dump` output.
const DUMP_WIDTH: usize = 16;

/// Fixed-width integer layouts the command line can read and write.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum IntegerKind {
	U8,
	U16Le,
	U16Be,
	U32Le,
	U32Be,
	U64Le,
	U64Be,
}

impl IntegerKind {
	pub fn width(self) -> usize {
		match self {
			IntegerKind::U8 => 1,
			IntegerKind::U16Le | IntegerKind::U16Be => 2,
			IntegerKind::U32Le | IntegerKind::U32Be => 4,
			IntegerKind::U64Le | IntegerKind::U64Be => 8,
		}
	}

	pub fn read<S: Read + Seek>(self, cursor: &mut BinaryCursor<S>) -> Result<u64, StreamError> {
		Ok(match self {
			IntegerKind::U8 => cursor.read_u8()? as u64,
			IntegerKind::U16Le => cursor.read_u16_le()? as u64,
			IntegerKind::U16Be => cursor.read_u16_be()? as u64,
			IntegerKind::U32Le => cursor.read_u32_le()? as u64,
			IntegerKind::U32Be => cursor.read_u32_be()? as u64,
			IntegerKind::U64Le => cursor.read_u64_le()?,
			IntegerKind::U64Be => cursor.read_u64_be()?,
		})
	}

	pub fn write<S: Write>(self, cursor: &mut BinaryCursor<S>, value: u64) -> Result<(), StreamError> {
		match self {
			IntegerKind::U8 => cursor.write_u8(value),
			IntegerKind::U16Le => cursor.write_u16_le(value),
			IntegerKind::U16Be => cursor.write_u16_be(value),
			IntegerKind::U32Le => cursor.write_u32_le(value),
			IntegerKind::U32Be => cursor.write_u32_be(value),
			IntegerKind::U64Le => cursor.write_u64_le(value),
			IntegerKind::U64Be => cursor.write_u64_be(value),
		}
	}
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Read a fixed-width integer
	Read {
		/// File to read, or "-" for standard input
		input: String,
		#[clap(value_enum)]
		kind: IntegerKind,
		/// Read at this offset instead of the start of the stream
		#[clap(long)]
		at: Option<u64>,
	},
	/// Read a null-terminated string
	Cstring {
		/// File to read, or "-" for standard input
		input: String,
		#[clap(long)]
		at: Option<u64>,
	},
	/// Hex dump everything up to the end of the stream
	Dump {
		/// File to read, or "-" for standard input
		input: String,
		#[clap(long)]
		at: Option<u64>,
	},
	/// Write a fixed-width integer
	Write {
		/// File to write, or "-": standard output for `w` modes, standard input with the patched bytes echoed to
		/// standard output for `r+` modes
		output: String,
		#[clap(value_enum)]
		kind: IntegerKind,
		/// Decimal, or hexadecimal with a 0x prefix
		value: String,
		#[clap(long)]
		at: Option<u64>,
	},
}

/// Runs `body` at `at` if given (restoring the position afterwards), or at the current position otherwise.
pub fn at_offset<S, T, F>(cursor: &mut BinaryCursor<S>, at: Option<u64>, body: F) -> Result<T, StreamError>
where
	S: Seek,
	F: FnOnce(&mut BinaryCursor<S>) -> Result<T, StreamError>,
{
	match at {
		Some(offset) => cursor.peek_with(SeekFrom::Start(offset), body),
		None => body(cursor),
	}
}

pub fn parse_value(value: &str) -> Result<u64, InspectError> {
	let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16),
		None => value.parse::<u64>(),
	};

	parsed.map_err(|_| InspectError::InvalidValue(value.to_string()))
}

pub fn format_integer(value: u64, kind: IntegerKind) -> String {
	format!("{} (0x{:0width$X})", value, value, width = kind.width() * 2)
}

/// Classic hex dump: offset column, then up to 16 bytes per line.
pub fn format_dump(start: u64, bytes: &[u8]) -> String {
	let mut output = String::new();
	for (index, line) in bytes.chunks(DUMP_WIDTH).enumerate() {
		let offset = start + (index * DUMP_WIDTH) as u64;
		let hex = line.iter().map(|byte| format!("{:02x}", byte)).collect::<Vec<_>>().join(" ");
		output += &format!("{:08x}  {}\n", offset, hex);
	}

	output
}

impl Command {
	/// Executes the command, writing any report to `report`.
	pub fn execute<W: Write>(
		&self,
		config: &InspectConfig,
		buffer_size: Option<usize>,
		report: &mut W,
	) -> Result<(), InspectError> {
		let buffer_size = buffer_size.or(config.stream.buffer_size);

		let mode = match self {
			Command::Write { .. } => &config.stream.write_mode,
			_ => &config.stream.read_mode,
		};
		let parser = StreamArgumentParser::new(mode.parse::<OpenMode>()?, buffer_size);
		log::debug!("using {}", parser);

		let argument = match self {
			Command::Read { input, .. } | Command::Cstring { input, .. } | Command::Dump { input, .. } => input,
			Command::Write { output, .. } => output,
		};

		let target = parser.parse(argument)?;
		let mut cursor = parser.open(&target)?;

		match self {
			Command::Read { kind, at, .. } => {
				let value = at_offset(&mut cursor, *at, |cursor| kind.read(cursor))?;
				writeln!(report, "{}", format_integer(value, *kind))?;
			},
			Command::Cstring { at, .. } => {
				let string = at_offset(&mut cursor, *at, |cursor| cursor.read_until_zero())?;
				writeln!(report, "{}", String::from_utf8_lossy(&string))?;
			},
			Command::Dump { at, .. } => {
				let start = at.unwrap_or(0);
				let bytes = at_offset(&mut cursor, *at, |cursor| cursor.read_until_end())?;
				write!(report, "{}", format_dump(start, &bytes))?;
			},
			Command::Write { kind, value, at, .. } => {
				let value = parse_value(value)?;
				at_offset(&mut cursor, *at, |cursor| kind.write(cursor, value))?;
				log::info!("wrote {} as {:?}", value, kind);
			},
		}

		parser.finish(&target, cursor)
	}
}

#[cfg(test)]
mod tests {
	use streams::{ BinaryCursor, StreamError, };
	use tempdir::TempDir;

	use super::{ at_offset, format_dump, format_integer, parse_value, Command, IntegerKind, };
	use crate::{ InspectConfig, InspectError, };

	#[test]
	fn every_kind_reads_and_writes() {
		let kinds = [
			IntegerKind::U8,
			IntegerKind::U16Le,
			IntegerKind::U16Be,
			IntegerKind::U32Le,
			IntegerKind::U32Be,
			IntegerKind::U64Le,
			IntegerKind::U64Be,
		];

		for kind in kinds {
			let mut cursor = BinaryCursor::memory(Vec::new());
			kind.write(&mut cursor, 0x7F).expect("Could not write");
			assert_eq!(cursor.tell().expect("Could not tell"), kind.width() as u64);

			cursor.skip(-(kind.width() as i64)).expect("Could not skip");
			assert_eq!(kind.read(&mut cursor).expect("Could not read"), 0x7F);
		}
	}

	#[test]
	fn kind_write_range_checks() {
		let mut cursor = BinaryCursor::memory(Vec::new());
		let result = IntegerKind::U16Be.write(&mut cursor, 0x1_0000);
		assert!(matches!(result, Err(StreamError::EncodingOverflow { width: 2, .. })));
		assert!(IntegerKind::U64Le.write(&mut cursor, u64::MAX).is_ok());
	}

	#[test]
	fn at_offset_restores() {
		let mut cursor = BinaryCursor::memory(vec![1, 2, 3, 4]);
		cursor.skip(1).expect("Could not skip");

		let value = at_offset(&mut cursor, Some(3), |cursor| IntegerKind::U8.read(cursor)).expect("Could not read");
		assert_eq!(value, 4);
		assert_eq!(cursor.tell().expect("Could not tell"), 1);

		let value = at_offset(&mut cursor, None, |cursor| IntegerKind::U8.read(cursor)).expect("Could not read");
		assert_eq!(value, 2);
		assert_eq!(cursor.tell().expect("Could not tell"), 2);
	}

	#[test]
	fn values() {
		assert_eq!(parse_value("42").expect("Could not parse"), 42);
		assert_eq!(parse_value("0xff").expect("Could not parse"), 255);
		assert_eq!(parse_value("0XFF").expect("Could not parse"), 255);
		assert!(matches!(parse_value("-1"), Err(InspectError::InvalidValue(_))));
		assert!(matches!(parse_value("0xZZ"), Err(InspectError::InvalidValue(_))));
		assert!(matches!(parse_value("18446744073709551616"), Err(InspectError::InvalidValue(_))));
	}

	#[test]
	fn formatting() {
		assert_eq!(format_integer(255, IntegerKind::U16Be), "255 (0x00FF)");
		assert_eq!(format_integer(1, IntegerKind::U8), "1 (0x01)");

		let bytes = (0..18).collect::<Vec<u8>>();
		assert_eq!(
			format_dump(0x10, &bytes),
			"00000010  00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n00000020  10 11\n"
		);
		assert_eq!(format_dump(0, &[]), "");
	}

	#[test]
	fn execute_commands_on_file() {
		let directory = TempDir::new("inspect").expect("Could not create temporary directory");
		let path = directory.path().join("data.bin");
		std::fs::write(&path, b"\x00\x00\x00\x00name\x00tail").expect("Could not create file");
		let path = path.to_str().expect("Could not convert path").to_string();

		let config = InspectConfig::default();

		let write = Command::Write {
			output: path.clone(),
			kind: IntegerKind::U32Be,
			value: String::from("0xCAFEF00D"),
			at: None,
		};
		let mut report = Vec::new();
		write.execute(&config, None, &mut report).expect("Could not write");
		assert!(report.is_empty());

		let read = Command::Read {
			input: path.clone(),
			kind: IntegerKind::U32Be,
			at: None,
		};
		let mut report = Vec::new();
		read.execute(&config, Some(8), &mut report).expect("Could not read");
		assert_eq!(String::from_utf8(report).expect("Could not decode report"), "3405705229 (0xCAFEF00D)\n");

		let string = Command::Cstring {
			input: path.clone(),
			at: Some(4),
		};
		let mut report = Vec::new();
		string.execute(&config, None, &mut report).expect("Could not read string");
		assert_eq!(report, b"name\n");

		let dump = Command::Dump {
			input: path.clone(),
			at: Some(9),
		};
		let mut report = Vec::new();
		dump.execute(&config, None, &mut report).expect("Could not dump");
		assert_eq!(String::from_utf8(report).expect("Could not decode report"), "00000009  74 61 69 6c\n");

		// reading past the end is reported, not papered over
		let past_end = Command::Read {
			input: path,
			kind: IntegerKind::U64Le,
			at: Some(10),
		};
		let result = past_end.execute(&config, None, &mut Vec::new());
		assert!(matches!(result, Err(InspectError::Stream(StreamError::TruncatedRead { needed: 8, available: 3 }))));
	}

	#[test]
	fn execute_rejects_bad_mode() {
		let mut config = InspectConfig::default();
		config.stream.read_mode = String::from("rt");

		let read = Command::Read {
			input: String::from("whatever.bin"),
			kind: IntegerKind::U8,
			at: None,
		};
		let result = read.execute(&config, None, &mut Vec::new());
		assert!(matches!(result, Err(InspectError::Stream(StreamError::InvalidMode(_)))));
	}
}

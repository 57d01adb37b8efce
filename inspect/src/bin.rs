use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use inspect::{ Command, InspectConfig, InspectError, };

#[derive(Debug, Parser)]
#[clap(name = "inspectbin")]
#[clap(about = "Read and patch fixed-width values in binary files", long_about = None)]
struct Cli {
	/// TOML file with stream settings
	#[clap(long)]
	config: Option<PathBuf>,

	/// Buffer size hint, overrides the config file
	#[clap(long)]
	buffer_size: Option<usize>,

	#[clap(subcommand)]
	command: Command,
}

fn run(cli: &Cli) -> Result<(), InspectError> {
	let config = InspectConfig::read_file(cli.config.as_deref())?;
	cli.command.execute(&config, cli.buffer_size, &mut std::io::stdout().lock())
}

fn main() -> ExitCode {
	env_logger::init();

	let cli = Cli::parse();
	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			log::debug!("{:?}", error);
			eprintln!("inspectbin: {}", error);
			ExitCode::FAILURE
		},
	}
}

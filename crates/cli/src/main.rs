use clap::Parser;
use rocket_cli::{
	cli::Cli,
	commands,
	error::RocketError,
	logging,
	output::{self, OutputFormat, ResultBuilder},
};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command();

	if let Err(err) = commands::dispatch(cli).await {
		handle_error(command.name(), err, format);
		std::process::exit(1);
	}
}

fn handle_error(command: &str, err: RocketError, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	// Always print to stderr for humans
	output::print_error_stderr(&cmd_error);

	// Structured formats also get the failure envelope on stdout
	if format != OutputFormat::Text {
		let result: output::CommandResult<()> = ResultBuilder::new(command)
			.error_with(cmd_error)
			.build();
		output::print_result(&result, format);
	}
}

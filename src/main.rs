//! Binary entry point: parse the CLI, resolve the context, dispatch one
//! operation, and map failures to process exit codes.

use clap::Parser;

use patchbay_setup::cli::Cli;
use patchbay_setup::context::Context;
use patchbay_setup::logging::{self, Logger};
use patchbay_setup::{commands, exit_codes};

fn main() {
    logging::init_tracing();
    let args = Cli::parse();
    let log = Logger::new(args.verbose);

    if let Err(err) = run(&args, log) {
        log.error(&format!("{err:#}"));
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run(args: &Cli, log: Logger) -> anyhow::Result<()> {
    log.debug(&format!("patchbay-setup {}", patchbay_setup::version()));
    let ctx = Context::new(args.global.root.as_deref(), args.global.bdist_wheel, log)?;
    commands::dispatch(args.command.operation_name(), &ctx)
}

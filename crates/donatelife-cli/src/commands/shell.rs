//! `donatelife shell` - interactive registry session.
//!
//! Wires the in-memory store and the system clock into a `DonorService`
//! and hands stdin to a [`Session`]. The registry lives only as long as the
//! session.

use std::io::{self, IsTerminal};

use tracing::{info, instrument};

use donatelife_adapters::{InMemoryDonorStore, SystemClock};
use donatelife_core::application::DonorService;

use crate::{
    cli::ShellArgs, config::AppConfig, error::CliResult, output::OutputManager, shell::Session,
};

#[instrument(skip_all)]
pub fn execute(args: ShellArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = DonorService::new(
        Box::new(InMemoryDonorStore::new()),
        Box::new(SystemClock::new()),
    );

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let prompt = args.prompt.unwrap_or_else(|| config.shell.prompt.clone());

    if interactive {
        output.header("DonateLife - Donor Manager")?;
        output.info("Type 'help' for commands, 'exit' to quit.")?;
    }
    info!(interactive, "Shell session started");

    let mut session = Session::new(service, output, &config);
    session.run(stdin.lock(), interactive.then_some(prompt.as_str()))
}

//! Interactive registry session.
//!
//! A [`Session`] owns one [`DonorService`] for its whole lifetime and
//! executes one command per input line. Command failures are reported and
//! the session carries on; only I/O errors end it early.

use std::io::BufRead;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::{debug, instrument};
use uuid::Uuid;

use donatelife_core::application::{DonorInfo, DonorService};

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, CliResult},
    input,
    output::OutputManager,
    render,
};

pub mod command;
mod tokenize;

use command::{ListFormat, ShellCommand, ShellLine};
use tokenize::tokenize;

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    service: DonorService,
    output: OutputManager,
    date_format: String,
}

impl Session {
    pub fn new(service: DonorService, output: OutputManager, config: &AppConfig) -> Self {
        Self {
            service,
            output,
            date_format: config.shell.date_format.clone(),
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &DonorService {
        &self.service
    }

    /// Read and execute lines until `exit` or end of input.
    ///
    /// `prompt` is written before each line when given.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: Option<&str>) -> CliResult<()> {
        let mut lines = input.lines();
        loop {
            if let Some(p) = prompt {
                self.output.prompt(p)?;
            }
            let Some(line) = lines.next() else {
                if prompt.is_some() {
                    self.output.data("")?;
                }
                break;
            };
            match self.execute_line(&line?) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => self.report(&err)?,
            }
        }
        debug!("Shell session ended");
        Ok(())
    }

    /// Tokenise, parse and execute one line. Blank lines and lines starting
    /// with `#` are ignored.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Flow> {
        let words = tokenize(line).map_err(|e| CliError::InvalidInput {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        if words.first().is_none_or(|w| w.starts_with('#')) {
            return Ok(Flow::Continue);
        }

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                self.output.data(e.render().to_string().trim_end())?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                let rendered = e.render().to_string();
                let message = rendered
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim_start_matches("error: ")
                    .to_string();
                Err(CliError::InvalidInput {
                    message,
                    source: Some(Box::new(e)),
                })
            }
        }
    }

    #[instrument(skip_all)]
    fn execute(&mut self, command: ShellCommand) -> CliResult<Flow> {
        match command {
            ShellCommand::Add(fields) => {
                let new = fields.to_new_donor()?;
                let requested_date = new.last_donation_date.is_some();
                let donor = self.service.register(new)?;
                self.output
                    .success(&format!("Donor added: {} ({})", donor.full_name(), donor.id()))?;
                if requested_date && donor.last_donation_date().is_none() {
                    self.output.warning(
                        "Last donation date not recorded: the donor is inactive or the date is in the future",
                    )?;
                }
            }

            ShellCommand::Update(args) => {
                let id = self.resolve_id(&args.id)?;
                let patch = args.patch();
                let date = args.last_donation.as_deref().map(input::parse_date).transpose()?;
                if patch.is_empty() && date.is_none() {
                    self.output.info("Nothing to update")?;
                    return Ok(Flow::Continue);
                }
                let donor = self.service.update(id, patch, date)?;
                self.output.success(&format!(
                    "Donor updated: {} ({})",
                    donor.full_name(),
                    render::short_id(id)
                ))?;
            }

            ShellCommand::Donate { id, date } => {
                let id = self.resolve_id(&id)?;
                let date = input::parse_date(&date)?;
                let donor = self.service.record_donation(id, date)?;
                self.output.success(&format!(
                    "Donation recorded for {} on {}",
                    donor.full_name(),
                    render::day(Some(date), &self.date_format)
                ))?;
            }

            ShellCommand::Remove { id } => {
                let id = self.resolve_id(&id)?;
                let donor = self.service.remove(id)?;
                self.output.success(&format!(
                    "Removed {} ({})",
                    donor.full_name(),
                    render::short_id(id)
                ))?;
            }

            ShellCommand::Show { id } => {
                let query = id;
                let id = self.resolve_id(&query)?;
                let info = self
                    .service
                    .find(id)?
                    .ok_or(CliError::UnknownDonor { query })?;
                let text = if self.output.format() == OutputFormat::Json {
                    render::json(&info)?
                } else {
                    render::detail(&info, &self.date_format)
                };
                self.output.data(&text)?;
            }

            ShellCommand::List { format } => {
                let donors = self.service.list()?;
                self.print_donors(&donors, format)?;
            }

            ShellCommand::Search(args) => {
                let donors = self.service.search(&args.criteria())?;
                self.print_donors(&donors, args.format)?;
            }

            ShellCommand::Stats => {
                let summary = self.service.summary()?;
                let text = if self.output.format() == OutputFormat::Json {
                    render::json(&summary)?
                } else {
                    render::summary(&summary)
                };
                self.output.data(&text)?;
            }

            ShellCommand::Help => {
                let help = ShellLine::command().render_help().to_string();
                self.output.data(help.trim_end())?;
            }

            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn print_donors(&self, donors: &[DonorInfo], format: Option<ListFormat>) -> CliResult<()> {
        let format = format.unwrap_or(if self.output.format() == OutputFormat::Json {
            ListFormat::Json
        } else {
            ListFormat::Table
        });

        match format {
            ListFormat::Json => self.output.data(&render::json(donors)?)?,
            ListFormat::Csv => self.output.data(render::csv(donors)?.trim_end())?,
            ListFormat::Table if donors.is_empty() => self.output.print("No donors found.")?,
            ListFormat::Table => {
                self.output.data(&render::table(donors, &self.date_format))?;
                let noun = if donors.len() == 1 { "donor" } else { "donors" };
                self.output.print(&format!("{} {noun}", donors.len()))?;
            }
        }
        Ok(())
    }

    /// Accept a full id or any unique, case-insensitive prefix of one.
    fn resolve_id(&self, query: &str) -> CliResult<Uuid> {
        let query = query.trim();
        if let Ok(id) = Uuid::parse_str(query) {
            return Ok(id);
        }
        if query.is_empty() {
            return Err(CliError::InvalidInput {
                message: "a donor ID is required".into(),
                source: None,
            });
        }

        let needle = query.to_ascii_lowercase();
        let matches: Vec<Uuid> = self
            .service
            .list()?
            .iter()
            .map(|info| info.donor.id())
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(CliError::UnknownDonor {
                query: query.to_string(),
            }),
            many => Err(CliError::AmbiguousId {
                query: query.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Print a failed command and keep going.
    fn report(&self, err: &CliError) -> CliResult<()> {
        err.log();

        let violations = err.violations();
        if violations.is_empty() {
            self.output.error(&err.to_string())?;
            for suggestion in err.suggestions() {
                self.output.print(&format!("  {suggestion}"))?;
            }
        } else {
            self.output.error("Validation Errors")?;
            for violation in violations {
                self.output.data(&format!("  - {violation}"))?;
            }
        }
        Ok(())
    }
}

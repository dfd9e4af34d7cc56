//! Grammar of the interactive shell, one clap parser per line.

use clap::{Args, Parser, Subcommand, ValueEnum};

use donatelife_core::domain::{DonorPatch, SearchCriteria};

use crate::{cli::DonorFields, input};

/// One line typed at the shell prompt.
#[derive(Debug, Parser)]
#[command(
    name = "donatelife shell",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}\n\nIDs may be abbreviated to any unique prefix. \
                     Dates are YYYY-MM-DD.\nType '<command> --help' for a command's options."
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Register a new donor
    Add(DonorFields),

    /// Change a donor's details
    Update(UpdateArgs),

    /// Record a donation on the given date
    Donate {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "YYYY-MM-DD")]
        date: String,
    },

    /// Remove a donor from the registry
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show every detail of one donor
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List every donor in registration order
    #[command(visible_alias = "ls")]
    List {
        #[arg(long, value_enum)]
        format: Option<ListFormat>,
    },

    /// Find donors by blood type, city and eligibility
    Search(SearchArgs),

    /// Registry totals
    Stats,

    /// Show this help
    Help,

    /// Leave the shell
    #[command(visible_alias = "quit")]
    Exit,
}

/// Arguments for `update`. Only the options given are changed.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long = "first", value_name = "NAME")]
    pub first_name: Option<String>,

    #[arg(long = "last", value_name = "NAME")]
    pub last_name: Option<String>,

    #[arg(long = "blood", value_name = "TYPE")]
    pub blood_type: Option<String>,

    /// New email address; an empty value removes it.
    #[arg(long = "email", value_name = "EMAIL")]
    pub email: Option<String>,

    #[arg(long = "phone", value_name = "DIGITS")]
    pub phone: Option<String>,

    #[arg(long = "city", value_name = "CITY")]
    pub city: Option<String>,

    #[arg(long = "active", value_name = "BOOL")]
    pub active: Option<bool>,

    /// Record a donation as part of the update.
    #[arg(long = "last-donation", value_name = "YYYY-MM-DD")]
    pub last_donation: Option<String>,
}

impl UpdateArgs {
    pub fn patch(&self) -> DonorPatch {
        DonorPatch {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            blood_type: self.blood_type.clone(),
            email: self.email.as_deref().map(|e| input::email(Some(e))),
            phone: self.phone.clone(),
            city: self.city.clone(),
            active: self.active,
        }
    }
}

/// Arguments for `search`. Filters combine; none given lists everyone.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    #[arg(long = "blood", value_name = "TYPE")]
    pub blood_type: Option<String>,

    #[arg(long = "city", value_name = "CITY")]
    pub city: Option<String>,

    /// Only donors who may donate today.
    #[arg(long = "eligible", conflicts_with = "ineligible")]
    pub eligible: bool,

    /// Only donors who may not donate today.
    #[arg(long = "ineligible")]
    pub ineligible: bool,

    #[arg(long, value_enum)]
    pub format: Option<ListFormat>,
}

impl SearchArgs {
    pub fn criteria(&self) -> SearchCriteria {
        let eligible = match (self.eligible, self.ineligible) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        SearchCriteria {
            blood_type: self.blood_type.clone(),
            city: self.city.clone(),
            eligible,
        }
    }
}

/// How `list` and `search` print donors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned columns.
    Table,
    /// JSON array.
    Json,
    /// CSV rows with a header.
    Csv,
}

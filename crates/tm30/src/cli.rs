//! Command-line interface definitions for the tm30 binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;
use tm30_protocol::Gender;

/// Command-line interface for the `tm30` binary.
#[derive(Parser, Debug)]
#[command(name = "tm30", about = "TM30 form autofill: profiles and fill runs", version)]
pub struct Cli {
    /// Logging controls shared across tm30 binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Optional path to the settings file (defaults to ~/.tm30/config.ron)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Which operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all saved profiles.
    List,
    /// Show one profile in full.
    Show {
        /// Profile id as printed by `list`.
        id: u64,
    },
    /// Save a new profile.
    Add(AddArgs),
    /// Edit an existing profile in place.
    Edit {
        /// Profile id as printed by `list`.
        id: u64,
        /// Fields to change; anything omitted keeps its value.
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a profile.
    Delete {
        /// Profile id as printed by `list`.
        id: u64,
    },
    /// Import profiles from a CSV spreadsheet.
    Import {
        /// Path of the CSV file to read.
        path: PathBuf,
    },
    /// Export all profiles to a CSV spreadsheet.
    Export {
        /// Path of the CSV file to write.
        path: PathBuf,
    },
    /// Manage the PIN lock over the profile store.
    Pin {
        /// PIN operation.
        #[command(subcommand)]
        command: PinCommands,
    },
    /// Run a fill sequence for one profile against the built-in demo page.
    Fill {
        /// Profile id as printed by `list`.
        id: u64,
        /// Use the fast timing table instead of the conservative one.
        #[arg(long)]
        aggressive: bool,
    },
}

/// PIN subcommands.
#[derive(Subcommand, Debug)]
pub enum PinCommands {
    /// Set (or replace) the four-digit PIN.
    Set {
        /// The new PIN, exactly four digits.
        pin: String,
    },
    /// Remove the PIN. Profiles are kept.
    Remove,
    /// Show whether a PIN is set and how many failed attempts are recorded.
    Status,
    /// Forgotten-PIN recovery: wipe the PIN and every saved profile.
    Reset {
        /// Confirm the wipe.
        #[arg(long)]
        yes: bool,
    },
}

/// Fields for `add`. Everything the form needs is required up front.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Given name as printed in the passport.
    #[arg(long)]
    pub first_name: String,
    /// Family name as printed in the passport.
    #[arg(long)]
    pub last_name: String,
    /// Passport number.
    #[arg(long)]
    pub passport: String,
    /// Nationality display string, e.g. "THA : THAI".
    #[arg(long)]
    pub nationality: String,
    /// Canonical 3-letter nationality code, e.g. "THA".
    #[arg(long, default_value = "")]
    pub nationality_code: String,
    /// Gender code, M or F.
    #[arg(long, value_parser = parse_gender)]
    pub gender: Gender,
    /// Birth date, DD/MM/YYYY.
    #[arg(long)]
    pub birth_date: String,
    /// Phone number.
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Check-in date, for form variants that ask for it.
    #[arg(long)]
    pub check_in: Option<String>,
    /// Check-out date, for form variants that ask for it.
    #[arg(long)]
    pub check_out: Option<String>,
}

/// Fields for `edit`; every flag is optional.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Given name as printed in the passport.
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name as printed in the passport.
    #[arg(long)]
    pub last_name: Option<String>,
    /// Passport number.
    #[arg(long)]
    pub passport: Option<String>,
    /// Nationality display string, e.g. "THA : THAI".
    #[arg(long)]
    pub nationality: Option<String>,
    /// Canonical 3-letter nationality code, e.g. "THA".
    #[arg(long)]
    pub nationality_code: Option<String>,
    /// Gender code, M or F.
    #[arg(long, value_parser = parse_gender)]
    pub gender: Option<Gender>,
    /// Birth date, DD/MM/YYYY.
    #[arg(long)]
    pub birth_date: Option<String>,
    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Check-in date.
    #[arg(long)]
    pub check_in: Option<String>,
    /// Check-out date.
    #[arg(long)]
    pub check_out: Option<String>,
}

/// Clap value parser for the one-letter gender code.
fn parse_gender(code: &str) -> Result<Gender, String> {
    Gender::from_code(code).ok_or_else(|| format!("unknown gender code {code:?}: expected M or F"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn add_requires_the_form_fields() {
        let cli = Cli::try_parse_from([
            "tm30",
            "add",
            "--first-name",
            "Somchai",
            "--last-name",
            "Sook",
            "--passport",
            "AB1234567",
            "--nationality",
            "THA : THAI",
            "--gender",
            "M",
            "--birth-date",
            "05/11/1990",
        ])
        .expect("parses");
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.gender, Gender::M);
        assert!(args.nationality_code.is_empty());
    }

    #[test]
    fn bad_gender_code_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "tm30",
                "add",
                "--first-name",
                "A",
                "--last-name",
                "B",
                "--passport",
                "C",
                "--nationality",
                "D",
                "--gender",
                "X",
                "--birth-date",
                "05/11/1990",
            ])
            .is_err()
        );
    }

    #[test]
    fn fill_takes_an_id_and_timing_flag() {
        let cli = Cli::try_parse_from(["tm30", "fill", "42", "--aggressive"]).expect("parses");
        let Commands::Fill { id, aggressive } = cli.command else {
            panic!("expected fill");
        };
        assert_eq!(id, 42);
        assert!(aggressive);
    }
}

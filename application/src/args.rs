//! [`Args`] definitions.

use clap::Parser;

use crate::Selection;

/// Previewer of cleaning bookings.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Only previews the booking, without submitting it.
    #[arg(long)]
    pub dry_run: bool,

    /// Booking selections.
    #[command(flatten)]
    pub selection: Selection,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

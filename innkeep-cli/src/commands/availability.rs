//! Availability command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{
    format_amount, load_configuration, open_database, parse_window, resolve_format,
    GlobalOptions,
};
use innkeep::availability;
use innkeep::output::{self, OutputFormat, Table};

/// List rooms free for a window.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Check-out date (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub to: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let window = parse_window(&self.from, &self.to)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let rooms = availability::available_rooms(db.connection(), &window)?;

        match resolve_format(self.json, &config) {
            OutputFormat::Json => {
                println!("{}", output::to_json(&rooms).map_err(CliError::from)?);
            }
            OutputFormat::Human => {
                if rooms.is_empty() {
                    if !global.quiet {
                        eprintln!("No rooms available for {window}");
                    }
                    return Ok(());
                }
                let mut table = Table::new(&["ID", "NUMBER", "CAPACITY", "RATE", "TYPE"]);
                for room in &rooms {
                    table.row(vec![
                        room.id().unwrap_or_default().to_string(),
                        room.number().to_string(),
                        room.capacity().to_string(),
                        format_amount(room.nightly_rate()),
                        room.category().label(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
        Ok(())
    }
}

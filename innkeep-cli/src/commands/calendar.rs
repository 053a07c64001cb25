//! Calendar command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{
    format_amount, load_configuration, open_database, parse_window, resolve_format,
    GlobalOptions,
};
use innkeep::database;
use innkeep::output::{self, OutputFormat, Table};

/// List reservations intersecting a window, with display status labels.
#[derive(Args)]
pub struct CalendarCommand {
    /// Window start (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Window end (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub to: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CalendarCommand {
    /// Execute the calendar command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let window = parse_window(&self.from, &self.to)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let entries = database::calendar(db.connection(), &window)?;

        match resolve_format(self.json, &config) {
            OutputFormat::Json => {
                println!("{}", output::to_json(&entries).map_err(CliError::from)?);
            }
            OutputFormat::Human => {
                let mut table = Table::new(&[
                    "ID", "ROOM", "CHECK-IN", "CHECK-OUT", "GUESTS", "TOTAL", "STATUS",
                ]);
                for entry in &entries {
                    table.row(vec![
                        entry.id().unwrap_or_default().to_string(),
                        entry.room_id().to_string(),
                        entry.stay().check_in().to_string(),
                        entry.stay().check_out().to_string(),
                        entry.guests().to_string(),
                        format_amount(entry.total_amount()),
                        entry.status().display_label().to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
        Ok(())
    }
}

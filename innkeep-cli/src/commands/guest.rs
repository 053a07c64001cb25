//! Guest commands: the minimal seeding surface for the platform's
//! customer store.

use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, resolve_format, GlobalOptions};
use innkeep::database;
use innkeep::output::{self, OutputFormat, Table};

/// Manage guests.
#[derive(Args)]
pub struct GuestCommand {
    #[command(subcommand)]
    action: GuestAction,
}

#[derive(Subcommand)]
enum GuestAction {
    /// Add a guest
    Add {
        /// Display name
        #[arg(long)]
        name: String,
    },

    /// List all guests
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl GuestCommand {
    /// Execute the guest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        match self.action {
            GuestAction::Add { name } => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(CliError::InvalidArguments(
                        "guest name must be non-empty".to_string(),
                    ));
                }
                let id = database::insert_guest(db.connection(), trimmed)?;
                println!("{id}");
                Ok(())
            }
            GuestAction::List { json } => {
                let guests = database::list_guests(db.connection())?;
                match resolve_format(json, &config) {
                    OutputFormat::Json => {
                        println!("{}", output::to_json(&guests).map_err(CliError::from)?);
                    }
                    OutputFormat::Human => {
                        let mut table = Table::new(&["ID", "NAME"]);
                        for guest in &guests {
                            table.row(vec![guest.id.to_string(), guest.name.clone()]);
                        }
                        print!("{}", table.render());
                    }
                }
                Ok(())
            }
        }
    }
}

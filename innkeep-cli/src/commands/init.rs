//! Init command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use innkeep::{Database, DatabaseConfig};

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        std::fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join("innkeep.db");
        Database::open(DatabaseConfig::new(&db_path))?;

        if !global.quiet {
            eprintln!("Initialized database at {}", db_path.display());
        }
        Ok(())
    }
}

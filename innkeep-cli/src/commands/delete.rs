//! Delete command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use innkeep::operations::{self, DeletePlan};

/// Delete a reservation.
///
/// Refused while money is held against an active booking; a checked-in
/// deletion releases the room in the same operation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    pub id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = DeletePlan::new(self.id).build_plan(db.connection())?;
        operations::execute_in_transaction(&mut db, &plan)?;

        if !global.quiet {
            eprintln!("Deleted reservation {}", self.id);
        }
        Ok(())
    }
}

//! Status command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use innkeep::operations::{self, PatchStatusPlan};
use innkeep::ReservationStatus;

/// Patch a reservation's status.
///
/// Accepts `pending`, `confirmed`, `cancelled` and `no-show`; check-in
/// and check-out carry timestamps and have their own commands.
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation id
    pub id: i64,

    /// Target status
    pub status: String,

    /// Note for the reservation's note log
    #[arg(long)]
    pub note: Option<String>,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let to: ReservationStatus = self
            .status
            .parse()
            .map_err(|e: String| CliError::InvalidArguments(e))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = PatchStatusPlan::new(self.id, to)
            .with_note(self.note)
            .build_plan(db.connection())?;
        operations::execute_in_transaction(&mut db, &plan)?;

        if !global.quiet {
            eprintln!("Reservation {} set to {}", self.id, to.display_label());
        }
        Ok(())
    }
}

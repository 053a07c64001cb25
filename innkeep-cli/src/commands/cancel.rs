//! Cancel command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use innkeep::operations::{self, PatchStatusPlan};
use innkeep::ReservationStatus;

/// Cancel a reservation (or record a no-show).
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    pub id: i64,

    /// Record a no-show instead of a cancellation
    #[arg(long)]
    pub no_show: bool,

    /// Note for the reservation's note log
    #[arg(long)]
    pub note: Option<String>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let to = if self.no_show {
            ReservationStatus::NoShow
        } else {
            ReservationStatus::Cancelled
        };

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

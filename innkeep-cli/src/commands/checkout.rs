//! Checkout command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_datetime, GlobalOptions};
use innkeep::operations::{self, CheckOutOptions, CheckOutPlan};

/// Check a guest out.
#[derive(Args)]
pub struct CheckoutCommand {
    /// Reservation id
    pub id: i64,

    /// Actual departure timestamp (YYYY-MM-DDTHH:MM[:SS]; defaults to now)
    #[arg(long)]
    pub at: Option<String>,

    /// Note for the reservation's note log
    #[arg(long)]
    pub note: Option<String>,
}

impl CheckoutCommand {
    /// Execute the checkout command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let actual = match &self.at {
            Some(value) => parse_datetime(value)?,
            None => chrono::Utc::now().naive_utc(),
        };

        let options = CheckOutOptions::new(self.id, actual).with_note(self.note);
        let plan = CheckOutPlan::new(options).build_plan(db.connection())?;
        operations::execute_in_transaction(&mut db, &plan)?;

        if !global.quiet {
            eprintln!(
                "Checked out reservation {} at {actual}; room sent to cleaning",
                self.id
            );
        }
        Ok(())
    }
}

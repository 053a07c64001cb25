//! Checkin command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_datetime, GlobalOptions};
use innkeep::operations::{self, CheckInOptions, CheckInPlan};

/// Check a guest in.
#[derive(Args)]
pub struct CheckinCommand {
    /// Reservation id
    pub id: i64,

    /// Actual arrival timestamp (YYYY-MM-DDTHH:MM[:SS]; defaults to now)
    #[arg(long)]
    pub at: Option<String>,

    /// Note for the reservation's note log
    #[arg(long)]
    pub note: Option<String>,
}

impl CheckinCommand {
    /// Execute the checkin command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let actual = match &self.at {
            Some(value) => parse_datetime(value)?,
            None => chrono::Utc::now().naive_utc(),
        };

        let options = CheckInOptions::new(self.id, actual).with_note(self.note);
        let plan = CheckInPlan::new(options).build_plan(db.connection())?;
        operations::execute_in_transaction(&mut db, &plan)?;

        if !global.quiet {
            eprintln!("Checked in reservation {} at {actual}", self.id);
        }
        Ok(())
    }
}

//! Amend command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_amount, parse_window, GlobalOptions,
};
use innkeep::operations::{self, AmendOptions, AmendPlan};

/// Update a reservation's dates, room, party or amounts.
#[derive(Args)]
pub struct AmendCommand {
    /// Reservation id
    pub id: i64,

    /// New check-in date (YYYY-MM-DD; requires --to)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// New check-out date (YYYY-MM-DD; requires --from)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Move to a different room
    #[arg(long)]
    pub room: Option<i64>,

    /// New party size
    #[arg(long)]
    pub guests: Option<u32>,

    /// New agreed total
    #[arg(long)]
    pub total: Option<String>,

    /// New paid amount
    #[arg(long)]
    pub paid: Option<String>,

    /// Note to append
    #[arg(long)]
    pub note: Option<String>,

    /// Plan only; write nothing
    #[arg(long)]
    pub dry_run: bool,
}

impl AmendCommand {
    /// Execute the amend command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let mut options = AmendOptions::new(self.id);
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            options = options.with_stay(parse_window(from, to)?);
        }
        if let Some(room) = self.room {
            options = options.with_room(room);
        }
        if let Some(guests) = self.guests {
            options = options.with_guests(guests);
        }
        if let Some(total) = &self.total {
            options = options.with_total_amount(parse_amount(total)?);
        }
        if let Some(paid) = &self.paid {
            options = options.with_paid_amount(parse_amount(paid)?);
        }
        if let Some(note) = &self.note {
            options = options.with_note(note.clone());
        }

        let plan = AmendPlan::new(options).build_plan(db.connection())?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
                for warning in &plan.warnings {
                    eprintln!("Warning: {warning}");
                }
            }
            return Ok(());
        }

        let result = operations::execute_in_transaction(&mut db, &plan)?;
        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
            if !result.actions_taken.is_empty() {
                eprintln!("Amended reservation {}", self.id);
            }
        }
        Ok(())
    }
}

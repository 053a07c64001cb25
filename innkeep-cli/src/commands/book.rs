//! Book command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_amount, parse_window, GlobalOptions,
};
use innkeep::operations::{self, BookOptions, BookPlan};

/// Create a reservation.
#[derive(Args)]
pub struct BookCommand {
    /// Room id
    #[arg(long)]
    pub room: i64,

    /// Primary guest id
    #[arg(long)]
    pub guest: i64,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Check-out date (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub to: String,

    /// Party size
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Agreed total for the stay
    #[arg(long, default_value = "0")]
    pub total: String,

    /// Deposit already taken
    #[arg(long, default_value = "0")]
    pub paid: String,

    /// Additional guest ids sharing the room
    #[arg(long, value_delimiter = ',')]
    pub extra_guests: Vec<i64>,

    /// Note for the reservation's note log
    #[arg(long)]
    pub note: Option<String>,

    /// Plan only; write nothing
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = parse_window(&self.from, &self.to)?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = BookOptions::new(self.room, self.guest, stay)
            .with_guests(self.guests)
            .with_total_amount(parse_amount(&self.total)?)
            .with_paid_amount(parse_amount(&self.paid)?)
            .with_extra_guests(self.extra_guests)
            .with_note(self.note);

        let plan = BookPlan::new(options, &config).build_plan(db.connection())?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
            }
            return Ok(());
        }

        let result = operations::execute_in_transaction(&mut db, &plan)?;

        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }
        if let Some(id) = result.reservation_id {
            println!("{id}");
        }
        Ok(())
    }
}

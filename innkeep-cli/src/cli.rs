//! CLI structure and command definitions.

use crate::commands::{
    AmendCommand, AvailabilityCommand, BookCommand, CalendarCommand, CancelCommand,
    CheckinCommand, CheckoutCommand, DeleteCommand, GuestCommand, InitCommand, ReportCommand,
    RoomCommand, StatusCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for small-property booking and revenue management.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Manage bookings, rooms and reports", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "INNKEEP_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage the room inventory
    Room(RoomCommand),

    /// Manage guests
    Guest(GuestCommand),

    /// Create a reservation
    Book(BookCommand),

    /// Update a reservation's dates, room, party or amounts
    Amend(AmendCommand),

    /// Patch a reservation's status (confirm, cancel, no-show)
    Status(StatusCommand),

    /// Check a guest in
    Checkin(CheckinCommand),

    /// Check a guest out
    Checkout(CheckoutCommand),

    /// Cancel a reservation (or record a no-show)
    Cancel(CancelCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// List rooms free for a window
    Availability(AvailabilityCommand),

    /// List reservations intersecting a window
    Calendar(CalendarCommand),

    /// Occupancy, revenue and dashboard reports
    Report(ReportCommand),
}

//! Room inventory commands.
//!
//! `room set-status` is the housekeeping surface: it moves a room back to
//! `available` after cleaning, or takes it out of service. Check-in and
//! check-out drive the occupied/cleaning transitions themselves.

use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{
    format_amount, load_configuration, open_database, parse_amount, resolve_format,
    GlobalOptions,
};
use innkeep::database;
use innkeep::output::{self, OutputFormat, Table};
use innkeep::{Room, RoomStatus};

/// Manage the room inventory.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    action: RoomAction,
}

#[derive(Subcommand)]
enum RoomAction {
    /// Add a room to the inventory
    Add {
        /// Unique room number
        #[arg(long)]
        number: String,

        /// How many guests the room sleeps
        #[arg(long)]
        capacity: u32,

        /// Standard nightly rate
        #[arg(long)]
        rate: String,

        /// The room faces the sea
        #[arg(long)]
        sea_view: bool,

        /// The room has a balcony
        #[arg(long)]
        balcony: bool,

        /// The room has air conditioning
        #[arg(long)]
        air_conditioning: bool,
    },

    /// List all rooms
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Update a room's physical status
    SetStatus {
        /// The room id
        id: i64,

        /// New status: available, occupied, cleaning, maintenance,
        /// out-of-order
        status: String,
    },
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        match self.action {
            RoomAction::Add {
                number,
                capacity,
                rate,
                sea_view,
                balcony,
                air_conditioning,
            } => {
                let room = Room::builder(number, capacity, parse_amount(&rate)?)
                    .sea_view(sea_view)
                    .balcony(balcony)
                    .air_conditioning(air_conditioning)
                    .build()
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                let id = database::insert_room(db.connection(), &room)?;
                println!("{id}");
                Ok(())
            }
            RoomAction::List { json } => {
                let rooms = database::list_rooms(db.connection())?;
                match resolve_format(json, &config) {
                    OutputFormat::Json => {
                        println!("{}", output::to_json(&rooms).map_err(CliError::from)?);
                    }
                    OutputFormat::Human => {
                        let mut table =
                            Table::new(&["ID", "NUMBER", "CAPACITY", "RATE", "TYPE", "STATUS"]);
                        for room in &rooms {
                            table.row(vec![
                                room.id().unwrap_or_default().to_string(),
                                room.number().to_string(),
                                room.capacity().to_string(),
                                format_amount(room.nightly_rate()),
                                room.category().label(),
                                room.status().display_label().to_string(),
                            ]);
                        }
                        print!("{}", table.render());
                    }
                }
                Ok(())
            }
            RoomAction::SetStatus { id, status } => {
                let status: RoomStatus = status
                    .parse()
                    .map_err(|e: String| CliError::InvalidArguments(e))?;
                if !database::set_room_status(db.connection(), id, status)? {
                    return Err(CliError::Library(innkeep::Error::RoomNotFound { id }));
                }
                if !global.quiet {
                    eprintln!("Room {id} set to {status}");
                }
                Ok(())
            }
        }
    }
}

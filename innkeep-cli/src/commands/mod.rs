//! Command implementations.

mod amend;
mod availability;
mod book;
mod calendar;
mod cancel;
mod checkin;
mod checkout;
mod delete;
mod guest;
mod init;
mod report;
mod room;
mod status;

pub use amend::AmendCommand;
pub use availability::AvailabilityCommand;
pub use book::BookCommand;
pub use calendar::CalendarCommand;
pub use cancel::CancelCommand;
pub use checkin::CheckinCommand;
pub use checkout::CheckoutCommand;
pub use delete::DeleteCommand;
pub use guest::GuestCommand;
pub use init::InitCommand;
pub use report::ReportCommand;
pub use room::RoomCommand;
pub use status::StatusCommand;

/// Commands that read or change habit data
///
/// Each command takes the storage it works on and returns a response
/// carrying both structured results and the message printed to the user.

pub mod add;
pub mod remove;
pub mod track;
pub mod checkin;
pub mod status;

// Re-export command functions for easy access
pub use add::*;
pub use remove::*;
pub use track::*;
pub use checkin::*;
pub use status::*;

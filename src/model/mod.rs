//! Domain models.
//!
//! Plain structs with parsed, typed fields, converted from the database
//! entities at the repository boundary.

pub mod block_list;
pub mod room;

pub use block_list::BlockedUser;
pub use room::Room;

//! Database entity models for roomkeeper.
//!
//! SeaORM entity definitions for the persisted tables. Domain code should not
//! consume these models directly; the repositories in the main crate convert
//! them to domain models at the data-layer boundary.

pub mod black_list;
pub mod prelude;
pub mod room_list;

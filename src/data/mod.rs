//! Data access layer.
//!
//! Repository structs wrapping SeaORM queries for the persisted tables.
//! Entities are converted to domain models at this boundary; nothing above
//! this layer touches `entity::*` types.

pub mod black_list;
pub mod room;

#[cfg(test)]
mod test;

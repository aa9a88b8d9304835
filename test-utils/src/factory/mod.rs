//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for
//! customization and a `create_*` convenience function for quick default
//! creation. Factories generate unique ids automatically, so tests never
//! collide on the unique indexes.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let entry = factory::black_list::create_block_entry(&db).await?;
//! let room = factory::room::create_room(&db).await?;
//!
//! // Customize with the builder pattern
//! let room = factory::room::RoomFactory::new(&db)
//!     .channel_id(1000)
//!     .owner_id(Some(2000))
//!     .approval(true)
//!     .build()
//!     .await?;
//! ```

pub mod black_list;
pub mod helpers;
pub mod room;

// Re-export commonly used factory functions for concise usage
pub use black_list::create_block_entry;
pub use room::create_room;

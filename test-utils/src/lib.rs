//! Shared testing utilities.
//!
//! Provides the pieces tests need to exercise the data and service layers in
//! isolation: a builder for in-memory SQLite databases with the entity schema,
//! factories for block-list and room rows, and factories for mock Serenity
//! objects deserialized from JSON.
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database
//! tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::RoomList;
//!
//! #[tokio::test]
//! async fn test_room_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(RoomList)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;

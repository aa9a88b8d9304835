//! Test factories for creating Serenity API objects.
//!
//! Provides factory functions for creating mock Serenity structs for testing
//! purposes. These factories create valid objects by deserializing JSON,
//! simulating what Discord's API would return.

pub mod message;

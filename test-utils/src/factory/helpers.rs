//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Gets a unique snowflake-shaped id for test data.
///
/// Discord snowflakes are large u64 values; offsetting the counter keeps the
/// generated ids visually distinct from small primary keys in assertions.
pub fn next_snowflake() -> u64 {
    100_000_000_000_000_000 + next_id()
}

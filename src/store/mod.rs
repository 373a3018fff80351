//! Partition storage backends.
//!
//! [`traits::PartitionStorage`] is the capability every backend offers;
//! [`memory::InMemoryStore`] is the built-in one.

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::PartitionStorage;

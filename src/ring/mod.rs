//! Consistent hash ring of virtual nodes.

pub mod node;
pub mod ring;

#[cfg(test)]
mod ring_test;

pub use node::{MigrationRange, ShardId, VirtualNode};
pub use ring::Ring;

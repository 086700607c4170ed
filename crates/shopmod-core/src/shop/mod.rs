//! # Shop Context
//!
//! The explicit per-shop configuration context passed to component
//! constructors instead of a global registry.
pub mod context;

pub use context::ShopContext;

// Test module declaration
#[cfg(test)]
mod tests;

//! Deterministic random number generation
//!
//! All randomness (patient names, categories, areas) goes through this module
//! so that a seed fully determines a generated day.

mod xorshift;

pub use xorshift::RngManager;

//! Test framework for the red-black tree
//!
//! Userspace helpers shared by the Gherkin scenarios and any crate that
//! wants to drive a tree through scripted key sequences.

pub mod helpers;

pub use helpers::{build_checked, delete_key, in_order_keys, parse_keys};

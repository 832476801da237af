//! Arena-backed red-black tree.
//!
//! The data structure lives in [`redblack_tree`] and is re-exported here
//! together with application configuration loading and logging bootstrap.
//!
//! ```
//! use redblack::{Node, RbTree};
//!
//! let mut tree = RbTree::new();
//! for key in [3, 1, 2] {
//!     tree.insert(Node::new(key, key * 100)).unwrap();
//! }
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(tree.self_test(), Ok(1));
//! ```

pub mod config;
pub mod utils;

pub use redblack_tree::*;

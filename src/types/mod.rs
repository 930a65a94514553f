//! Strongly-typed domain types.
//!
//! Newtypes keep mesh-file numbering apart from vector positions.
//!
//! # Example
//!
//! ```
//! use adc_node::types::NodeId;
//!
//! let id = NodeId::from_index(0);
//! assert_eq!(id.get(), 1);
//! assert_eq!(id.to_string(), "1");
//! ```

mod indices;

pub use indices::NodeId;

//! # adc-node
//!
//! Mesh node records for ADCIRC-style unstructured coastal ocean meshes.
//!
//! This crate provides the node entity a mesh reader/writer builds on:
//! - Parsing and formatting of `<id> <x> <y> <z>` node record lines
//! - Geographic and projected output precision
//! - Content hashing of node positions for exact duplicate detection
//! - Id ordering for sorting and renumbering
//! - Block I/O and collection helpers for an owning mesh
//!
//! Element connectivity, boundary sets and nodal attribute storage belong to
//! the owning mesh and are not part of this crate.
//!
//! # Example
//!
//! ```
//! use adc_node::{HashAlgorithm, MeshNode};
//!
//! let mut node = MeshNode::from_record("12   100.5   200.25   -3.0").unwrap();
//! assert_eq!(node.to_point(), (100.5, 200.25));
//!
//! node.set_hash_algorithm(HashAlgorithm::Sha256).unwrap();
//! node.compute_hashes().unwrap();
//! assert_eq!(node.position_hash().unwrap().len(), 32);
//!
//! let line = node.format_record(false);
//! assert_eq!(MeshNode::from_record(&line).unwrap().id, node.id);
//! ```
//!
//! # Features
//! - `md5` (default): MD5 digests
//! - `parallel`: rayon-based parsing and hashing of node collections
//! - `serde`: serialization of [`RecordFormat`] and [`HashAlgorithm`]

pub mod collection;
pub mod error;
pub mod io;
pub mod node;
pub mod types;

// Re-export main types for convenience
pub use collection::{
    clear_marks, duplicate_position_groups, find_node, hash_nodes, is_consecutively_numbered,
    mark_duplicate_positions, renumber_nodes, sort_nodes_by_id,
};
#[cfg(feature = "parallel")]
pub use collection::hash_nodes_parallel;
pub use error::{NodeError, RecordFault, RecordField};
pub use io::{
    parse_node_records, read_node_file, read_node_records, write_node_file, write_node_records,
    write_node_records_with,
};
#[cfg(feature = "parallel")]
pub use io::parse_node_records_parallel;
pub use node::{
    GEOGRAPHIC_PRECISION, HashAlgorithm, MeshNode, NodeDigest, PROJECTED_PRECISION,
    RECORD_FIELDS, RecordFormat,
};
pub use types::NodeId;

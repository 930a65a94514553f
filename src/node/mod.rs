//! Mesh node entity.
//!
//! A [`MeshNode`] is one record of a mesh file: a 1-based id, a planar
//! position and an elevation. Nodes can be read from and written to the
//! fixed-order record line used by ADCIRC meshes,
//!
//! ```text
//! <id> <x> <y> <z>
//! ```
//!
//! and fingerprinted with a content hash so literal duplicates (the same node
//! appearing in two overlapping sub-meshes or two mesh revisions) can be found
//! by digest equality.
//!
//! ## Hash freshness
//! Hashes are computed only by [`MeshNode::compute_hashes`]. Changing `x`, `y`,
//! `z` or the hash algorithm afterwards leaves the previous digests in place
//! until `compute_hashes` is called again.
//!
//! ## Example
//! ```
//! use adc_node::{HashAlgorithm, MeshNode};
//!
//! let mut a = MeshNode::from_record("1 -75.5 35.25 -3.0").unwrap();
//! let mut b = MeshNode::from_record("2 -75.5 35.25 -7.5").unwrap();
//! a.compute_hashes().unwrap();
//! b.compute_hashes().unwrap();
//!
//! assert!(a.same_position(&b));
//! assert!(!a.same_node(&b));
//! assert_eq!(a.hash_algorithm(), HashAlgorithm::Sha1);
//! ```

mod format;
mod hash;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use format::{GEOGRAPHIC_PRECISION, PROJECTED_PRECISION, RecordFormat};
pub use hash::{HashAlgorithm, NodeDigest};

use crate::error::{NodeError, RecordFault, RecordField};
use crate::types::NodeId;

/// Number of whitespace-separated fields in a node record.
pub const RECORD_FIELDS: usize = 4;

/// A single mesh node.
///
/// Nodal attributes (roughness, friction, ...) are not stored here. Tables
/// owned by the caller look them up by [`MeshNode::id`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshNode {
    /// 1-based node number
    pub id: NodeId,
    /// X coordinate (or longitude)
    pub x: f64,
    /// Y coordinate (or latitude)
    pub y: f64,
    /// Elevation/depth
    pub z: f64,
    /// Scratch flag for external algorithms (e.g. duplicate marking)
    pub mark: bool,
    position_hash: Option<NodeDigest>,
    full_hash: Option<NodeDigest>,
    hash_algorithm: HashAlgorithm,
}

impl MeshNode {
    /// Create a node from its id and position.
    pub fn new(id: u64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: NodeId::new(id),
            x,
            y,
            z,
            ..Self::default()
        }
    }

    /// Select the hash algorithm at construction.
    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Create a node from a record line.
    pub fn from_record(line: &str) -> Result<Self, NodeError> {
        let mut node = Self::default();
        node.parse_record(line)?;
        Ok(node)
    }

    /// Read id and position from a record line.
    ///
    /// The line must hold exactly four whitespace-separated tokens: a
    /// positive integer id and three finite floating-point values.
    ///
    /// # Errors
    /// [`NodeError::MalformedRecord`] naming the line and the failing field.
    /// The node is left unchanged on error.
    pub fn parse_record(&mut self, line: &str) -> Result<(), NodeError> {
        let (id, x, y, z) = parse_fields(line)?;
        self.id = id;
        self.x = x;
        self.y = y;
        self.z = z;
        Ok(())
    }

    /// Format as a record line with the standard ADCIRC layout.
    ///
    /// Geographic mode writes 10 decimal digits, projected mode 4. Values are
    /// rounded to that precision, so re-parsing the line gives back the
    /// position only to within the digits written.
    pub fn format_record(&self, use_geographic: bool) -> String {
        self.format_record_with(&RecordFormat::default(), use_geographic)
    }

    /// Format as a record line with a custom layout.
    pub fn format_record_with(&self, format: &RecordFormat, use_geographic: bool) -> String {
        let prec = format.precision(use_geographic);
        format!(
            "{id:>iw$}{sep}{x:>cw$.prec$}{sep}{y:>cw$.prec$}{zsep}{z:>cw$.prec$}",
            id = self.id,
            x = self.x,
            y = self.y,
            z = self.z,
            iw = format.id_width,
            cw = format.coord_width,
            prec = prec,
            sep = format.separator,
            zsep = format.z_separator,
        )
    }

    /// Compute the position hash over (x, y) and the full hash over (x, y, z).
    ///
    /// Both digests are replaced together; on error neither changes.
    ///
    /// # Errors
    /// [`NodeError::HashUnavailable`] if the selected algorithm has no backend
    /// in this build.
    pub fn compute_hashes(&mut self) -> Result<(), NodeError> {
        let position = self.hash_algorithm.digest_coords(&[self.x, self.y])?;
        let full = self.hash_algorithm.digest_coords(&[self.x, self.y, self.z])?;
        self.position_hash = Some(position);
        self.full_hash = Some(full);
        Ok(())
    }

    /// Select the hash algorithm used by the next [`compute_hashes`](Self::compute_hashes).
    ///
    /// Accepts a [`HashAlgorithm`], a name such as `"sha256"` (borrowed or
    /// owned `String`), or a legacy integer code. Existing hashes are not recomputed.
    ///
    /// # Errors
    /// [`NodeError::UnsupportedAlgorithm`] for an unrecognized value; the
    /// current algorithm is kept.
    pub fn set_hash_algorithm<A>(&mut self, algorithm: A) -> Result<(), NodeError>
    where
        A: TryInto<HashAlgorithm>,
        NodeError: From<A::Error>,
    {
        match algorithm.try_into() {
            Ok(algorithm) => {
                self.hash_algorithm = algorithm;
                Ok(())
            }
            Err(e) => {
                let err = NodeError::from(e);
                log::warn!("Node {}: keeping {}: {}", self.id, self.hash_algorithm, err);
                Err(err)
            }
        }
    }

    /// Currently selected hash algorithm.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// Digest of (x, y) from the last [`compute_hashes`](Self::compute_hashes).
    pub fn position_hash(&self) -> Option<&NodeDigest> {
        self.position_hash.as_ref()
    }

    /// Digest of (x, y, z) from the last [`compute_hashes`](Self::compute_hashes).
    pub fn full_hash(&self) -> Option<&NodeDigest> {
        self.full_hash.as_ref()
    }

    /// Whether hashes have been computed at least once.
    pub fn has_hashes(&self) -> bool {
        self.position_hash.is_some() && self.full_hash.is_some()
    }

    /// Whether both nodes have equal position hashes.
    ///
    /// False when either node is unhashed. Digests compare the last computed
    /// values, which may be stale if a node moved since.
    pub fn same_position(&self, other: &MeshNode) -> bool {
        matches!(
            (&self.position_hash, &other.position_hash),
            (Some(a), Some(b)) if a == b
        )
    }

    /// Whether both nodes have equal full hashes.
    pub fn same_node(&self, other: &MeshNode) -> bool {
        matches!(
            (&self.full_hash, &other.full_hash),
            (Some(a), Some(b)) if a == b
        )
    }

    /// Planar position as an (x, y) pair.
    pub fn to_point(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// True if `a` has a smaller id than `b`.
    pub fn node_less_than(a: &MeshNode, b: &MeshNode) -> bool {
        a.id < b.id
    }

    /// True if `a` has a larger id than `b`.
    pub fn node_greater_than(a: &MeshNode, b: &MeshNode) -> bool {
        a.id > b.id
    }

    /// Ordering by id alone, for `sort_by`.
    ///
    /// Equal ids compare `Equal`; no secondary key is used.
    pub fn cmp_by_id(a: &MeshNode, b: &MeshNode) -> Ordering {
        a.id.cmp(&b.id)
    }
}

/// Writes the record in projected mode (4 decimals). Use
/// [`MeshNode::format_record`] with `true` for geographic precision.
impl fmt::Display for MeshNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_record(false))
    }
}

impl FromStr for MeshNode {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_record(s)
    }
}

/// Split and convert a record line without touching any node.
fn parse_fields(line: &str) -> Result<(NodeId, f64, f64, f64), NodeError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != RECORD_FIELDS {
        return Err(NodeError::malformed(
            line,
            RecordFault::FieldCount {
                expected: RECORD_FIELDS,
                found: parts.len(),
            },
        ));
    }

    let invalid = |field: RecordField, token: &str| {
        NodeError::malformed(
            line,
            RecordFault::InvalidField {
                field,
                token: token.to_string(),
            },
        )
    };

    let id = parts[0]
        .parse::<u64>()
        .ok()
        .filter(|&id| id > 0)
        .map(NodeId::new)
        .ok_or_else(|| invalid(RecordField::Id, parts[0]))?;

    let mut coords = [0.0; 3];
    for (i, field) in [RecordField::X, RecordField::Y, RecordField::Z]
        .into_iter()
        .enumerate()
    {
        let token = parts[i + 1];
        coords[i] = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(field, token))?;
    }

    Ok((id, coords[0], coords[1], coords[2]))
}

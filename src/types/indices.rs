//! Strongly-typed node identifiers.
//!
//! Mesh files number nodes from 1. [`NodeId`] keeps that numbering so a
//! record read from disk and written back carries the same id, and so ids
//! can't be confused with 0-based positions in a node vector.

use std::fmt;

/// 1-based identifier of a node within a mesh.
///
/// Uniqueness is the owning mesh's responsibility; the id itself only knows
/// how to compare and print. `NodeId::UNASSIGNED` (0) is the id of a node
/// that has not been read or numbered yet.
///
/// # Example
///
/// ```
/// use adc_node::types::NodeId;
///
/// let id = NodeId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_index(), Some(41));
/// assert!(NodeId::UNASSIGNED.to_index().is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Id of a node that has not been assigned a number.
    pub const UNASSIGNED: Self = Self(0);

    /// Create a node id from its 1-based number.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw 1-based number.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this id is a valid 1-based number.
    #[inline]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }

    /// Create the id for the node stored at a 0-based vector position.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u64 + 1)
    }

    /// 0-based vector position of this id, `None` when unassigned.
    #[inline]
    pub fn to_index(self) -> Option<usize> {
        self.0.checked_sub(1).and_then(|i| usize::try_from(i).ok())
    }

    /// Next id in sequence.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width/alignment flags apply to the number.
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for NodeId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u64 {
    #[inline]
    fn from(id: NodeId) -> u64 {
        id.0
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Operations an owning mesh runs over its node vector.
//!
//! These are convenience helpers for the mesh that owns the nodes; the node
//! contract itself lives entirely in [`MeshNode`]. Uniqueness of ids and the
//! node vector stay the caller's responsibility.
//!
//! Sorting and renumbering use the id ordering of [`MeshNode::cmp_by_id`].
//! Duplicate detection compares position hashes, so it finds nodes whose
//! stored (x, y) are bit-identical and nothing else.

use std::collections::HashMap;

use crate::error::NodeError;
use crate::node::{HashAlgorithm, MeshNode, NodeDigest};
use crate::types::NodeId;

/// Sort nodes by ascending id. Stable, so equal ids keep their order.
pub fn sort_nodes_by_id(nodes: &mut [MeshNode]) {
    nodes.sort_by(MeshNode::cmp_by_id);
}

/// Renumber nodes 1..=n in their current order.
pub fn renumber_nodes(nodes: &mut [MeshNode]) {
    for (i, node) in nodes.iter_mut().enumerate() {
        node.id = NodeId::from_index(i);
    }
}

/// Select `algorithm` on every node and compute its hashes.
///
/// Stops at the first node whose hash cannot be computed; nodes before it
/// keep their new hashes.
pub fn hash_nodes(nodes: &mut [MeshNode], algorithm: HashAlgorithm) -> Result<(), NodeError> {
    for node in nodes.iter_mut() {
        node.set_hash_algorithm(algorithm)?;
        node.compute_hashes()?;
    }
    log::debug!("Hashed {} nodes with {}", nodes.len(), algorithm);
    Ok(())
}

/// Parallel version of [`hash_nodes`].
#[cfg(feature = "parallel")]
pub fn hash_nodes_parallel(
    nodes: &mut [MeshNode],
    algorithm: HashAlgorithm,
) -> Result<(), NodeError> {
    use rayon::prelude::*;

    nodes.par_iter_mut().try_for_each(|node| {
        node.set_hash_algorithm(algorithm)?;
        node.compute_hashes()
    })?;
    log::debug!("Hashed {} nodes with {} in parallel", nodes.len(), algorithm);
    Ok(())
}

/// Mark every node whose position hash was already seen earlier in the slice.
///
/// The first occurrence of each position stays unmarked. Marks are only ever
/// set, never cleared; call [`clear_marks`] first to start fresh. Nodes
/// without hashes are skipped.
///
/// Returns the number of nodes marked by this call.
pub fn mark_duplicate_positions(nodes: &mut [MeshNode]) -> usize {
    let mut seen: HashMap<NodeDigest, NodeId> = HashMap::new();
    let mut n_marked = 0;

    for node in nodes.iter_mut() {
        let Some(hash) = node.position_hash() else {
            continue;
        };
        if let Some(&first) = seen.get(hash) {
            log::warn!("Node {} duplicates position of node {}", node.id, first);
            if !node.mark {
                node.mark = true;
                n_marked += 1;
            }
        } else {
            seen.insert(hash.clone(), node.id);
        }
    }

    n_marked
}

/// Clear the mark flag on every node.
pub fn clear_marks(nodes: &mut [MeshNode]) {
    for node in nodes.iter_mut() {
        node.mark = false;
    }
}

/// Group node ids by position hash, keeping only groups with more than one node.
///
/// Groups are in order of first appearance; ids within a group keep slice order.
pub fn duplicate_position_groups(nodes: &[MeshNode]) -> Vec<Vec<NodeId>> {
    let mut index: HashMap<&NodeDigest, usize> = HashMap::new();
    let mut groups: Vec<Vec<NodeId>> = Vec::new();

    for node in nodes {
        let Some(hash) = node.position_hash() else {
            continue;
        };
        match index.get(hash) {
            Some(&g) => groups[g].push(node.id),
            None => {
                index.insert(hash, groups.len());
                groups.push(vec![node.id]);
            }
        }
    }

    groups.retain(|g| g.len() > 1);
    groups
}

/// Find a node by id.
///
/// Checks position `id - 1` first, which is where a consecutively numbered
/// mesh keeps it, then falls back to a linear scan.
pub fn find_node(nodes: &[MeshNode], id: NodeId) -> Option<&MeshNode> {
    if let Some(node) = id.to_index().and_then(|i| nodes.get(i)) {
        if node.id == id {
            return Some(node);
        }
    }
    nodes.iter().find(|n| n.id == id)
}

/// Whether ids run 1..=n in slice order.
pub fn is_consecutively_numbered(nodes: &[MeshNode]) -> bool {
    nodes
        .iter()
        .enumerate()
        .all(|(i, n)| n.id == NodeId::from_index(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<MeshNode> {
        vec![
            MeshNode::new(3, 0.0, 0.0, -1.0),
            MeshNode::new(1, 1.0, 0.0, -2.0),
            MeshNode::new(2, 0.0, 0.0, -4.0),
            MeshNode::new(4, 1.0, 1.0, -3.0),
            MeshNode::new(5, 1.0, 0.0, -2.0),
        ]
    }

    #[test]
    fn test_sort_by_id() {
        let mut nodes = sample_nodes();
        sort_nodes_by_id(&mut nodes);
        let ids: Vec<u64> = nodes.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(is_consecutively_numbered(&nodes));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut nodes = vec![
            MeshNode::new(2, 0.0, 0.0, 0.0),
            MeshNode::new(1, 1.0, 0.0, 0.0),
            MeshNode::new(1, 2.0, 0.0, 0.0),
        ];
        sort_nodes_by_id(&mut nodes);
        assert_eq!(nodes[0].x, 1.0);
        assert_eq!(nodes[1].x, 2.0);
    }

    #[test]
    fn test_renumber() {
        let mut nodes = sample_nodes();
        assert!(!is_consecutively_numbered(&nodes));
        renumber_nodes(&mut nodes);
        assert!(is_consecutively_numbered(&nodes));
        assert_eq!(nodes[0].z, -1.0);
    }

    #[test]
    fn test_hash_nodes() {
        let mut nodes = sample_nodes();
        hash_nodes(&mut nodes, HashAlgorithm::Sha256).unwrap();
        assert!(nodes.iter().all(|n| n.has_hashes()));
        assert!(nodes.iter().all(|n| n.hash_algorithm() == HashAlgorithm::Sha256));
    }

    #[test]
    fn test_mark_duplicate_positions() {
        let mut nodes = sample_nodes();
        // Unhashed nodes are never marked
        assert_eq!(mark_duplicate_positions(&mut nodes), 0);

        hash_nodes(&mut nodes, HashAlgorithm::Sha1).unwrap();
        assert_eq!(mark_duplicate_positions(&mut nodes), 2);
        let marked: Vec<u64> = nodes.iter().filter(|n| n.mark).map(|n| n.id.get()).collect();
        assert_eq!(marked, vec![2, 5]);

        // Already marked nodes are not counted again
        assert_eq!(mark_duplicate_positions(&mut nodes), 0);
        clear_marks(&mut nodes);
        assert!(nodes.iter().all(|n| !n.mark));
    }

    #[test]
    fn test_duplicate_groups() {
        let mut nodes = sample_nodes();
        hash_nodes(&mut nodes, HashAlgorithm::Sha1).unwrap();
        let groups = duplicate_position_groups(&nodes);
        assert_eq!(
            groups,
            vec![
                vec![NodeId::new(3), NodeId::new(2)],
                vec![NodeId::new(1), NodeId::new(5)],
            ]
        );
    }

    #[test]
    fn test_near_duplicates_are_distinct() {
        let mut nodes = vec![
            MeshNode::new(1, 0.1 + 0.2, 0.0, 0.0),
            MeshNode::new(2, 0.3, 0.0, 0.0),
        ];
        hash_nodes(&mut nodes, HashAlgorithm::Sha1).unwrap();
        assert!(duplicate_position_groups(&nodes).is_empty());
    }

    #[test]
    fn test_find_node() {
        let mut nodes = sample_nodes();
        assert_eq!(find_node(&nodes, NodeId::new(4)).map(|n| n.z), Some(-3.0));
        assert!(find_node(&nodes, NodeId::new(9)).is_none());
        assert!(find_node(&nodes, NodeId::UNASSIGNED).is_none());

        sort_nodes_by_id(&mut nodes);
        assert_eq!(find_node(&nodes, NodeId::new(2)).map(|n| n.z), Some(-4.0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_hash_nodes_parallel_matches_serial() {
        let mut serial = sample_nodes();
        let mut parallel = sample_nodes();
        hash_nodes(&mut serial, HashAlgorithm::Sha512).unwrap();
        hash_nodes_parallel(&mut parallel, HashAlgorithm::Sha512).unwrap();
        assert_eq!(serial, parallel);
    }
}

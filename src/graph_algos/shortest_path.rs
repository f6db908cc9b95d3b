use super::GraphNodeMap;

/// Marks the start node, which has no parent
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Construct the path from the start node to the goal node
/// Follows parent indices back from the goal, then reverses
/// Returns None if the parent chain is broken
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Option<Vec<N>>
where 
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        let (node, &(parent_index, _)) = node_map.get_index(current_index)?;
        path.push(node.clone());
        current_index = parent_index;

        // a chain longer than the map is a cycle
        if path.len() > node_map.len() {
            return None;
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return None;
    }

    Some(path)
}

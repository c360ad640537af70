use std::collections::VecDeque;

/// Returns the shortest cycle that contains the edge `a`-`b`, as a list of atom
/// indices starting at `a` and ending at `b`.
///
/// `None` means the edge is not part of any ring.
pub fn shortest_cycle_through(adjacency: &[Vec<usize>], a: usize, b: usize) -> Option<Vec<usize>> {
    let mut previous = vec![usize::MAX; adjacency.len()];
    let mut queue = VecDeque::new();
    previous[a] = a;
    queue.push_back(a);

    while let Some(current) = queue.pop_front() {
        for &next in &adjacency[current] {
            if current == a && next == b {
                continue;
            }
            if previous[next] != usize::MAX {
                continue;
            }
            previous[next] = current;
            if next == b {
                let mut path = vec![b];
                let mut cursor = b;
                while cursor != a {
                    cursor = previous[cursor];
                    path.push(cursor);
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

#[inline]
pub fn is_ring_bond(adjacency: &[Vec<usize>], a: usize, b: usize) -> bool {
    shortest_cycle_through(adjacency, a, b).is_some()
}

/// Splits the graph into connected components, ignoring the listed edges.
///
/// Components are returned in order of their lowest atom index, and atoms inside
/// each component are sorted.
pub fn connected_components(
    adjacency: &[Vec<usize>],
    cut_edges: &[(usize, usize)],
) -> Vec<Vec<usize>> {
    let is_cut = |x: usize, y: usize| {
        cut_edges
            .iter()
            .any(|&(p, q)| (p == x && q == y) || (p == y && q == x))
    };

    let mut component_of = vec![usize::MAX; adjacency.len()];
    let mut components = Vec::new();
    for start in 0..adjacency.len() {
        if component_of[start] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut members = vec![start];
        component_of[start] = id;
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for &next in &adjacency[current] {
                if component_of[next] == usize::MAX && !is_cut(current, next) {
                    component_of[next] = id;
                    members.push(next);
                    stack.push(next);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); n];
        for &(a, b) in edges {
            adj[a].push(b);
            adj[b].push(a);
        }
        adj
    }

    #[test]
    fn ring_edges_are_detected_and_chain_edges_are_not() {
        // Cyclopropane (0,1,2) with a tail atom 3 on atom 0.
        let adj = adjacency(4, &[(0, 1), (1, 2), (2, 0), (0, 3)]);
        assert!(is_ring_bond(&adj, 0, 1));
        assert!(is_ring_bond(&adj, 2, 0));
        assert!(!is_ring_bond(&adj, 0, 3));
    }

    #[test]
    fn shortest_cycle_returns_ring_members() {
        let adj = adjacency(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let cycle = shortest_cycle_through(&adj, 0, 1).unwrap();
        assert_eq!(cycle.len(), 6);
        assert_eq!(cycle.first(), Some(&0));
        assert_eq!(cycle.last(), Some(&1));
    }

    #[test]
    fn connected_components_respect_cut_edges() {
        let adj = adjacency(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let components = connected_components(&adj, &[(2, 1)]);
        assert_eq!(components, vec![vec![0, 1], vec![2, 3, 4]]);
    }
}

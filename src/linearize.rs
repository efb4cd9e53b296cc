//! Branch resolution: prune speculative edges until the graph is a disjoint
//! union of simple paths, then verify it actually is one.

use std::collections::HashSet;

use crate::path_graph::{Direction, EdgeId, PathGraph, Provenance, VertexId};

fn is_new(graph: &PathGraph, e: EdgeId) -> bool {
    matches!(graph.attrs(e).provenance, Some(Provenance::New))
}

/// Resolve branching vertices by dropping all but one speculative edge per
/// branch.
///
/// A branch is resolved only when every incident edge on the branching side
/// is merge-synthesized (`new` provenance) and a unique maximum support
/// count exists among them; the maximum is kept and the rest are marked.
/// Branches mixing provenances, and ties for the maximum, are left
/// untouched; if they persist they are caught by the linearity check.
/// All marked edges are removed in one batch; vertices are never removed.
pub fn linearize(graph: &mut PathGraph) {
    let mut to_remove: HashSet<EdgeId> = HashSet::new();

    for direction in [Direction::In, Direction::Out] {
        for v in graph.vertex_ids() {
            let degree = match direction {
                Direction::In => graph.in_degree(v),
                Direction::Out => graph.out_degree(v),
            };
            if degree < 2 {
                continue;
            }
            let incident: Vec<EdgeId> = graph.incident_edges(v, direction).to_vec();
            if !incident.iter().all(|&e| is_new(graph, e)) {
                continue;
            }
            let max_support = incident
                .iter()
                .map(|&e| graph.attrs(e).support.unwrap_or(0))
                .max()
                .unwrap_or(0);
            let best: Vec<EdgeId> = incident
                .iter()
                .copied()
                .filter(|&e| graph.attrs(e).support.unwrap_or(0) == max_support)
                .collect();
            if best.len() != 1 {
                // Equally-supported alternatives: no arbitrary choice.
                continue;
            }
            let keep = best[0];
            for &e in &incident {
                if e != keep {
                    to_remove.insert(e);
                }
            }
        }
    }

    graph.remove_edges(&to_remove);
}

/// The first vertex violating linearity (in-degree or out-degree above 1),
/// or `None` if every weak component is a simple path or point.
pub fn first_branching_vertex(graph: &PathGraph) -> Option<VertexId> {
    for component in graph.weakly_connected_components() {
        for v in component {
            if graph.in_degree(v) > 1 || graph.out_degree(v) > 1 {
                return Some(v);
            }
        }
    }
    None
}

/// Role of a vertex when looking for its best partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerRole {
    Source,
    Target,
}

/// Pick the neighbor behind the strongest-supported edge out of (or into)
/// `v`, provided the second-best support is at most `max_ratio` of the
/// best. Returns `None` when the choice would be ambiguous.
///
/// Kept as an optionally-available heuristic behind the `-a` option; the
/// default pipeline never calls it.
pub fn best_partner(
    graph: &PathGraph,
    v: VertexId,
    role: PartnerRole,
    max_ratio: f64,
) -> Option<VertexId> {
    let direction = match role {
        PartnerRole::Source => Direction::Out,
        PartnerRole::Target => Direction::In,
    };
    let mut scored: Vec<(u32, VertexId)> = graph
        .incident_edges(v, direction)
        .iter()
        .map(|&e| {
            let (s, t) = graph.endpoints(e);
            let partner = match role {
                PartnerRole::Source => t,
                PartnerRole::Target => s,
            };
            (graph.attrs(e).support.unwrap_or(0), partner)
        })
        .collect();
    match scored.len() {
        0 => None,
        1 => Some(scored[0].1),
        _ => {
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            let ratio = scored[1].0 as f64 / scored[0].0 as f64;
            if ratio <= max_ratio {
                Some(scored[0].1)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_graph::EdgeAttrs;

    fn new_attrs(support: u32) -> EdgeAttrs {
        EdgeAttrs {
            gap: 100,
            support: Some(support),
            provenance: Some(Provenance::New),
        }
    }

    fn path_attrs() -> EdgeAttrs {
        EdgeAttrs {
            gap: 100,
            support: None,
            provenance: Some(Provenance::Path("1".to_string())),
        }
    }

    #[test]
    fn test_unique_max_support_wins() {
        let mut graph = PathGraph::new();
        let a = graph.add_vertex("A+");
        let b = graph.add_vertex("B+");
        let c = graph.add_vertex("C+");
        graph.add_edge(a, c, new_attrs(10)).unwrap();
        graph.add_edge(b, c, new_attrs(3)).unwrap();

        linearize(&mut graph);

        assert!(graph.edge(a, c).is_some());
        assert!(graph.edge(b, c).is_none());
        assert!(first_branching_vertex(&graph).is_none());
    }

    #[test]
    fn test_tied_max_support_stays_unresolved() {
        let mut graph = PathGraph::new();
        let a = graph.add_vertex("A+");
        let b = graph.add_vertex("B+");
        let c = graph.add_vertex("C+");
        graph.add_edge(a, c, new_attrs(5)).unwrap();
        graph.add_edge(b, c, new_attrs(5)).unwrap();

        linearize(&mut graph);

        assert!(graph.edge(a, c).is_some());
        assert!(graph.edge(b, c).is_some());
        assert_eq!(first_branching_vertex(&graph), Some(c));
    }

    #[test]
    fn test_mixed_provenance_branch_is_untouched() {
        let mut graph = PathGraph::new();
        let a = graph.add_vertex("A+");
        let b = graph.add_vertex("B+");
        let c = graph.add_vertex("C+");
        graph.add_edge(a, c, path_attrs()).unwrap();
        graph.add_edge(b, c, new_attrs(10)).unwrap();

        linearize(&mut graph);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(first_branching_vertex(&graph), Some(c));
    }

    #[test]
    fn test_out_branches_are_resolved_too() {
        let mut graph = PathGraph::new();
        let a = graph.add_vertex("A+");
        let b = graph.add_vertex("B+");
        let c = graph.add_vertex("C+");
        graph.add_edge(a, b, new_attrs(2)).unwrap();
        graph.add_edge(a, c, new_attrs(7)).unwrap();

        linearize(&mut graph);

        assert!(graph.edge(a, c).is_some());
        assert!(graph.edge(a, b).is_none());
    }

    #[test]
    fn test_best_partner_ratio_gate() {
        let mut graph = PathGraph::new();
        let a = graph.add_vertex("A+");
        let b = graph.add_vertex("B+");
        let c = graph.add_vertex("C+");
        graph.add_edge(a, b, new_attrs(10)).unwrap();
        graph.add_edge(a, c, new_attrs(2)).unwrap();

        // 2/10 <= 0.3: unambiguous
        assert_eq!(best_partner(&graph, a, PartnerRole::Source, 0.3), Some(b));
        // 2/10 > 0.1: ambiguous
        assert_eq!(best_partner(&graph, a, PartnerRole::Source, 0.1), None);
        // Single neighbor needs no ratio
        assert_eq!(best_partner(&graph, b, PartnerRole::Target, 0.3), Some(a));
        // No neighbors at all
        assert_eq!(best_partner(&graph, b, PartnerRole::Source, 0.3), None);
    }
}

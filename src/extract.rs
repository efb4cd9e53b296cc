//! Extraction of the maximal simple path from each linear component, and
//! removal of reverse-complement duplicate paths.

use std::collections::HashSet;

use crate::error::{StitchError, StitchResult};
use crate::oriented::OrientedContig;
use crate::path_graph::{PathGraph, VertexId};
use crate::path_node::PathNode;

/// Convert a vertex sequence into `PathNode`s, attaching to each node the
/// gap on the edge to its successor. The final node carries no gap.
fn format_path_contigs(graph: &PathGraph, path: &[VertexId]) -> StitchResult<Vec<PathNode>> {
    let mut nodes = Vec::with_capacity(path.len());
    for pair in path.windows(2) {
        let ctg = parse_label(graph, pair[0])?;
        let e = graph.edge(pair[0], pair[1]).ok_or_else(|| {
            StitchError::Invariant(format!(
                "no such edge {} -> {}",
                graph.label(pair[0]),
                graph.label(pair[1])
            ))
        })?;
        nodes.push(PathNode::new(
            ctg.name,
            ctg.orientation,
            Some(graph.attrs(e).gap),
        ));
    }
    if let Some(&last) = path.last() {
        let ctg = parse_label(graph, last)?;
        nodes.push(PathNode::new(ctg.name, ctg.orientation, None));
    }
    Ok(nodes)
}

fn parse_label(graph: &PathGraph, v: VertexId) -> StitchResult<OrientedContig> {
    OrientedContig::parse(graph.label(v)).ok_or_else(|| {
        StitchError::Invariant(format!("malformed vertex label {}", graph.label(v)))
    })
}

/// Extract the path spanning one component, if it has one.
///
/// Components without a unique source are skipped. A unique source with a
/// non-unique sink means the linearity check was subverted and is fatal.
/// The spanning path must be Hamiltonian on the component: same vertex
/// count, same edge count, no repeated vertex. The triple check rejects
/// components that look linear by degrees but hide a disconnected
/// side-structure.
fn component_path(
    graph: &PathGraph,
    component: &[VertexId],
) -> StitchResult<Option<Vec<PathNode>>> {
    let sources: Vec<VertexId> = component
        .iter()
        .copied()
        .filter(|&v| graph.in_degree(v) == 0)
        .collect();
    if sources.len() != 1 {
        return Ok(None);
    }
    let sinks: Vec<VertexId> = component
        .iter()
        .copied()
        .filter(|&v| graph.out_degree(v) == 0)
        .collect();
    if sinks.len() != 1 {
        return Err(StitchError::Invariant(format!(
            "component containing {} has {} sink vertices",
            graph.label(sources[0]),
            sinks.len()
        )));
    }

    let path = match graph.shortest_path(sources[0], sinks[0]) {
        Some(path) => path,
        None => return Ok(None),
    };
    let distinct: HashSet<VertexId> = path.iter().copied().collect();
    if path.len() == component.len()
        && path.len() - 1 == graph.edge_count_within(component)
        && path.len() == distinct.len()
    {
        Ok(Some(format_path_contigs(graph, &path)?))
    } else {
        Ok(None)
    }
}

/// Find the maximal simple path of every linear component.
pub fn extract_paths(graph: &PathGraph) -> StitchResult<Vec<Vec<PathNode>>> {
    eprintln!("Finding paths");
    let components = graph.weakly_connected_components();
    eprintln!("Total number of components in graph: {}", components.len());

    let mut paths = Vec::new();
    for component in &components {
        if let Some(path) = component_path(graph, component)? {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Drop paths sharing any contig (orientation ignored) with an earlier
/// path; this removes reverse-complement duplicates. First seen wins.
pub fn remove_duplicate_paths(paths: Vec<Vec<PathNode>>) -> Vec<Vec<PathNode>> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    for path in paths {
        let is_new = path.iter().all(|node| !visited.contains(&node.contig));
        for node in &path {
            visited.insert(node.contig.clone());
        }
        if is_new {
            kept.push(path);
        }
    }
    kept
}

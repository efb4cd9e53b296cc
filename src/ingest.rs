//! Readers for the primary path file and the unfiltered scaffold graph.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::{StitchError, StitchResult};
use crate::oriented::OrientedContig;
use crate::path_graph::{EdgeAttrs, PathGraph, Provenance};
use crate::tokens::{edge_decl, gap_token, oriented_token, vertex_decl};

fn format_error(file: &str, line: &str) -> StitchError {
    StitchError::Format {
        file: file.to_string(),
        line: line.to_string(),
    }
}

/// Add an edge together with its reverse-complement mirror, creating the
/// endpoint vertices and their reverse complements as needed.
fn add_mirrored_edge(
    graph: &mut PathGraph,
    source: &OrientedContig,
    target: &OrientedContig,
    gap: i64,
    provenance: Provenance,
) -> StitchResult<()> {
    let s = graph.add_vertex(&source.label());
    let t = graph.add_vertex(&target.label());
    let rev_t = graph.add_vertex(&target.rev().label());
    let rev_s = graph.add_vertex(&source.rev().label());
    graph.add_edge(
        s,
        t,
        EdgeAttrs {
            gap,
            support: None,
            provenance: Some(provenance.clone()),
        },
    )?;
    // A hairpin transition (e.g. A+ -> A-) is its own mirror.
    if (rev_t, rev_s) != (s, t) {
        graph.add_edge(
            rev_t,
            rev_s,
            EdgeAttrs {
                gap,
                support: None,
                provenance: Some(provenance),
            },
        )?;
    }
    Ok(())
}

/// Read the primary path file into the graph.
///
/// Each line is `<path_id>\t<tok0> <tok1> ...`; every window of three
/// consecutive tokens whose middle token is a gap becomes a contig
/// transition, added in both orientations. Re-deriving the same ordered
/// transition twice is a fatal inconsistency in the input.
pub fn read_paths(filename: &str, graph: &mut PathGraph) -> StitchResult<()> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        let (path_id, sequence) = line
            .split_once('\t')
            .ok_or_else(|| format_error(filename, line))?;
        let tokens: Vec<&str> = sequence.split(' ').collect();
        for window in tokens.windows(3) {
            let gap = match gap_token(window[1]) {
                Some(gap) => gap,
                None => continue,
            };
            let source =
                oriented_token(window[0]).ok_or_else(|| format_error(filename, line))?;
            let target =
                oriented_token(window[2]).ok_or_else(|| format_error(filename, line))?;
            add_mirrored_edge(
                graph,
                &source,
                &target,
                gap as i64,
                Provenance::Path(path_id.to_string()),
            )?;
        }
    }
    Ok(())
}

/// Read an unfiltered scaffold graph in dot format.
///
/// The first line is a header and is skipped; every other line must be a
/// vertex declaration, an edge declaration, or the closing `}`. Edges carry
/// a gap estimate and a support count but no path provenance. A repeated
/// edge declaration for the same ordered pair overwrites the earlier one.
pub fn read_scaffold_graph(filename: &str) -> StitchResult<PathGraph> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);

    let mut graph = PathGraph::new();
    let mut vertices: Vec<OrientedContig> = Vec::new();
    let mut edge_order: Vec<(String, String)> = Vec::new();
    let mut edges: HashMap<(String, String), (i64, u32)> = HashMap::new();

    let mut past_header = false;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !past_header {
            past_header = true;
            continue;
        }
        if let Some(ctg) = vertex_decl(line) {
            vertices.push(ctg);
            continue;
        }
        if let Some(edge) = edge_decl(line) {
            let key = (edge.source.label(), edge.target.label());
            if !edges.contains_key(&key) {
                edge_order.push(key.clone());
            }
            edges.insert(key, (edge.gap, edge.support));
        } else if line != "}" {
            return Err(format_error(filename, line));
        }
    }

    for ctg in &vertices {
        graph.add_vertex(&ctg.label());
    }
    for key in &edge_order {
        let (gap, support) = edges[key];
        let s = graph.add_vertex(&key.0);
        let t = graph.add_vertex(&key.1);
        graph.add_edge(
            s,
            t,
            EdgeAttrs {
                gap,
                support: Some(support),
                provenance: None,
            },
        )?;
    }
    Ok(graph)
}

//! Merge of alternate path files produced at different support thresholds.
//!
//! Candidate edges are staged against the committed graph and only applied
//! once every threshold level has been scanned, so a later level can never
//! influence decisions made against a half-merged vertex set. The staging
//! policy is conservative: an internal vertex is never bridged or bypassed.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{StitchError, StitchResult};
use crate::oriented::OrientedContig;
use crate::path_graph::{EdgeAttrs, PathGraph, Provenance};
use crate::tokens::{gap_token, oriented_token};

/// Vertices and edges proposed by the alternate path files, kept separate
/// from the committed graph until all levels are processed.
#[derive(Default)]
pub struct StagedMerge {
    vertices: Vec<String>,
    vertex_set: HashSet<String>,
    edge_order: Vec<(String, String)>,
    /// Gap observations per ordered pair; collapsed to a median on commit.
    edges: HashMap<(String, String), Vec<i64>>,
}

impl StagedMerge {
    pub fn new() -> Self {
        StagedMerge::default()
    }

    fn stage_vertex(&mut self, ctg: &OrientedContig) {
        let label = ctg.label();
        if self.vertex_set.insert(label.clone()) {
            self.vertices.push(label);
        }
    }

    fn stage_one(&mut self, source: &OrientedContig, target: &OrientedContig, gap: i64) {
        let key = (source.label(), target.label());
        match self.edges.get_mut(&key) {
            Some(observations) => observations.push(gap),
            None => {
                self.edge_order.push(key.clone());
                self.edges.insert(key, vec![gap]);
            }
        }
    }

    /// Stage an edge and its reverse-complement mirror with the same gap.
    fn stage_edge(&mut self, source: &OrientedContig, target: &OrientedContig, gap: i64) {
        self.stage_one(source, target, gap);
        self.stage_one(&target.rev(), &source.rev(), gap);
    }

    pub fn staged_edge_count(&self) -> usize {
        self.edge_order.len()
    }
}

/// Integer median of the gap observations. For an even count this is the
/// truncated mean of the two middle values.
fn median(values: &[i64]) -> i64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2
    }
}

fn alternate_filename(prefix: &str, level: u32) -> String {
    format!("{}.n{}.abyss-scaffold.path", prefix, level)
}

/// Scan one alternate path file, staging candidate vertices and edges.
/// A missing file is skipped with a notice.
fn read_alternate_pathfile(
    filename: &str,
    graph: &PathGraph,
    staged: &mut StagedMerge,
) -> StitchResult<()> {
    eprintln!("Reading {}", filename);
    if !Path::new(filename).exists() {
        eprintln!("{} does not exist, skipping.", filename);
        return Ok(());
    }
    let file = File::open(filename)?;
    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        let (_, sequence) = line.split_once('\t').ok_or_else(|| StitchError::Format {
            file: filename.to_string(),
            line: line.to_string(),
        })?;
        let tokens: Vec<&str> = sequence.split(' ').collect();
        for window in tokens.windows(3) {
            let gap = match gap_token(window[1]) {
                Some(gap) => gap as i64,
                None => continue,
            };
            let source = oriented_token(window[0]).ok_or_else(|| StitchError::Format {
                file: filename.to_string(),
                line: line.to_string(),
            })?;
            let target = oriented_token(window[2]).ok_or_else(|| StitchError::Format {
                file: filename.to_string(),
                line: line.to_string(),
            })?;
            stage_candidate(graph, staged, &source, &target, gap);
        }
    }
    Ok(())
}

/// Apply the connectivity-safety policy to one candidate transition.
///
/// Candidates are judged against the committed graph only. Cases: both
/// endpoints committed and connected (no new information); both committed,
/// unconnected free ends; exactly one committed free end plus one new
/// vertex; both new. Anything else is dropped.
fn stage_candidate(
    graph: &PathGraph,
    staged: &mut StagedMerge,
    source: &OrientedContig,
    target: &OrientedContig,
    gap: i64,
) {
    let committed_source = graph.vertex(&source.label());
    let committed_target = graph.vertex(&target.label());
    match (committed_source, committed_target) {
        (Some(s), Some(t)) => {
            if graph.edge(s, t).is_some() {
                return;
            }
            if graph.out_degree(s) == 0 && graph.in_degree(t) == 0 {
                staged.stage_edge(source, target, gap);
            }
        }
        (Some(s), None) => {
            if graph.out_degree(s) == 0 {
                staged.stage_vertex(target);
                staged.stage_vertex(&target.rev());
                staged.stage_edge(source, target, gap);
            }
        }
        (None, Some(t)) => {
            if graph.in_degree(t) == 0 {
                staged.stage_vertex(source);
                staged.stage_vertex(&source.rev());
                staged.stage_edge(source, target, gap);
            }
        }
        (None, None) => {
            staged.stage_vertex(source);
            staged.stage_vertex(&source.rev());
            staged.stage_vertex(target);
            staged.stage_vertex(&target.rev());
            staged.stage_edge(source, target, gap);
        }
    }
}

/// Scan the alternate path file for every level in `[min_n, max_n]`.
pub fn read_alternate_paths(
    prefix: &str,
    min_n: u32,
    max_n: u32,
    graph: &PathGraph,
) -> StitchResult<StagedMerge> {
    let mut staged = StagedMerge::new();
    for level in min_n..=max_n {
        let filename = alternate_filename(prefix, level);
        read_alternate_pathfile(&filename, graph, &mut staged)?;
    }
    Ok(staged)
}

/// Commit the staged merge: all vertices first, then one edge per ordered
/// pair with the median gap, the observation count as support, and `new`
/// provenance.
pub fn commit(staged: StagedMerge, graph: &mut PathGraph) -> StitchResult<()> {
    for label in &staged.vertices {
        graph.add_vertex(label);
    }
    for key in &staged.edge_order {
        let observations = &staged.edges[key];
        let s = graph
            .vertex(&key.0)
            .ok_or_else(|| StitchError::Invariant(format!("staged edge from unknown vertex {}", key.0)))?;
        let t = graph
            .vertex(&key.1)
            .ok_or_else(|| StitchError::Invariant(format!("staged edge to unknown vertex {}", key.1)))?;
        graph.add_edge(
            s,
            t,
            EdgeAttrs {
                gap: median(observations),
                support: Some(observations.len() as u32),
                provenance: Some(Provenance::New),
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::read_paths;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base_graph() -> PathGraph {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1\tA+ 500N B-\n").unwrap();
        let mut graph = PathGraph::new();
        read_paths(file.path().to_str().unwrap(), &mut graph).unwrap();
        graph
    }

    fn ctg(token: &str) -> OrientedContig {
        OrientedContig::parse(token).unwrap()
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5]), 5);
        assert_eq!(median(&[3, 9, 5]), 5);
        assert_eq!(median(&[2, 4]), 3);
        assert_eq!(median(&[2, 5]), 3);
        assert_eq!(median(&[1, 2, 3, 10]), 2);
    }

    #[test]
    fn test_connected_pair_is_skipped() {
        let graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("A+"), &ctg("B-"), 100);
        assert_eq!(staged.staged_edge_count(), 0);
    }

    #[test]
    fn test_new_target_off_a_free_end_is_staged() {
        // B- has out-degree 0 and C+ is unknown: stage C+/C- and the edge.
        let graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("B-"), &ctg("C+"), 200);
        // Edge and its mirror
        assert_eq!(staged.staged_edge_count(), 2);
        assert!(staged.vertices.contains(&"C+".to_string()));
        assert!(staged.vertices.contains(&"C-".to_string()));
    }

    #[test]
    fn test_internal_vertex_is_never_bridged() {
        // A+ already has an outgoing edge, so A+ -> C+ must be dropped.
        let graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("A+"), &ctg("C+"), 200);
        assert_eq!(staged.staged_edge_count(), 0);
        assert!(staged.vertices.is_empty());
    }

    #[test]
    fn test_both_new_vertices_are_staged_unconditionally() {
        let graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("X+"), &ctg("Y-"), 200);
        assert_eq!(staged.staged_edge_count(), 2);
        for label in ["X+", "X-", "Y+", "Y-"] {
            assert!(staged.vertices.contains(&label.to_string()));
        }
    }

    #[test]
    fn test_commit_aggregates_by_median() {
        let mut graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("X+"), &ctg("Y-"), 200);
        stage_candidate(&graph, &mut staged, &ctg("X+"), &ctg("Y-"), 400);
        stage_candidate(&graph, &mut staged, &ctg("X+"), &ctg("Y-"), 250);
        commit(staged, &mut graph).unwrap();

        let x = graph.vertex("X+").unwrap();
        let y = graph.vertex("Y-").unwrap();
        let e = graph.edge(x, y).unwrap();
        assert_eq!(graph.attrs(e).gap, 250);
        assert_eq!(graph.attrs(e).support, Some(3));
        assert_eq!(graph.attrs(e).provenance, Some(Provenance::New));

        // The mirror aggregates the same observations
        let ry = graph.vertex("Y+").unwrap();
        let rx = graph.vertex("X-").unwrap();
        let mirror = graph.edge(ry, rx).unwrap();
        assert_eq!(graph.attrs(mirror).gap, 250);
        assert_eq!(graph.attrs(mirror).support, Some(3));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let graph = base_graph();
        let staged = read_alternate_paths("/nonexistent/prefix", 1, 3, &graph).unwrap();
        assert_eq!(staged.staged_edge_count(), 0);
    }

    #[test]
    fn test_candidates_judged_against_committed_graph_only() {
        // X+ staged at one level stays unknown to the committed graph, so a
        // later candidate out of X+ still falls under the both-new case.
        let graph = base_graph();
        let mut staged = StagedMerge::new();
        stage_candidate(&graph, &mut staged, &ctg("X+"), &ctg("Y-"), 200);
        stage_candidate(&graph, &mut staged, &ctg("Y-"), &ctg("Z+"), 100);
        // Both candidates staged with mirrors
        assert_eq!(staged.staged_edge_count(), 4);
    }
}

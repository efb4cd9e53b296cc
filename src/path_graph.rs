use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::error::{StitchError, StitchResult};

/// Index of a vertex in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

/// Index of an edge in the graph arena. Stable across edge removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

/// Direction of traversal relative to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
}

/// Where an edge came from: a primary input path, or synthesized while
/// merging alternate path files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Path(String),
    New,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Path(id) => write!(f, "{}", id),
            Provenance::New => write!(f, "new"),
        }
    }
}

/// Per-edge attributes.
///
/// Primary path edges carry a provenance but no support count; edges read
/// from an unfiltered scaffold graph carry a support count but no
/// provenance; merged edges carry both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeAttrs {
    /// Estimated gap to the next contig; negative means overlap.
    pub gap: i64,
    /// Number of input observations backing the edge.
    pub support: Option<u32>,
    pub provenance: Option<Provenance>,
}

#[derive(Debug)]
struct VertexData {
    label: String,
    out: Vec<EdgeId>,
    inc: Vec<EdgeId>,
}

#[derive(Debug)]
struct EdgeData {
    source: VertexId,
    target: VertexId,
    attrs: EdgeAttrs,
    removed: bool,
}

/// Directed graph over oriented-contig labels.
///
/// Arena-backed adjacency lists with a label index and an ordered-pair edge
/// index. At most one directed edge per ordered vertex pair; vertices are
/// never removed, edges only in batches during linearization.
#[derive(Debug, Default)]
pub struct PathGraph {
    vertices: Vec<VertexData>,
    edges: Vec<EdgeData>,
    label_index: HashMap<String, VertexId>,
    pair_index: HashMap<(VertexId, VertexId), EdgeId>,
    live_edges: usize,
}

impl PathGraph {
    pub fn new() -> Self {
        PathGraph::default()
    }

    /// Add a vertex with the given label, or return the existing one.
    pub fn add_vertex(&mut self, label: &str) -> VertexId {
        if let Some(&v) = self.label_index.get(label) {
            return v;
        }
        let v = VertexId(self.vertices.len());
        self.vertices.push(VertexData {
            label: label.to_string(),
            out: Vec::new(),
            inc: Vec::new(),
        });
        self.label_index.insert(label.to_string(), v);
        v
    }

    pub fn vertex(&self, label: &str) -> Option<VertexId> {
        self.label_index.get(label).copied()
    }

    pub fn has_vertex(&self, label: &str) -> bool {
        self.label_index.contains_key(label)
    }

    pub fn label(&self, v: VertexId) -> &str {
        &self.vertices[v.0].label
    }

    /// Add a directed edge. A second edge for the same ordered pair is an
    /// invariant violation.
    pub fn add_edge(&mut self, s: VertexId, t: VertexId, attrs: EdgeAttrs) -> StitchResult<EdgeId> {
        if self.pair_index.contains_key(&(s, t)) {
            return Err(StitchError::Invariant(format!(
                "duplicate edge {} -> {}",
                self.label(s),
                self.label(t)
            )));
        }
        let e = EdgeId(self.edges.len());
        self.edges.push(EdgeData {
            source: s,
            target: t,
            attrs,
            removed: false,
        });
        self.pair_index.insert((s, t), e);
        self.vertices[s.0].out.push(e);
        self.vertices[t.0].inc.push(e);
        self.live_edges += 1;
        Ok(e)
    }

    /// Look up the edge for an ordered vertex pair.
    pub fn edge(&self, s: VertexId, t: VertexId) -> Option<EdgeId> {
        self.pair_index.get(&(s, t)).copied()
    }

    pub fn attrs(&self, e: EdgeId) -> &EdgeAttrs {
        &self.edges[e.0].attrs
    }

    pub fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        let edge = &self.edges[e.0];
        (edge.source, edge.target)
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.vertices[v.0].out.len()
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.vertices[v.0].inc.len()
    }

    /// Edges incident to `v` in the given direction, in insertion order.
    pub fn incident_edges(&self, v: VertexId, direction: Direction) -> &[EdgeId] {
        match direction {
            Direction::Out => &self.vertices[v.0].out,
            Direction::In => &self.vertices[v.0].inc,
        }
    }

    /// Neighboring vertices of `v` in the given direction.
    pub fn neighbors(&self, v: VertexId, direction: Direction) -> Vec<VertexId> {
        self.incident_edges(v, direction)
            .iter()
            .map(|&e| match direction {
                Direction::Out => self.edges[e.0].target,
                Direction::In => self.edges[e.0].source,
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len())
            .map(EdgeId)
            .filter(move |&e| !self.edges[e.0].removed)
    }

    /// Weakly-connected components, each a list of vertices in BFS
    /// discovery order. Components are ordered by their lowest vertex id.
    pub fn weakly_connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut seen = vec![false; self.vertices.len()];
        let mut components = Vec::new();
        for start in self.vertex_ids() {
            if seen[start.0] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            seen[start.0] = true;
            queue.push_back(start);
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for direction in [Direction::Out, Direction::In] {
                    for u in self.neighbors(v, direction) {
                        if !seen[u.0] {
                            seen[u.0] = true;
                            queue.push_back(u);
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// A shortest directed path from `s` to `t` by edge count, or `None` if
    /// `t` is unreachable. Ties are broken by adjacency insertion order
    /// (first found), so results are deterministic.
    pub fn shortest_path(&self, s: VertexId, t: VertexId) -> Option<Vec<VertexId>> {
        let mut parent: HashMap<VertexId, VertexId> = HashMap::new();
        let mut seen = vec![false; self.vertices.len()];
        let mut queue = VecDeque::new();
        seen[s.0] = true;
        queue.push_back(s);
        while let Some(v) = queue.pop_front() {
            if v == t {
                let mut path = vec![t];
                let mut cur = t;
                while let Some(&prev) = parent.get(&cur) {
                    path.push(prev);
                    cur = prev;
                }
                path.reverse();
                return Some(path);
            }
            for u in self.neighbors(v, Direction::Out) {
                if !seen[u.0] {
                    seen[u.0] = true;
                    parent.insert(u, v);
                    queue.push_back(u);
                }
            }
        }
        None
    }

    /// Number of edges whose source lies in the given vertex set. For a
    /// weakly-connected component this is the component's edge count.
    pub fn edge_count_within(&self, vertices: &[VertexId]) -> usize {
        vertices.iter().map(|&v| self.out_degree(v)).sum()
    }

    /// Remove a batch of edges. Vertices are never removed.
    pub fn remove_edges(&mut self, to_remove: &HashSet<EdgeId>) {
        for &e in to_remove {
            let edge = &mut self.edges[e.0];
            if edge.removed {
                continue;
            }
            edge.removed = true;
            self.live_edges -= 1;
            let (s, t) = (edge.source, edge.target);
            self.pair_index.remove(&(s, t));
            self.vertices[s.0].out.retain(|&x| x != e);
            self.vertices[t.0].inc.retain(|&x| x != e);
        }
    }
}

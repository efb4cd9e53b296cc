//! Debug dump of the merged path graph in dot format.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::path_graph::PathGraph;

/// Write the graph in dot format: one quoted label per vertex, then one
/// edge line per edge with its gap, support count when known, and
/// provenance.
pub fn write_dot<W: Write>(graph: &PathGraph, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph G {{")?;
    for v in graph.vertex_ids() {
        writeln!(out, "\"{}\"", graph.label(v))?;
    }
    for e in graph.edge_ids() {
        let (s, t) = graph.endpoints(e);
        let attrs = graph.attrs(e);
        write!(out, "\"{}\" -> \"{}\" [d={}", graph.label(s), graph.label(t), attrs.gap)?;
        if let Some(n) = attrs.support {
            write!(out, " n={}", n)?;
        }
        if let Some(provenance) = &attrs.provenance {
            write!(out, " path={}", provenance)?;
        }
        writeln!(out, "]")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Dump the graph to `<prefix>.scaffold.dot`.
pub fn dump_graph(graph: &PathGraph, prefix: &str) -> io::Result<()> {
    let filename = format!("{}.scaffold.dot", prefix);
    eprintln!("Printing graph {}", filename);
    let file = File::create(&filename)?;
    let mut writer = BufWriter::new(file);
    write_dot(graph, &mut writer)?;
    writer.flush()
}

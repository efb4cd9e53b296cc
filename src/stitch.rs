//! Configuration and pipeline driver.

use std::io::{self, Write};

use clap::Parser;

use crate::alt_merge;
use crate::dot_out;
use crate::error::{StitchError, StitchResult};
use crate::extract;
use crate::ingest;
use crate::linearize;
use crate::path_graph::PathGraph;
use crate::path_node::PathNode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "scafstitch",
    version,
    about = "Stitch together scaffold paths using multi-threshold path-search output"
)]
pub struct Args {
    /// Best-n path file from the path-search tool
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Minimum 'n' the path-search tool was run with
    #[arg(long = "min_n")]
    pub min_n: u32,

    /// Maximum 'n' the path-search tool was run with
    #[arg(long = "max_n")]
    pub max_n: u32,

    /// Unfiltered scaffold graph dot file
    #[arg(short = 'g')]
    pub graph: String,

    /// Ratio of second-best to best edge support to accept a best partner
    #[arg(short = 'a', default_value_t = 0.3)]
    pub ratio: f64,

    /// Output file prefix
    #[arg(short = 'p', default_value = "out")]
    pub prefix: String,
}

/// Run the full pipeline and return the deduplicated stitched paths:
/// ingest the primary paths, merge the alternate levels, dump the merged
/// graph, linearize, assert linearity, extract and deduplicate.
pub fn stitch_paths(args: &Args) -> StitchResult<Vec<Vec<PathNode>>> {
    eprintln!("Building path graph");
    let mut graph = PathGraph::new();
    ingest::read_paths(&args.path, &mut graph)?;

    let staged = alt_merge::read_alternate_paths(&args.prefix, args.min_n, args.max_n, &graph)?;
    alt_merge::commit(staged, &mut graph)?;

    dot_out::dump_graph(&graph, &format!("{}.out", args.prefix))?;

    linearize::linearize(&mut graph);
    if let Some(v) = linearize::first_branching_vertex(&graph) {
        return Err(StitchError::Invariant(format!(
            "graph is not linear after branch resolution: vertex {} still branches",
            graph.label(v)
        )));
    }

    let paths = extract::extract_paths(&graph)?;
    Ok(extract::remove_duplicate_paths(paths))
}

/// Serialize stitched paths, one tab-separated record per path with a
/// sequential id. Paths of fewer than two tokens are suppressed.
pub fn write_paths<W: Write>(paths: &[Vec<PathNode>], out: &mut W) -> io::Result<()> {
    let mut path_id = 0usize;
    for path in paths {
        let mut tokens = Vec::new();
        for node in path {
            tokens.push(node.oriented_contig());
            if let Some(gap) = node.gap_token() {
                tokens.push(gap);
            }
        }
        if tokens.len() < 2 {
            continue;
        }
        writeln!(out, "{}\t{}", path_id, tokens.join(" "))?;
        path_id += 1;
    }
    Ok(())
}

/// Run the pipeline and print the stitched paths to stdout.
pub fn run_stitch(args: &Args) -> StitchResult<()> {
    eprintln!("Running scaffold path stitching...");
    let paths = stitch_paths(args)?;
    let stdout = io::stdout();
    write_paths(&paths, &mut stdout.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oriented::Orientation;

    #[test]
    fn test_write_paths_grammar_and_suppression() {
        let paths = vec![
            vec![
                PathNode::new("A", Orientation::Forward, Some(500)),
                PathNode::new("B", Orientation::Reverse, Some(300)),
                PathNode::new("C", Orientation::Forward, None),
            ],
            // A single-contig path serializes to one token and is dropped.
            vec![PathNode::new("D", Orientation::Forward, None)],
            vec![
                PathNode::new("E", Orientation::Reverse, Some(20)),
                PathNode::new("F", Orientation::Forward, None),
            ],
        ];
        let mut buffer = Vec::new();
        write_paths(&paths, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "0\tA+ 500N B- 300N C+\n1\tE- 20N F+\n");
    }
}

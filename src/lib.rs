pub mod alt_merge;
pub mod dot_out;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod linearize;
pub mod oriented;
pub mod path_graph;
pub mod path_node;
pub mod stitch;
pub mod tokens;

pub use error::{StitchError, StitchResult};
pub use stitch::{run_stitch, stitch_paths, write_paths, Args};

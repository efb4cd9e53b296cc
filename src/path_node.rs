use crate::oriented::Orientation;

/// One step of a stitched scaffold path: a contig, its orientation, and the
/// estimated gap to the next step. The final node of a path carries no gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub contig: String,
    pub orientation: Orientation,
    pub gap_size: Option<i64>,
}

impl PathNode {
    pub fn new(contig: impl Into<String>, orientation: Orientation, gap_size: Option<i64>) -> Self {
        PathNode {
            contig: contig.into(),
            orientation,
            gap_size,
        }
    }

    /// The oriented contig string, e.g. `"scaf12+"`.
    pub fn oriented_contig(&self) -> String {
        format!("{}{}", self.contig, self.orientation)
    }

    /// The gap to the next node as an output token, e.g. `"500N"`.
    pub fn gap_token(&self) -> Option<String> {
        self.gap_size.map(|gap| format!("{}N", gap))
    }
}

use std::fmt;

/// Strand orientation of a contig, written as `+` or `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// Parse an orientation sigil (`+` or `-`)
    pub fn from_sigil(c: char) -> Option<Self> {
        match c {
            '+' => Some(Orientation::Forward),
            '-' => Some(Orientation::Reverse),
            _ => None,
        }
    }

    /// Flip the orientation. Flipping twice returns the original.
    pub fn flip(&self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    /// Get the orientation sign as a char ('+' or '-')
    pub fn sigil(&self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sigil())
    }
}

/// A contig identifier paired with a strand orientation.
///
/// The reverse complement of an oriented contig is the same contig on the
/// opposite strand; the path graph is kept symmetric under this mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrientedContig {
    pub name: String,
    pub orientation: Orientation,
}

impl OrientedContig {
    pub fn new(name: impl Into<String>, orientation: Orientation) -> Self {
        OrientedContig {
            name: name.into(),
            orientation,
        }
    }

    /// Parse a token of the form `<name><sigil>`, where `<name>` is one or
    /// more non-whitespace characters and `<sigil>` is `+` or `-`.
    pub fn parse(token: &str) -> Option<Self> {
        let (name, orientation) = if let Some(name) = token.strip_suffix('+') {
            (name, Orientation::Forward)
        } else if let Some(name) = token.strip_suffix('-') {
            (name, Orientation::Reverse)
        } else {
            return None;
        };
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return None;
        }
        Some(OrientedContig::new(name, orientation))
    }

    /// The reverse complement: same contig, flipped orientation.
    pub fn rev(&self) -> Self {
        OrientedContig {
            name: self.name.clone(),
            orientation: self.orientation.flip(),
        }
    }

    /// The vertex label used in the path graph (`name` + sigil).
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OrientedContig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_is_involution() {
        assert_eq!(Orientation::Forward.flip(), Orientation::Reverse);
        assert_eq!(Orientation::Forward.flip().flip(), Orientation::Forward);
        assert_eq!(Orientation::Reverse.flip().flip(), Orientation::Reverse);
    }

    #[test]
    fn test_parse_oriented_contig() {
        let ctg = OrientedContig::parse("scaf12+").unwrap();
        assert_eq!(ctg.name, "scaf12");
        assert_eq!(ctg.orientation, Orientation::Forward);
        assert_eq!(ctg.to_string(), "scaf12+");

        let ctg = OrientedContig::parse("188729-5-").unwrap();
        assert_eq!(ctg.name, "188729-5");
        assert_eq!(ctg.orientation, Orientation::Reverse);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert!(OrientedContig::parse("").is_none());
        assert!(OrientedContig::parse("+").is_none());
        assert!(OrientedContig::parse("scaf12").is_none());
        assert!(OrientedContig::parse("scaf 12+").is_none());
    }

    #[test]
    fn test_rev_round_trip() {
        let ctg = OrientedContig::parse("A+").unwrap();
        assert_eq!(ctg.rev().to_string(), "A-");
        assert_eq!(ctg.rev().rev(), ctg);
    }
}

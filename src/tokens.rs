//! Tokenizers for the path-file and dot-format grammars.
//!
//! These are deliberately small, anchored grammars: a token or line either
//! matches in full or is rejected, there is no general pattern matching.

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, multispace1};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;

use crate::oriented::OrientedContig;

/// An edge declaration from an unfiltered scaffold graph file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldEdge {
    pub source: OrientedContig,
    pub target: OrientedContig,
    pub gap: i64,
    pub support: u32,
}

/// Parse a gap token (`^\d+N$`) into its integer value.
pub fn gap_token(token: &str) -> Option<u64> {
    let result: IResult<&str, &str> = all_consuming(terminated(digit1, char('N')))(token);
    match result {
        Ok((_, digits)) => digits.parse().ok(),
        Err(_) => None,
    }
}

/// Parse an oriented-contig token (`^\S+[+-]$`).
pub fn oriented_token(token: &str) -> Option<OrientedContig> {
    OrientedContig::parse(token)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while1(|c| c != '"'), char('"'))(input)
}

fn int(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)
}

fn uint(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse)(input)
}

fn vertex_line(input: &str) -> IResult<&str, &str> {
    let (input, id) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("[l=")(input)?;
    let (input, _) = digit1(input)?;
    let (input, _) = char(']')(input)?;
    Ok((input, id))
}

fn edge_line(input: &str) -> IResult<&str, (&str, &str, i64, u32)> {
    let (input, source) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("->")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, target) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("[d=")(input)?;
    let (input, gap) = int(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("e=")(input)?;
    let (input, _) = digit1(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag("n=")(input)?;
    let (input, support) = uint(input)?;
    let (input, _) = char(']')(input)?;
    Ok((input, (source, target, gap, support)))
}

/// Parse a scaffold-graph vertex declaration: `"<id>" [l=<int>]`.
pub fn vertex_decl(line: &str) -> Option<OrientedContig> {
    let result: IResult<&str, &str> = all_consuming(vertex_line)(line);
    match result {
        Ok((_, id)) => OrientedContig::parse(id),
        Err(_) => None,
    }
}

/// Parse a scaffold-graph edge declaration:
/// `"<src>" -> "<tgt>" [d=<int> e=<int> n=<int>]`.
pub fn edge_decl(line: &str) -> Option<ScaffoldEdge> {
    let result: IResult<&str, (&str, &str, i64, u32)> = all_consuming(edge_line)(line);
    match result {
        Ok((_, (source, target, gap, support))) => Some(ScaffoldEdge {
            source: OrientedContig::parse(source)?,
            target: OrientedContig::parse(target)?,
            gap,
            support,
        }),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oriented::Orientation;

    #[test]
    fn test_gap_token() {
        assert_eq!(gap_token("500N"), Some(500));
        assert_eq!(gap_token("0N"), Some(0));
        assert_eq!(gap_token("N"), None);
        assert_eq!(gap_token("500"), None);
        assert_eq!(gap_token("500Nx"), None);
        assert_eq!(gap_token("x500N"), None);
        assert_eq!(gap_token("-5N"), None);
    }

    #[test]
    fn test_vertex_decl() {
        let ctg = vertex_decl("\"scaf12+\" [l=4500]").unwrap();
        assert_eq!(ctg.name, "scaf12");
        assert_eq!(ctg.orientation, Orientation::Forward);
        assert!(vertex_decl("\"scaf12+\"").is_none());
        assert!(vertex_decl("\"scaf12\" [l=4500]").is_none());
    }

    #[test]
    fn test_edge_decl() {
        let edge = edge_decl("\"A+\" -> \"B-\" [d=-20 e=10 n=7]").unwrap();
        assert_eq!(edge.source.label(), "A+");
        assert_eq!(edge.target.label(), "B-");
        assert_eq!(edge.gap, -20);
        assert_eq!(edge.support, 7);
    }

    #[test]
    fn test_edge_decl_rejects_partial_lines() {
        assert!(edge_decl("\"A+\" -> \"B-\"").is_none());
        assert!(edge_decl("\"A+\" -> \"B-\" [d=5 n=7]").is_none());
        assert!(edge_decl("\"A+\" -> \"B-\" [d=5 e=1 n=7] trailing").is_none());
    }
}

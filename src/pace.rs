//! Reading graphs and writing solutions in the PACE 2018 Steiner tree text format.
//!
//! A graph file looks like this (blank lines and lines starting with `#` are ignored,
//! other sections are skipped):
//! ```text
//! SECTION Graph
//! Nodes 3
//! Edges 2
//! E 1 2 4
//! E 2 3 1
//! END
//!
//! SECTION Terminals
//! Terminals 2
//! T 1
//! T 3
//! END
//!
//! EOF
//! ```
//! A solution is a `VALUE <weight>` line followed by one `u v` line per tree edge.

use crate::graph::VertexId;
use crate::{Graph, SteinerTree, TreeEdge};
use num_traits::{PrimInt, Unsigned};
use std::fmt::Display;
use std::io::{self, Write};
use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};
use thiserror::Error;

/// Magic first line of SteinLib files, which otherwise share the format.
const STEINLIB_MAGIC: &str = "33D32945";

/// An error in PACE input, with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line})")]
pub struct ParseError {
    line: usize,
    message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Non-empty, non-comment lines split into whitespace separated tokens.
struct TokenLines<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    last_line: usize,
}

impl<'a> TokenLines<'a> {
    fn new(text: &'a str) -> Self {
        TokenLines {
            lines: text.lines().enumerate().peekable(),
            last_line: 0,
        }
    }

    fn next_tokens(&mut self) -> Option<(usize, Vec<&'a str>)> {
        for (n, line) in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.last_line = n + 1;
            return Some((n + 1, trimmed.split_whitespace().collect()));
        }
        None
    }

    /// Next line, or an error naming what was expected instead of the end of input.
    fn expect_tokens(&mut self, expected: &str) -> ParseResult<(usize, Vec<&'a str>)> {
        let last_line = self.last_line;
        self.next_tokens().ok_or_else(|| {
            ParseError::new(last_line + 1, format!("expected '{expected}' but input ended"))
        })
    }

    /// A `KEY value` line.
    fn expect_key_value<T: FromStr>(&mut self, key: &str) -> ParseResult<T>
    where
        T::Err: Display,
    {
        let (line, tokens) = self.expect_tokens(key)?;
        match tokens.as_slice() {
            [found, value] if *found == key => parse_token(line, value, key),
            _ => Err(ParseError::new(
                line,
                format!("expected '{key} <value>' but got '{}'", tokens.join(" ")),
            )),
        }
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str, what: &str) -> ParseResult<T>
where
    T::Err: Display,
{
    token
        .parse()
        .map_err(|err| ParseError::new(line, format!("could not parse {what} '{token}': {err}")))
}

struct GraphSection<W> {
    line: usize,
    n_vertices: usize,
    edges: Vec<(VertexId, VertexId, W)>,
}

/// Parses a graph with terminals from PACE text.
///
/// # Parameters
/// * `text` - the whole input file.
///
/// # Returns
/// * The graph, or a `ParseError` if the text does not follow the format, if the declared edge
///   or terminal counts do not match the entries, or if an entry references a vertex outside
///   `1..=Nodes`.
///
/// # Examples
/// ```
///use steiner_apx::{pace, Graph};
///
///let text = "SECTION Graph\nNodes 2\nEdges 1\nE 1 2 7\nEND\n\
///            SECTION Terminals\nTerminals 2\nT 1\nT 2\nEND\nEOF\n";
///let graph: Graph<u64> = pace::parse_graph(text).unwrap();
///assert_eq!(graph.weight(1, 2), Some(7));
/// ```
pub fn parse_graph<W>(text: &str) -> ParseResult<Graph<W>>
where
    W: PrimInt + Unsigned + FromStr,
    W::Err: Display,
{
    let mut lines = TokenLines::new(text);
    let has_magic = lines
        .lines
        .peek()
        .is_some_and(|(_, first)| first.trim_start().starts_with(STEINLIB_MAGIC));
    if has_magic {
        lines.lines.next();
    }

    let mut graph_section: Option<GraphSection<W>> = None;
    let mut terminals: Option<Vec<VertexId>> = None;
    loop {
        let (line, tokens) = lines.expect_tokens("EOF")?;
        match tokens.as_slice() {
            ["SECTION", "Graph"] => graph_section = Some(parse_graph_section(&mut lines, line)?),
            ["SECTION", "Terminals"] => terminals = Some(parse_terminals_section(&mut lines)?),
            ["SECTION", _] => skip_section(&mut lines)?,
            ["EOF"] => break,
            _ => {
                return Err(ParseError::new(
                    line,
                    format!("expected 'SECTION' or 'EOF' but got '{}'", tokens.join(" ")),
                ))
            }
        }
    }

    let section = graph_section
        .ok_or_else(|| ParseError::new(lines.last_line, "missing 'SECTION Graph'"))?;
    let terminals = terminals
        .ok_or_else(|| ParseError::new(lines.last_line, "missing 'SECTION Terminals'"))?;
    Graph::new(section.n_vertices, &section.edges, &terminals)
        .map_err(|err| ParseError::new(section.line, err.to_string()))
}

fn parse_graph_section<W>(lines: &mut TokenLines, line: usize) -> ParseResult<GraphSection<W>>
where
    W: FromStr,
    W::Err: Display,
{
    let n_vertices: usize = lines.expect_key_value("Nodes")?;
    let n_edges: usize = lines.expect_key_value("Edges")?;
    let mut edges: Vec<(VertexId, VertexId, W)> = Vec::new();
    loop {
        let (line, tokens) = lines.expect_tokens("END")?;
        match tokens.as_slice() {
            ["E", u, v, w] => edges.push((
                parse_token(line, u, "vertex")?,
                parse_token(line, v, "vertex")?,
                parse_token(line, w, "edge weight")?,
            )),
            ["END"] => break,
            _ => {
                return Err(ParseError::new(
                    line,
                    format!("expected 'E <u> <v> <weight>' or 'END' but got '{}'", tokens.join(" ")),
                ))
            }
        }
    }
    if edges.len() != n_edges {
        return Err(ParseError::new(
            lines.last_line,
            format!("declared {n_edges} edges but found {}", edges.len()),
        ));
    }
    Ok(GraphSection {
        line,
        n_vertices,
        edges,
    })
}

fn parse_terminals_section(lines: &mut TokenLines) -> ParseResult<Vec<VertexId>> {
    let n_terminals: usize = lines.expect_key_value("Terminals")?;
    let mut terminals = Vec::new();
    loop {
        let (line, tokens) = lines.expect_tokens("END")?;
        match tokens.as_slice() {
            ["T", t] => terminals.push(parse_token(line, t, "terminal")?),
            ["END"] => break,
            _ => {
                return Err(ParseError::new(
                    line,
                    format!("expected 'T <vertex>' or 'END' but got '{}'", tokens.join(" ")),
                ))
            }
        }
    }
    if terminals.len() != n_terminals {
        return Err(ParseError::new(
            lines.last_line,
            format!("declared {n_terminals} terminals but found {}", terminals.len()),
        ));
    }
    Ok(terminals)
}

fn skip_section(lines: &mut TokenLines) -> ParseResult<()> {
    loop {
        let (_, tokens) = lines.expect_tokens("END")?;
        if tokens == ["END"] {
            return Ok(());
        }
    }
}

/// Writes a tree as a PACE solution: `VALUE <weight>` and one `u v` line per edge.
pub fn write_solution<W, O>(out: &mut O, tree: &SteinerTree<W>) -> io::Result<()>
where
    W: PrimInt + Unsigned + Display,
    O: Write,
{
    writeln!(out, "VALUE {}", tree.weight())?;
    for (u, v) in tree.edge_pairs() {
        writeln!(out, "{u} {v}")?;
    }
    Ok(())
}

/// Reads a PACE solution back into a tree over `graph`. Edge weights are taken from the
/// lightest graph edge between the endpoints; use `SteinerTree::verify` to check the result.
pub fn parse_solution<W>(text: &str, graph: &Graph<W>) -> ParseResult<SteinerTree<W>>
where
    W: PrimInt + Unsigned + FromStr,
    W::Err: Display,
{
    let mut lines = TokenLines::new(text);
    let value: W = lines.expect_key_value("VALUE")?;
    let mut edges = Vec::new();
    while let Some((line, tokens)) = lines.next_tokens() {
        let [u, v] = tokens.as_slice() else {
            return Err(ParseError::new(
                line,
                format!("expected '<u> <v>' but got '{}'", tokens.join(" ")),
            ));
        };
        let u: VertexId = parse_token(line, u, "vertex")?;
        let v: VertexId = parse_token(line, v, "vertex")?;
        let weight = graph
            .weight(u, v)
            .ok_or_else(|| ParseError::new(line, format!("({u}, {v}) is not an edge of the graph")))?;
        edges.push(TreeEdge::new(u, v, weight));
    }
    Ok(SteinerTree::new(value, edges))
}

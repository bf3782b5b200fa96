use crate::data_wrappers::WeightedEdge;
use crate::validation::GraphValidator;
use crate::{pace, SteinerError};
use num_traits::{PrimInt, Unsigned};
use std::fmt::Display;
use std::str::FromStr;

/// Vertex identifier as seen by callers: an integer in `1..=n_vertices`.
pub type VertexId = usize;

/// An undirected, edge-weighted graph with a fixed set of terminal vertices.
///
/// Vertices are numbered `1..=n_vertices` at the public boundary. Parallel edges are kept,
/// self-loops are accepted but can never be part of a Steiner tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<W> {
    edges: Vec<WeightedEdge<W>>,
    adjacency: Vec<Vec<(usize, W)>>,
    is_terminal: Vec<bool>,
    terminals: Vec<usize>,
}

impl<W: PrimInt + Unsigned> Graph<W> {
    /// Creates a graph from an edge list and a terminal list.
    ///
    /// # Parameters
    /// * `n_vertices` - the number of vertices, which are numbered `1..=n_vertices`.
    /// * `edges` - the edges as `(u, v, weight)` triples. Order matters only for tie breaking.
    /// * `terminals` - the vertices that must be connected. Duplicates are ignored.
    ///
    /// # Returns
    /// * The graph, or `SteinerError::InvalidInput` if an edge endpoint or a terminal lies
    ///   outside `1..=n_vertices`.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::Graph;
    ///
    ///let graph = Graph::new(4, &[(1, 2, 1_u32), (2, 3, 1), (3, 4, 1)], &[1, 4]).unwrap();
    ///assert_eq!(graph.n_edges(), 3);
    ///assert!(graph.is_terminal(4));
    /// ```
    pub fn new(
        n_vertices: usize,
        edges: &[(VertexId, VertexId, W)],
        terminals: &[VertexId],
    ) -> Result<Self, SteinerError> {
        GraphValidator::new(n_vertices, edges, terminals).validate_input_data()?;

        let edges: Vec<WeightedEdge<W>> = edges
            .iter()
            .map(|&(u, v, weight)| WeightedEdge {
                left: u - 1,
                right: v - 1,
                weight,
            })
            .collect();
        let mut is_terminal = vec![false; n_vertices];
        terminals.iter().for_each(|&t| is_terminal[t - 1] = true);
        let terminals = (0..n_vertices).filter(|&n| is_terminal[n]).collect();

        Ok(Graph {
            adjacency: Self::build_adjacency(n_vertices, &edges),
            edges,
            is_terminal,
            terminals,
        })
    }

    fn build_adjacency(n_vertices: usize, edges: &[WeightedEdge<W>]) -> Vec<Vec<(usize, W)>> {
        let mut adjacency = vec![Vec::new(); n_vertices];
        for edge in edges.iter().filter(|edge| !edge.is_self_loop()) {
            adjacency[edge.left].push((edge.right, edge.weight));
            adjacency[edge.right].push((edge.left, edge.weight));
        }
        adjacency
    }

    pub fn n_vertices(&self) -> usize {
        self.is_terminal.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn n_terminals(&self) -> usize {
        self.terminals.len()
    }

    /// Iterator over all edges as `(u, v, weight)`, in the order they were given.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, W)> + '_ {
        self.edges
            .iter()
            .map(|edge| (edge.left + 1, edge.right + 1, edge.weight))
    }

    /// Iterator over the terminal vertices in ascending order.
    pub fn terminals(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.terminals.iter().map(|&t| t + 1)
    }

    /// Whether `vertex` is a terminal. Vertices outside `1..=n_vertices` are not.
    pub fn is_terminal(&self, vertex: VertexId) -> bool {
        vertex
            .checked_sub(1)
            .and_then(|n| self.is_terminal.get(n))
            .copied()
            .unwrap_or(false)
    }

    /// Weight of the lightest edge between `u` and `v`, if there is one.
    pub fn weight(&self, u: VertexId, v: VertexId) -> Option<W> {
        if u == 0 || v == 0 || u > self.n_vertices() {
            return None;
        }
        self.adjacency[u - 1]
            .iter()
            .filter(|&&(to, _)| to + 1 == v)
            .map(|&(_, weight)| weight)
            .min()
    }

    pub(crate) fn edge_list(&self) -> &[WeightedEdge<W>] {
        &self.edges
    }

    pub(crate) fn neighbours(&self, n: usize) -> &[(usize, W)] {
        &self.adjacency[n]
    }

    pub(crate) fn terminal_indices(&self) -> &[usize] {
        &self.terminals
    }

    pub(crate) fn is_terminal_index(&self, n: usize) -> bool {
        self.is_terminal[n]
    }

    /// Same vertices, edges and terminals with every edge weight replaced, in edge order.
    pub(crate) fn with_weights(&self, weights: Vec<W>) -> Self {
        debug_assert_eq!(weights.len(), self.edges.len());
        let edges: Vec<WeightedEdge<W>> = self
            .edges
            .iter()
            .zip(weights)
            .map(|(edge, weight)| WeightedEdge { weight, ..*edge })
            .collect();
        Graph {
            adjacency: Self::build_adjacency(self.n_vertices(), &edges),
            edges,
            is_terminal: self.is_terminal.clone(),
            terminals: self.terminals.clone(),
        }
    }
}

impl<W> FromStr for Graph<W>
where
    W: PrimInt + Unsigned + FromStr,
    W::Err: Display,
{
    type Err = pace::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        pace::parse_graph(s)
    }
}

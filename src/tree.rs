use crate::data_wrappers::{CandidateEdge, SelectedEdges};
use crate::graph::VertexId;
use crate::union_find::UnionFind;
use crate::{Graph, SteinerError, TieBreak};
use num_traits::{PrimInt, Unsigned};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// An edge of a Steiner tree. `u` is always the smaller vertex id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeEdge<W> {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: W,
}

impl<W> TreeEdge<W> {
    pub fn new(u: VertexId, v: VertexId, weight: W) -> Self {
        TreeEdge {
            u: u.min(v),
            v: u.max(v),
            weight,
        }
    }
}

/// The result of a Steiner tree approximation: a set of graph edges and their total weight.
///
/// Strictly speaking this is a forest when the terminals lie in different connected
/// components of the graph, with one tree per component that contains terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteinerTree<W> {
    weight: W,
    edges: Vec<TreeEdge<W>>,
}

impl<W: PrimInt + Unsigned> SteinerTree<W> {
    /// Creates a tree from a reported weight and its edges. Edges are sorted by endpoints but
    /// otherwise kept as given, so `verify` can reject duplicates and inconsistent weights.
    pub fn new(weight: W, edges: Vec<TreeEdge<W>>) -> Self {
        let mut edges: Vec<TreeEdge<W>> = edges
            .into_iter()
            .map(|edge| TreeEdge::new(edge.u, edge.v, edge.weight))
            .collect();
        edges.sort_unstable();
        SteinerTree { weight, edges }
    }

    pub fn empty() -> Self {
        SteinerTree {
            weight: W::zero(),
            edges: Vec::new(),
        }
    }

    pub(crate) fn from_selected(graph: &Graph<W>, selected: &SelectedEdges<W>) -> Self {
        let edges = selected
            .edge_ids
            .iter()
            .map(|&edge_id| {
                let edge = &graph.edge_list()[edge_id];
                TreeEdge::new(edge.left + 1, edge.right + 1, edge.weight)
            })
            .collect();
        SteinerTree::new(selected.weight, edges)
    }

    /// Total weight of the tree.
    pub fn weight(&self) -> W {
        self.weight
    }

    /// Tree edges ordered by `(u, v)`.
    pub fn edges(&self) -> &[TreeEdge<W>] {
        &self.edges
    }

    pub fn edge_pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.edges.iter().map(|edge| (edge.u, edge.v))
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All vertices touched by a tree edge.
    pub fn vertices(&self) -> BTreeSet<VertexId> {
        self.edges.iter().flat_map(|edge| [edge.u, edge.v]).collect()
    }

    /// Vertices with exactly one incident tree edge, in ascending order.
    pub fn leaves(&self) -> Vec<VertexId> {
        let mut degrees: BTreeMap<VertexId, usize> = BTreeMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.u).or_default() += 1;
            *degrees.entry(edge.v).or_default() += 1;
        }
        degrees
            .into_iter()
            .filter(|&(_, degree)| degree == 1)
            .map(|(vertex, _)| vertex)
            .collect()
    }

    /// Sum of the edge weights, recomputed from the edges rather than taken from `weight()`.
    pub fn edge_weight_sum(&self) -> Result<W, SteinerError> {
        self.edges.iter().try_fold(W::zero(), |sum, edge| {
            sum.checked_add(&edge.weight).ok_or_else(|| {
                SteinerError::WeightOverflow(String::from("Sum of tree edge weights"))
            })
        })
    }

    /// Checks that this is a valid Steiner tree (or forest) of `graph`.
    ///
    /// # Returns
    /// * `Ok(())` if every edge is an edge of the graph with the same weight, the reported
    ///   weight equals the sum of the edge weights, the edges contain no cycle, every leaf is a
    ///   terminal, and every two terminals connected in the graph are connected in the tree.
    ///   Otherwise `SteinerError::InvalidInput` describing the first problem found.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::{Graph, Mehlhorn};
    ///
    ///let graph = Graph::new(3, &[(1, 2, 1_u32), (2, 3, 1), (1, 3, 3)], &[1, 3]).unwrap();
    ///let tree = Mehlhorn::default_params(&graph).steiner_tree().unwrap();
    ///assert!(tree.verify(&graph).is_ok());
    /// ```
    pub fn verify(&self, graph: &Graph<W>) -> Result<(), SteinerError> {
        for edge in &self.edges {
            let is_graph_edge = graph
                .edges()
                .any(|(u, v, weight)| TreeEdge::new(u, v, weight) == *edge);
            if !is_graph_edge || edge.u == edge.v {
                return Err(SteinerError::InvalidInput(format!(
                    "({}, {}) with weight {} is not an edge of the graph",
                    edge.u,
                    edge.v,
                    edge.weight.to_u128().unwrap_or_default()
                )));
            }
        }

        if self.edge_weight_sum()? != self.weight {
            return Err(SteinerError::InvalidInput(String::from(
                "Reported weight differs from the sum of the edge weights",
            )));
        }

        let mut tree_components = UnionFind::new(graph.n_vertices());
        for edge in &self.edges {
            if !tree_components.union(edge.u - 1, edge.v - 1) {
                return Err(SteinerError::InvalidInput(format!(
                    "Edge ({}, {}) closes a cycle",
                    edge.u, edge.v
                )));
            }
        }

        if let Some(leaf) = self.leaves().into_iter().find(|&leaf| !graph.is_terminal(leaf)) {
            return Err(SteinerError::InvalidInput(format!(
                "Leaf {leaf} is not a terminal"
            )));
        }

        let mut graph_components = UnionFind::new(graph.n_vertices());
        for edge in graph.edge_list() {
            graph_components.union(edge.left, edge.right);
        }
        let mut tree_component_of: HashMap<usize, usize> = HashMap::new();
        for &terminal in graph.terminal_indices() {
            let graph_root = graph_components.find(terminal);
            let tree_root = tree_components.find(terminal);
            let expected = *tree_component_of.entry(graph_root).or_insert(tree_root);
            if expected != tree_root {
                return Err(SteinerError::InvalidInput(format!(
                    "Terminal {} is not connected to the other terminals of its component",
                    terminal + 1
                )));
            }
        }
        Ok(())
    }
}

/// Builds the final tree from the skeleton: a Kruskal pass on true weights restricted to
/// skeleton vertices, followed by repeatedly removing non-terminal leaves.
pub(crate) struct TreeBuilder<'a, W> {
    graph: &'a Graph<W>,
    in_skeleton: &'a [bool],
    tie_break: TieBreak,
    prune: bool,
}

impl<'a, W: PrimInt + Unsigned> TreeBuilder<'a, W> {
    pub(crate) fn new(
        graph: &'a Graph<W>,
        in_skeleton: &'a [bool],
        tie_break: TieBreak,
        prune: bool,
    ) -> Self {
        Self {
            graph,
            in_skeleton,
            tie_break,
            prune,
        }
    }

    pub(crate) fn build_tree(&self) -> Result<SelectedEdges<W>, SteinerError> {
        let min_spanning_tree = self.restricted_min_spanning_tree()?;
        if !self.prune {
            return Ok(min_spanning_tree);
        }
        self.prune_non_terminal_leaves(min_spanning_tree)
    }

    fn restricted_min_spanning_tree(&self) -> Result<SelectedEdges<W>, SteinerError> {
        let edges = self.graph.edge_list();
        let mut candidates: Vec<CandidateEdge<W>> = edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| self.in_skeleton[edge.left] && self.in_skeleton[edge.right])
            .map(|(edge_id, edge)| CandidateEdge {
                edge_id,
                key: edge.weight,
            })
            .collect();
        self.tie_break.sort(&mut candidates, edges);

        let mut union_find = UnionFind::new(self.graph.n_vertices());
        let mut edge_ids = Vec::new();
        let mut weight = W::zero();
        for candidate in candidates {
            let edge = &edges[candidate.edge_id];
            if union_find.union(edge.left, edge.right) {
                weight = weight.checked_add(&edge.weight).ok_or_else(|| {
                    SteinerError::WeightOverflow(String::from(
                        "Weight of the restricted minimum spanning tree",
                    ))
                })?;
                edge_ids.push(candidate.edge_id);
            }
        }

        tracing::debug!(n_edges = edge_ids.len(), "built restricted spanning tree");
        Ok(SelectedEdges { edge_ids, weight })
    }

    fn prune_non_terminal_leaves(
        &self,
        min_spanning_tree: SelectedEdges<W>,
    ) -> Result<SelectedEdges<W>, SteinerError> {
        let edges = self.graph.edge_list();
        let mut tree_adjacency = vec![Vec::new(); self.graph.n_vertices()];
        for &edge_id in &min_spanning_tree.edge_ids {
            let edge = &edges[edge_id];
            tree_adjacency[edge.left].push((edge.right, edge_id));
            tree_adjacency[edge.right].push((edge.left, edge_id));
        }

        let mut in_tree = self.in_skeleton.to_vec();
        let mut degrees: Vec<usize> = tree_adjacency.iter().map(Vec::len).collect();
        let mut leaves: VecDeque<usize> = (0..self.graph.n_vertices())
            .filter(|&n| degrees[n] == 1 && !self.graph.is_terminal_index(n))
            .collect();
        let mut weight = min_spanning_tree.weight;
        let mut n_pruned = 0;

        while let Some(leaf) = leaves.pop_front() {
            in_tree[leaf] = false;
            n_pruned += 1;
            for &(neighbour, edge_id) in &tree_adjacency[leaf] {
                if !in_tree[neighbour] {
                    continue;
                }
                weight = weight.checked_sub(&edges[edge_id].weight).ok_or_else(|| {
                    SteinerError::InternalInvariantViolation(String::from(
                        "Pruning removed more weight than the spanning tree carries",
                    ))
                })?;
                degrees[neighbour] -= 1;
                if degrees[neighbour] == 1 && !self.graph.is_terminal_index(neighbour) {
                    leaves.push_back(neighbour);
                }
            }
        }

        let edge_ids: Vec<usize> = min_spanning_tree
            .edge_ids
            .into_iter()
            .filter(|&edge_id| in_tree[edges[edge_id].left] && in_tree[edges[edge_id].right])
            .collect();

        tracing::debug!(n_pruned, n_edges = edge_ids.len(), "pruned non-terminal leaves");
        Ok(SelectedEdges { edge_ids, weight })
    }
}

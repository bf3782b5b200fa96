/// An undirected edge between two internal (0-based) vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WeightedEdge<W> {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) weight: W,
}

impl<W> WeightedEdge<W> {
    pub(crate) fn is_self_loop(&self) -> bool {
        self.left == self.right
    }

    /// Endpoints with the smaller index first.
    pub(crate) fn ordered_endpoints(&self) -> (usize, usize) {
        (self.left.min(self.right), self.left.max(self.right))
    }
}

/// An edge considered by one of the Kruskal passes, keyed by whatever the pass sorts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CandidateEdge<W> {
    pub(crate) edge_id: usize,
    pub(crate) key: W,
}

/// Result of the multi-source shortest path pass. `None` distances mean the vertex cannot be
/// reached from any terminal; such vertices also have no parent and no source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ClusterLabels<W> {
    pub(crate) distance: Vec<Option<W>>,
    pub(crate) parent: Vec<Option<usize>>,
    pub(crate) source: Vec<Option<usize>>,
}

impl<W> ClusterLabels<W> {
    pub(crate) fn unreachable(n_vertices: usize) -> Self {
        ClusterLabels {
            distance: (0..n_vertices).map(|_| None).collect(),
            parent: vec![None; n_vertices],
            source: vec![None; n_vertices],
        }
    }

    pub(crate) fn n_reached(&self) -> usize {
        self.source.iter().filter(|source| source.is_some()).count()
    }
}

/// Edges (by position in the graph's edge list) chosen by a pass, with their total weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectedEdges<W> {
    pub(crate) edge_ids: Vec<usize>,
    pub(crate) weight: W,
}

use crate::data_wrappers::SelectedEdges;
use crate::predictions::PredictionWeighting;
use crate::shortest_paths::ClusterLabeller;
use crate::skeleton::SkeletonSelector;
use crate::tree::TreeBuilder;
use crate::{Graph, MehlhornParams, SteinerError, SteinerTree};
use num_traits::{PrimInt, Unsigned};

/// Mehlhorn's 2-approximation of the minimum Steiner tree. Generic over unsigned integer
/// edge weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Mehlhorn<'a, W> {
    graph: &'a Graph<W>,
    params: MehlhornParams,
}

impl<'a, W: PrimInt + Unsigned> Mehlhorn<'a, W> {
    /// Creates an instance of the approximation using a custom parameter configuration.
    ///
    /// # Parameters
    /// * `graph` - a reference to the graph, with its terminals, to find a Steiner tree in.
    /// * `params` - the parameter configuration.
    ///
    /// # Returns
    /// * The solver instance.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::{Graph, Mehlhorn, MehlhornParams, TieBreak};
    ///
    ///let graph = Graph::new(3, &[(1, 2, 1_u64), (2, 3, 1), (1, 3, 2)], &[1, 3]).unwrap();
    ///let params = MehlhornParams::builder()
    ///    .tie_break(TieBreak::EndpointOrder)
    ///    .build();
    ///let solver = Mehlhorn::new(&graph, params);
    /// ```
    pub fn new(graph: &'a Graph<W>, params: MehlhornParams) -> Self {
        Mehlhorn { graph, params }
    }

    /// Creates an instance of the approximation using the default parameters.
    ///
    /// # Parameters
    /// * `graph` - a reference to the graph, with its terminals, to find a Steiner tree in.
    ///
    /// # Returns
    /// * The solver instance.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::{Graph, Mehlhorn};
    ///
    ///let graph = Graph::new(3, &[(1, 2, 1_u64), (2, 3, 1), (1, 3, 2)], &[1, 3]).unwrap();
    ///let solver = Mehlhorn::default_params(&graph);
    /// ```
    pub fn default_params(graph: &'a Graph<W>) -> Self {
        Mehlhorn::new(graph, MehlhornParams::default())
    }

    pub fn params(&self) -> &MehlhornParams {
        &self.params
    }

    /// Approximates a minimum Steiner tree connecting all terminals of the graph.
    ///
    /// # Returns
    /// * A result that, if successful, contains the tree: a set of graph edges whose weight is
    ///   at most twice that of an optimal Steiner tree, and whose leaves are all terminals.
    ///   Terminals in different connected components end up in different trees of a forest.
    ///   A graph without terminals, or with a single one, gives an empty tree of weight zero.
    ///   An error is returned if a distance or weight sum overflows the weight type.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::{Graph, Mehlhorn};
    ///
    ///// A star with centre 1; only leaves 2 and 3 must be connected
    ///let graph = Graph::new(
    ///    5,
    ///    &[(1, 2, 10_u32), (1, 3, 10), (1, 4, 10), (1, 5, 10)],
    ///    &[2, 3],
    ///).unwrap();
    ///let tree = Mehlhorn::default_params(&graph).steiner_tree().unwrap();
    ///assert_eq!(tree.weight(), 20);
    ///assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
    /// ```
    #[tracing::instrument(skip_all, fields(
        n_vertices = self.graph.n_vertices(),
        n_edges = self.graph.n_edges(),
        n_terminals = self.graph.n_terminals(),
    ))]
    pub fn steiner_tree(&self) -> Result<SteinerTree<W>, SteinerError> {
        let selected = self.select_edges()?;
        let tree = SteinerTree::from_selected(self.graph, &selected);
        debug_assert!(tree.edge_weight_sum().ok() == Some(tree.weight()));
        tracing::debug!(n_edges = tree.n_edges(), "approximated Steiner tree");
        Ok(tree)
    }

    /// Approximates a minimum Steiner tree after adjusting edge weights by predictions of which
    /// edges belong to a good tree. Predicted edges are made cheaper by a factor of `alpha`, or
    /// free when `alpha` is `None`, so the tree prefers them; the returned tree is weighted with
    /// the original edge weights.
    ///
    /// # Parameters
    /// * `predictions` - one flag per graph edge, in the order the edges were given.
    /// * `alpha` - how much predicted edges are trusted, greater than 1. `None` trusts them
    ///             fully.
    ///
    /// # Returns
    /// * A result that, if successful, contains the tree. An error is returned if the number of
    ///   predictions differs from the number of edges, if `alpha` is not greater than 1, or if
    ///   a scaled weight overflows the weight type.
    ///
    /// # Examples
    /// ```
    ///use steiner_apx::{Graph, Mehlhorn};
    ///
    ///// Terminals 1 and 3, joined by one edge or by a path through 2 of the same weight
    ///let graph = Graph::new(3, &[(1, 3, 2_u64), (1, 2, 1), (2, 3, 1)], &[1, 3]).unwrap();
    ///let solver = Mehlhorn::default_params(&graph);
    ///let tree = solver
    ///    .steiner_tree_with_predictions(&[false, true, true], Some(2.0))
    ///    .unwrap();
    ///assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    ///assert_eq!(tree.weight(), 2);
    /// ```
    #[tracing::instrument(skip_all, fields(
        n_vertices = self.graph.n_vertices(),
        n_edges = self.graph.n_edges(),
        n_terminals = self.graph.n_terminals(),
        alpha = ?alpha,
    ))]
    pub fn steiner_tree_with_predictions(
        &self,
        predictions: &[bool],
        alpha: Option<f64>,
    ) -> Result<SteinerTree<W>, SteinerError> {
        let weighting = PredictionWeighting::new(predictions, alpha, self.params.prediction_scale);
        let reweighted = weighting.reweight(self.graph)?;
        let selected = Mehlhorn::new(&reweighted, self.params.clone()).select_edges()?;
        let selected = weighting.recost(self.graph, selected)?;
        let tree = SteinerTree::from_selected(self.graph, &selected);
        tracing::debug!(
            n_edges = tree.n_edges(),
            n_predicted = predictions.iter().filter(|&&p| p).count(),
            "approximated Steiner tree with predictions"
        );
        Ok(tree)
    }

    pub(crate) fn select_edges(&self) -> Result<SelectedEdges<W>, SteinerError> {
        if self.graph.n_terminals() == 0 {
            return Ok(SelectedEdges {
                edge_ids: Vec::new(),
                weight: W::zero(),
            });
        }
        let labeller = ClusterLabeller::new(self.graph);
        let labels = labeller.calc_labels()?;
        let selector = SkeletonSelector::new(self.graph, &labels, self.params.tie_break);
        let in_skeleton = selector.select_skeleton()?;
        let builder = TreeBuilder::new(
            self.graph,
            &in_skeleton,
            self.params.tie_break,
            self.params.prune,
        );
        builder.build_tree()
    }
}

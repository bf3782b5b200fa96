use crate::data_wrappers::SelectedEdges;
use crate::validation::{validate_alpha, validate_predictions};
use crate::{Graph, SteinerError};
use num_traits::{PrimInt, Unsigned};

/// Scales edge weights by how much an edge is trusted to be part of a good tree.
/// Edges predicted to be in the tree get `scale / alpha` (or nothing at all without alpha),
/// the others get the full `scale`.
pub(crate) struct PredictionWeighting<'a> {
    predictions: &'a [bool],
    alpha: Option<f64>,
    scale: u32,
}

impl<'a> PredictionWeighting<'a> {
    pub(crate) fn new(predictions: &'a [bool], alpha: Option<f64>, scale: u32) -> Self {
        Self {
            predictions,
            alpha,
            scale,
        }
    }

    pub(crate) fn reweight<W: PrimInt + Unsigned>(
        &self,
        graph: &Graph<W>,
    ) -> Result<Graph<W>, SteinerError> {
        validate_predictions(graph.n_edges(), self.predictions.len())?;
        validate_alpha(self.alpha)?;

        let predicted = self.to_weight::<W>(self.predicted_multiplier())?;
        let unpredicted = self.to_weight::<W>(self.scale)?;
        let weights = graph
            .edge_list()
            .iter()
            .zip(self.predictions)
            .map(|(edge, &is_predicted)| {
                let multiplier = if is_predicted { predicted } else { unpredicted };
                edge.weight.checked_mul(&multiplier).ok_or_else(|| {
                    SteinerError::WeightOverflow(format!(
                        "Scaled weight of edge ({}, {})",
                        edge.left + 1,
                        edge.right + 1
                    ))
                })
            })
            .collect::<Result<Vec<W>, SteinerError>>()?;

        tracing::debug!(
            n_predicted = self.predictions.iter().filter(|&&p| p).count(),
            alpha = ?self.alpha,
            scale = self.scale,
            "reweighted edges by prediction"
        );
        Ok(graph.with_weights(weights))
    }

    /// Replaces the total weight of edges selected on the reweighted graph with their weight in
    /// `graph`.
    pub(crate) fn recost<W: PrimInt + Unsigned>(
        &self,
        graph: &Graph<W>,
        selected: SelectedEdges<W>,
    ) -> Result<SelectedEdges<W>, SteinerError> {
        let weight = selected
            .edge_ids
            .iter()
            .try_fold(W::zero(), |sum, &edge_id| {
                sum.checked_add(&graph.edge_list()[edge_id].weight)
            })
            .ok_or_else(|| SteinerError::WeightOverflow(String::from("Sum of tree edge weights")))?;
        Ok(SelectedEdges {
            edge_ids: selected.edge_ids,
            weight,
        })
    }

    fn predicted_multiplier(&self) -> u32 {
        match self.alpha {
            Some(alpha) => {
                let scale: f64 = self.scale.into();
                (scale / alpha).floor() as u32
            }
            None => 0,
        }
    }

    fn to_weight<W: PrimInt + Unsigned>(&self, multiplier: u32) -> Result<W, SteinerError> {
        num_traits::cast::<u32, W>(multiplier).ok_or_else(|| {
            SteinerError::WeightOverflow(format!("Multiplier {multiplier} exceeds the weight type"))
        })
    }
}

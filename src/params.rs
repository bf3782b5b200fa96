use crate::data_wrappers::{CandidateEdge, WeightedEdge};

// Defaults for parameters
const TIE_BREAK_DEFAULT: TieBreak = TieBreak::InputOrder;
const PRUNE_DEFAULT: bool = true;
const PREDICTION_SCALE_DEFAULT: u32 = 1000;

// Valid minimums/left bounds of parameters
const PREDICTION_SCALE_MINIMUM: u32 = 1;

/// How the two Kruskal passes order edges whose sort keys are equal.
/// Different rules can pick different (equally valid) trees when weights tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Equal keys keep the order in which the edges were given.
    InputOrder,
    /// Equal keys are ordered by their smaller endpoint, then their larger endpoint.
    EndpointOrder,
}

impl TieBreak {
    pub(crate) fn sort<W: Ord + Copy>(
        &self,
        candidates: &mut [CandidateEdge<W>],
        edges: &[WeightedEdge<W>],
    ) {
        match self {
            Self::InputOrder => candidates.sort_by_key(|candidate| candidate.key),
            Self::EndpointOrder => candidates.sort_by_key(|candidate| {
                let (low, high) = edges[candidate.edge_id].ordered_endpoints();
                (candidate.key, low, high)
            }),
        }
    }
}

/// A wrapper around the tuning parameters of the Steiner tree approximation.
/// Only use if you want non-default behaviour. Otherwise use `Mehlhorn::default_params()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MehlhornParams {
    pub(crate) tie_break: TieBreak,
    pub(crate) prune: bool,
    pub(crate) prediction_scale: u32,
}

/// Builder object to set custom parameters.
pub struct ParamBuilder {
    tie_break: Option<TieBreak>,
    prune: Option<bool>,
    prediction_scale: Option<u32>,
}

impl Default for MehlhornParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MehlhornParams {
    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder() -> ParamBuilder {
        ParamBuilder {
            tie_break: None,
            prune: None,
            prediction_scale: None,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn prune(&self) -> bool {
        self.prune
    }

    pub fn prediction_scale(&self) -> u32 {
        self.prediction_scale
    }
}

impl ParamBuilder {
    /// Sets the tie break rule used by both minimum spanning tree passes when two edges
    /// have the same sort key. Defaults to `TieBreak::InputOrder`.
    ///
    /// # Parameters
    /// * tie_break - the tie break rule
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn tie_break(mut self, tie_break: TieBreak) -> ParamBuilder {
        self.tie_break = Some(tie_break);
        self
    }

    /// Sets whether non-terminal leaves are stripped from the restricted minimum spanning
    /// tree. Switching this off only makes sense for inspecting the intermediate tree, as the
    /// approximation guarantee relies on pruning. Defaults to true.
    ///
    /// # Parameters
    /// * prune - whether to prune non-terminal leaves
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn prune(mut self, prune: bool) -> ParamBuilder {
        self.prune = Some(prune);
        self
    }

    /// Sets the integer scale used when edge weights are adjusted by predictions
    /// (see `Mehlhorn::steiner_tree_with_predictions`). Edges not predicted to be in the
    /// tree are multiplied by this scale, predicted edges by `scale / alpha`.
    /// Larger scales keep more precision for alpha. Defaults to 1000.
    ///
    /// # Parameters
    /// * prediction_scale - the weight multiplier, at least 1
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn prediction_scale(mut self, prediction_scale: u32) -> ParamBuilder {
        let valid_prediction_scale = ParamBuilder::validate_input_left_bound(
            prediction_scale,
            PREDICTION_SCALE_MINIMUM,
            "prediction_scale",
        );
        self.prediction_scale = Some(valid_prediction_scale);
        self
    }

    /// Finishes the building of the parameter configuration.
    ///
    /// # Returns
    /// * The completed parameter configuration.
    pub fn build(self) -> MehlhornParams {
        MehlhornParams {
            tie_break: self.tie_break.unwrap_or(TIE_BREAK_DEFAULT),
            prune: self.prune.unwrap_or(PRUNE_DEFAULT),
            prediction_scale: self.prediction_scale.unwrap_or(PREDICTION_SCALE_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: u32, left_bound: u32, param: &str) -> u32 {
        if input_param < left_bound {
            tracing::warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}

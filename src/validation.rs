use crate::graph::VertexId;
use crate::SteinerError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GraphValidator<'a, W> {
    n_vertices: usize,
    edges: &'a [(VertexId, VertexId, W)],
    terminals: &'a [VertexId],
}

impl<'a, W> GraphValidator<'a, W> {
    pub(crate) fn new(
        n_vertices: usize,
        edges: &'a [(VertexId, VertexId, W)],
        terminals: &'a [VertexId],
    ) -> Self {
        Self {
            n_vertices,
            edges,
            terminals,
        }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), SteinerError> {
        for (n, &(u, v, _)) in self.edges.iter().enumerate() {
            if !self.is_vertex(u) || !self.is_vertex(v) {
                return Err(SteinerError::InvalidInput(format!(
                    "{n}th edge ({u}, {v}) references a vertex outside 1..={}",
                    self.n_vertices
                )));
            }
        }
        for &t in self.terminals {
            if !self.is_vertex(t) {
                return Err(SteinerError::InvalidInput(format!(
                    "terminal {t} is outside 1..={}",
                    self.n_vertices
                )));
            }
        }
        Ok(())
    }

    fn is_vertex(&self, vertex: VertexId) -> bool {
        (1..=self.n_vertices).contains(&vertex)
    }
}

pub(crate) fn validate_predictions(n_edges: usize, n_predictions: usize) -> Result<(), SteinerError> {
    if n_edges != n_predictions {
        return Err(SteinerError::InvalidInput(format!(
            "Expected one prediction per edge ({n_edges}), got {n_predictions}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_alpha(alpha: Option<f64>) -> Result<(), SteinerError> {
    match alpha {
        Some(alpha) if alpha.is_nan() || alpha <= 1.0 => Err(SteinerError::InvalidInput(format!(
            "Prediction trust alpha must be greater than 1, not {alpha}"
        ))),
        _ => Ok(()),
    }
}

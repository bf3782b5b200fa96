use crate::data_wrappers::{CandidateEdge, ClusterLabels, WeightedEdge};
use crate::union_find::UnionFind;
use crate::{Graph, SteinerError, TieBreak};
use num_traits::{PrimInt, Unsigned};

/// Selects the vertices the final tree may use: a Kruskal pass over the terminal clusters,
/// keyed by `weight + distance(u) + distance(v)`, marks both shortest paths behind every
/// edge that joins two clusters.
pub(crate) struct SkeletonSelector<'a, W> {
    graph: &'a Graph<W>,
    labels: &'a ClusterLabels<W>,
    tie_break: TieBreak,
}

impl<'a, W: PrimInt + Unsigned> SkeletonSelector<'a, W> {
    pub(crate) fn new(graph: &'a Graph<W>, labels: &'a ClusterLabels<W>, tie_break: TieBreak) -> Self {
        Self {
            graph,
            labels,
            tie_break,
        }
    }

    pub(crate) fn select_skeleton(&self) -> Result<Vec<bool>, SteinerError> {
        let edges = self.graph.edge_list();
        let mut candidates = self.calc_reweighted_candidates(edges)?;
        self.tie_break.sort(&mut candidates, edges);

        let mut in_skeleton: Vec<bool> = (0..self.graph.n_vertices())
            .map(|n| self.graph.is_terminal_index(n))
            .collect();
        let mut union_find = UnionFind::new(self.graph.n_vertices());
        let mut n_bridges = 0;

        for candidate in candidates {
            let edge = &edges[candidate.edge_id];
            let (Some(left_source), Some(right_source)) =
                (self.labels.source[edge.left], self.labels.source[edge.right])
            else {
                return Err(SteinerError::InternalInvariantViolation(format!(
                    "Edge ({}, {}) has a finite key but an endpoint without a nearest terminal",
                    edge.left + 1,
                    edge.right + 1
                )));
            };
            if union_find.union(left_source, right_source) {
                self.mark_path_to_source(edge.left, &mut in_skeleton)?;
                self.mark_path_to_source(edge.right, &mut in_skeleton)?;
                n_bridges += 1;
            }
        }

        tracing::debug!(
            n_bridges,
            n_skeleton = in_skeleton.iter().filter(|&&marked| marked).count(),
            "selected skeleton"
        );
        Ok(in_skeleton)
    }

    fn calc_reweighted_candidates(
        &self,
        edges: &[WeightedEdge<W>],
    ) -> Result<Vec<CandidateEdge<W>>, SteinerError> {
        let mut candidates = Vec::with_capacity(edges.len());
        for (edge_id, edge) in edges.iter().enumerate() {
            let (Some(left), Some(right)) = (
                self.labels.distance[edge.left],
                self.labels.distance[edge.right],
            ) else {
                // An endpoint no terminal can reach: the key is infinite
                continue;
            };
            let key = edge
                .weight
                .checked_add(&left)
                .and_then(|key| key.checked_add(&right))
                .ok_or_else(|| {
                    SteinerError::WeightOverflow(format!(
                        "Reweighted key of edge ({}, {}) exceeds the weight type",
                        edge.left + 1,
                        edge.right + 1
                    ))
                })?;
            candidates.push(CandidateEdge { edge_id, key });
        }
        Ok(candidates)
    }

    fn mark_path_to_source(&self, mut vertex: usize, in_skeleton: &mut [bool]) -> Result<(), SteinerError> {
        // A marked vertex already has its whole chain up to the terminal marked
        while !in_skeleton[vertex] {
            in_skeleton[vertex] = true;
            vertex = self.labels.parent[vertex].ok_or_else(|| {
                SteinerError::InternalInvariantViolation(format!(
                    "Vertex {} is labelled but has no parent towards its terminal",
                    vertex + 1
                ))
            })?;
        }
        Ok(())
    }
}

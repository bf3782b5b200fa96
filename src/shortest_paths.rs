use crate::data_wrappers::ClusterLabels;
use crate::{Graph, SteinerError};
use num_traits::{PrimInt, Unsigned};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Labels every vertex with its nearest terminal using one Dijkstra run seeded at all
/// terminals at once. The parent pointers form a shortest path forest rooted at the terminals.
pub(crate) struct ClusterLabeller<'a, W> {
    graph: &'a Graph<W>,
}

impl<'a, W: PrimInt + Unsigned> ClusterLabeller<'a, W> {
    pub(crate) fn new(graph: &'a Graph<W>) -> Self {
        Self { graph }
    }

    pub(crate) fn calc_labels(&self) -> Result<ClusterLabels<W>, SteinerError> {
        let mut labels = ClusterLabels::unreachable(self.graph.n_vertices());
        // Equal distances pop in ascending vertex order, which fixes the choice between
        // equidistant terminals.
        let mut queue = BinaryHeap::new();

        for &terminal in self.graph.terminal_indices() {
            labels.distance[terminal] = Some(W::zero());
            labels.source[terminal] = Some(terminal);
            queue.push(Reverse((W::zero(), terminal)));
        }

        // Vertices only reachable through a sum that overflowed
        let mut overflowed = vec![false; self.graph.n_vertices()];

        while let Some(Reverse((distance, vertex))) = queue.pop() {
            if labels.distance[vertex].is_some_and(|settled| settled < distance) {
                continue;
            }
            for &(neighbour, weight) in self.graph.neighbours(vertex) {
                let Some(candidate) = distance.checked_add(&weight) else {
                    overflowed[neighbour] = true;
                    continue;
                };
                let improves = labels.distance[neighbour].is_none_or(|known| candidate < known);
                if improves {
                    labels.distance[neighbour] = Some(candidate);
                    labels.parent[neighbour] = Some(vertex);
                    labels.source[neighbour] = labels.source[vertex];
                    queue.push(Reverse((candidate, neighbour)));
                }
            }
        }

        if let Some(vertex) =
            (0..overflowed.len()).find(|&n| overflowed[n] && labels.distance[n].is_none())
        {
            return Err(SteinerError::WeightOverflow(format!(
                "Distance from a terminal to vertex {} exceeds the weight type",
                vertex + 1
            )));
        }

        tracing::debug!(
            n_terminals = self.graph.n_terminals(),
            n_reached = labels.n_reached(),
            "labelled clusters"
        );
        Ok(labels)
    }
}

//! Mehlhorn's 2-approximation of the minimum Steiner tree in Rust. Generic over unsigned integer
//! edge weights.
//!
//! Given an undirected weighted graph and a subset of its vertices, the terminals, a Steiner tree
//! is a tree in the graph that connects all terminals, possibly passing through other vertices.
//! Finding a minimum one is NP-hard; this crate finds a tree that weighs at most twice the
//! optimum in `O(m log n)` time:
//!  1. Every vertex is labelled with its nearest terminal by a single multi-source Dijkstra run.
//!     The vertices sharing a nearest terminal form that terminal's cluster;
//!  2. Each edge joining two clusters is weighted by the length of the shortest terminal to
//!     terminal path through it. A minimum spanning tree over the clusters on these weights picks
//!     which shortest paths to keep, and their vertices form the skeleton;
//!  3. A minimum spanning tree on the original weights is taken over the edges inside the
//!     skeleton, and leaves that are not terminals are pruned away until none remain.
//!
//! The approximation can also be guided by predictions of which edges belong to a good tree,
//! see [`Mehlhorn::steiner_tree_with_predictions`], and graphs and solutions can be read and
//! written in the PACE 2018 text format with the [`pace`] module.
//!
//! # Examples
//! ```
//!use steiner_apx::{Graph, Mehlhorn};
//!
//!// A triangle in which all vertices are terminals
//!let graph = Graph::new(3, &[(1, 2, 1_u64), (2, 3, 1), (1, 3, 3)], &[1, 2, 3]).unwrap();
//!let tree = Mehlhorn::default_params(&graph).steiner_tree().unwrap();
//!assert_eq!(tree.weight(), 2);
//!assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
//!assert!(tree.verify(&graph).is_ok());
//! ```
//!
//! # References
//! * [Mehlhorn, K. A faster approximation algorithm for the Steiner problem in graphs.](https://doi.org/10.1016/0020-0190(88)90066-X)
//! * [PACE 2018 Steiner tree challenge](https://pacechallenge.org/2018/steiner-tree/)

pub use crate::error::SteinerError;
pub use crate::graph::{Graph, VertexId};
pub use crate::mehlhorn::Mehlhorn;
pub use crate::params::{MehlhornParams, ParamBuilder, TieBreak};
pub use crate::tree::{SteinerTree, TreeEdge};

mod data_wrappers;
mod error;
mod graph;
mod mehlhorn;
pub mod pace;
mod params;
mod predictions;
mod shortest_paths;
mod skeleton;
mod tree;
mod union_find;
mod validation;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use steiner_apx::{Graph, SteinerError, SteinerTree, TreeEdge, VertexId};

pub type SolveFn = fn(&Graph<u64>) -> Result<SteinerTree<u64>, SteinerError>;

pub fn test_path(solve: SolveFn) {
    let graph = Graph::new(4, &[(1, 2, 1), (2, 3, 1), (3, 4, 1)], &[1, 4]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 3);
    assert_eq!(
        tree.edge_pairs().collect::<Vec<_>>(),
        vec![(1, 2), (2, 3), (3, 4)]
    );
    assert_valid(&graph, &tree);
}

pub fn test_star(solve: SolveFn) {
    let graph = Graph::new(
        5,
        &[(1, 2, 10), (1, 3, 10), (1, 4, 10), (1, 5, 10)],
        &[2, 3],
    )
    .unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 20);
    assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
    assert_valid(&graph, &tree);
}

pub fn test_unreachable_component(solve: SolveFn) {
    let graph = Graph::new(5, &[(1, 2, 2), (2, 3, 2), (4, 5, 1)], &[1, 3]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 4);
    assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    assert!(tree.vertices().iter().all(|&v| v <= 3));
    assert_valid(&graph, &tree);
}

pub fn test_single_terminal(solve: SolveFn) {
    let graph = Graph::new(3, &[(1, 2, 4), (2, 3, 4)], &[2]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 0);
    assert!(tree.is_empty());
    assert_valid(&graph, &tree);
}

pub fn test_triangle(solve: SolveFn) {
    let graph = Graph::new(3, &[(1, 2, 1), (2, 3, 1), (1, 3, 3)], &[1, 2, 3]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 2);
    assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    assert_valid(&graph, &tree);
}

pub fn test_no_terminals(solve: SolveFn) {
    let graph = Graph::new(3, &[(1, 2, 1), (2, 3, 1)], &[]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree, SteinerTree::empty());
}

pub fn test_forest_across_components(solve: SolveFn) {
    let graph = Graph::new(5, &[(1, 2, 2), (2, 3, 2), (4, 5, 1)], &[1, 3, 4, 5]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 5);
    assert_eq!(
        tree.edge_pairs().collect::<Vec<_>>(),
        vec![(1, 2), (2, 3), (4, 5)]
    );
    assert_valid(&graph, &tree);
}

pub fn test_parallel_edges(solve: SolveFn) {
    let graph = Graph::new(2, &[(1, 2, 5), (1, 2, 3)], &[1, 2]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 3);
    assert_eq!(tree.edges(), &[TreeEdge::new(1, 2, 3)]);
    assert_valid(&graph, &tree);
}

pub fn test_self_loops(solve: SolveFn) {
    let graph = Graph::new(3, &[(1, 1, 0), (1, 2, 4), (2, 2, 0), (2, 3, 1)], &[1, 2]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 4);
    assert_eq!(tree.edge_pairs().collect::<Vec<_>>(), vec![(1, 2)]);
    assert_valid(&graph, &tree);
}

pub fn test_zero_weights(solve: SolveFn) {
    let graph = Graph::new(4, &[(1, 2, 0), (2, 3, 0), (3, 4, 0), (1, 4, 0)], &[1, 3]).unwrap();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 0);
    assert_eq!(tree.n_edges(), 2);
    assert_valid(&graph, &tree);
}

/// The example graph from the Wikipedia article on Steiner trees in graphs.
pub fn test_wiki_graph(solve: SolveFn) {
    let graph = wiki_graph();
    let tree = solve(&graph).unwrap();
    assert_eq!(tree.weight(), 190);
    assert_eq!(
        tree.edge_pairs().collect::<Vec<_>>(),
        vec![
            (1, 5),
            (5, 9),
            (7, 8),
            (8, 10),
            (9, 11),
            (10, 11),
            (11, 12)
        ]
    );
    assert_valid(&graph, &tree);
}

pub fn test_deterministic(solve: SolveFn) {
    let graph = wiki_graph();
    let first = solve(&graph).unwrap();
    for _ in 0..5 {
        assert_eq!(solve(&graph).unwrap(), first);
    }

    // The same seed rebuilds the same graphs, which must give the same trees
    let mut rng = StdRng::seed_from_u64(0xde7);
    let mut replay = StdRng::seed_from_u64(0xde7);
    for _ in 0..50 {
        let graph = random_graph(&mut rng, 10);
        let rebuilt = random_graph(&mut replay, 10);
        assert_eq!(solve(&graph).unwrap(), solve(&rebuilt).unwrap());
    }
}

pub fn test_relabeling(solve: SolveFn) {
    let graph = wiki_graph();
    let tree = solve(&graph).unwrap();

    // Vertex v becomes n + 1 - v
    let n = graph.n_vertices();
    let relabel = |v: VertexId| n + 1 - v;
    let edges: Vec<_> = graph
        .edges()
        .map(|(u, v, w)| (relabel(u), relabel(v), w))
        .collect();
    let terminals: Vec<_> = graph.terminals().map(relabel).collect();
    let relabeled = Graph::new(n, &edges, &terminals).unwrap();
    let relabeled_tree = solve(&relabeled).unwrap();

    assert_eq!(relabeled_tree.weight(), tree.weight());
    let mapped_back: BTreeSet<_> = relabeled_tree
        .edges()
        .iter()
        .map(|edge| TreeEdge::new(relabel(edge.u), relabel(edge.v), edge.weight))
        .collect();
    assert_eq!(
        mapped_back,
        tree.edges().iter().copied().collect::<BTreeSet<_>>()
    );
}

pub fn test_within_twice_optimum(solve: SolveFn) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let graph = random_graph(&mut rng, 8);
        let tree = solve(&graph).unwrap();
        assert_valid(&graph, &tree);
        let optimum = brute_force_optimum(&graph);
        assert!(tree.weight() >= optimum);
        assert!(
            tree.weight() <= 2 * optimum,
            "weight {} exceeds twice the optimum {optimum}",
            tree.weight()
        );
    }
}

pub fn test_overflow(solve: SolveFn) {
    let graph = Graph::new(3, &[(1, 2, u64::MAX), (2, 3, u64::MAX)], &[1, 3]).unwrap();
    assert!(matches!(solve(&graph), Err(SteinerError::WeightOverflow(..))));
}

/// Structural checks every result has to pass.
pub fn assert_valid(graph: &Graph<u64>, tree: &SteinerTree<u64>) {
    tree.verify(graph).unwrap();
    assert_eq!(tree.edge_weight_sum().unwrap(), tree.weight());
    assert!(tree.leaves().iter().all(|&leaf| graph.is_terminal(leaf)));
    if graph.n_terminals() > 1 && tree.n_edges() > 0 {
        let vertices = tree.vertices();
        assert!(graph.terminals().all(|t| vertices.contains(&t)));
    }
    let distinct: BTreeSet<_> = tree.edge_pairs().collect();
    assert_eq!(distinct.len(), tree.n_edges());
}

pub fn wiki_graph() -> Graph<u64> {
    Graph::new(
        12,
        &[
            (1, 2, 15),
            (2, 3, 30),
            (3, 4, 50),
            (4, 7, 30),
            (1, 5, 25),
            (2, 9, 50),
            (2, 6, 45),
            (3, 6, 40),
            (6, 8, 60),
            (7, 8, 20),
            (5, 9, 30),
            (9, 11, 15),
            (8, 10, 50),
            (11, 10, 40),
            (12, 11, 10),
        ],
        &[1, 9, 12, 7, 8],
    )
    .unwrap()
}

/// A connected graph on `n` vertices: a random spanning path plus extra random edges, with
/// two to four terminals.
pub fn random_graph(rng: &mut StdRng, n: usize) -> Graph<u64> {
    let mut order: Vec<VertexId> = (1..=n).collect();
    order.shuffle(rng);
    let mut edges: Vec<(VertexId, VertexId, u64)> = order
        .windows(2)
        .map(|pair| (pair[0], pair[1], rng.random_range(1..=20)))
        .collect();
    let n_extra = rng.random_range(0..2 * n);
    for _ in 0..n_extra {
        let u = rng.random_range(1..=n);
        let v = rng.random_range(1..=n);
        edges.push((u, v, rng.random_range(1..=20)));
    }
    let n_terminals = rng.random_range(2..=4);
    let terminals: Vec<VertexId> = (0..n_terminals)
        .map(|_| rng.random_range(1..=n))
        .collect();
    Graph::new(n, &edges, &terminals).unwrap()
}

/// Exact minimum Steiner tree weight of a small connected graph: the lightest spanning tree
/// over the terminals plus any subset of the other vertices.
pub fn brute_force_optimum(graph: &Graph<u64>) -> u64 {
    let n = graph.n_vertices();
    let others: Vec<VertexId> = (1..=n).filter(|&v| !graph.is_terminal(v)).collect();
    let mut edges: Vec<_> = graph.edges().filter(|(u, v, _)| u != v).collect();
    edges.sort_by_key(|&(_, _, w)| w);

    let mut best = u64::MAX;
    for mask in 0..(1_u32 << others.len()) {
        let mut included = vec![false; n + 1];
        for t in graph.terminals() {
            included[t] = true;
        }
        for (i, &v) in others.iter().enumerate() {
            if mask & (1 << i) != 0 {
                included[v] = true;
            }
        }
        if let Some(weight) = spanning_tree_weight(&included, &edges) {
            best = best.min(weight);
        }
    }
    best
}

/// Kruskal over the included vertices, `None` if they are not connected.
fn spanning_tree_weight(
    included: &[bool],
    sorted_edges: &[(VertexId, VertexId, u64)],
) -> Option<u64> {
    let mut component: Vec<usize> = (0..included.len()).collect();
    fn root(component: &[usize], mut v: usize) -> usize {
        while component[v] != v {
            v = component[v];
        }
        v
    }
    let mut weight = 0;
    let mut n_joins = 0;
    for &(u, v, w) in sorted_edges {
        if !included[u] || !included[v] {
            continue;
        }
        let (ru, rv) = (root(&component, u), root(&component, v));
        if ru != rv {
            component[ru] = rv;
            weight += w;
            n_joins += 1;
        }
    }
    let n_included = included.iter().filter(|&&i| i).count();
    (n_joins + 1 == n_included).then_some(weight)
}

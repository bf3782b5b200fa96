/// Disjoint-set forest over `n` vertices, each starting in its own set.
/// Every minimum spanning tree pass owns a fresh instance.
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n_vertices: usize) -> Self {
        let parent = (0..n_vertices).collect();
        let size = vec![1; n_vertices];

        UnionFind { parent, size }
    }

    /// Merges the sets containing `m` and `n`. Returns false if they were already one set.
    pub(crate) fn union(&mut self, m: usize, n: usize) -> bool {
        let mut m = self.find(m);
        let mut n = self.find(n);
        if m == n {
            return false;
        }
        if self.size[m] < self.size[n] {
            std::mem::swap(&mut m, &mut n);
        }
        self.parent[n] = m;
        self.size[m] += self.size[n];
        true
    }

    pub(crate) fn find(&mut self, mut n: usize) -> usize {
        let mut root = n;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[n] != root {
            let next = self.parent[n];
            self.parent[n] = root;
            n = next;
        }
        root
    }
}

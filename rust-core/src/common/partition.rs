use std::collections::HashMap;
use std::hash::Hash;

/// Union-find over arbitrary hashable values.
///
/// Values are interned into an index arena on first use; parent links and
/// ranks live in plain vectors indexed by those slots. `find` compresses paths.
#[derive(Debug, Clone)]
pub struct Partition<T> {
    index: HashMap<T, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<T: Hash + Eq + Clone> Default for Partition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Partition<T> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            parent: Vec::new(),
            rank: Vec::new(),
        }
    }

    fn slot(&mut self, x: &T) -> usize {
        if let Some(&i) = self.index.get(x) {
            return i;
        }
        let i = self.parent.len();
        self.index.insert(x.clone(), i);
        self.parent.push(i);
        self.rank.push(0);
        i
    }

    fn root(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut x = i;
        while x != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    /// Slot of the class representative of `x`.
    pub fn find(&mut self, x: &T) -> usize {
        let i = self.slot(x);
        self.root(i)
    }

    pub fn same_class(&mut self, x: &T, y: &T) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the classes of `x` and `y`; returns the surviving root and the
    /// absorbed one, or `None` if they were already merged.
    fn link(&mut self, x: &T, y: &T) -> Option<(usize, usize)> {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return None;
        }
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
            Some((ry, rx))
        } else {
            if self.rank[rx] == self.rank[ry] {
                self.rank[rx] += 1;
            }
            self.parent[ry] = rx;
            Some((rx, ry))
        }
    }

    pub fn union(&mut self, x: &T, y: &T) {
        self.link(x, y);
    }

    /// All classes with at least one member, members in insertion order,
    /// classes ordered by their first member.
    pub fn classes(&mut self) -> Vec<Vec<T>> {
        let mut members: Vec<(usize, T)> = self.index.iter().map(|(v, &i)| (i, v.clone())).collect();
        members.sort_by_key(|(i, _)| *i);

        let mut class_of_root: HashMap<usize, usize> = HashMap::new();
        let mut result: Vec<Vec<T>> = Vec::new();
        for (i, v) in members {
            let r = self.root(i);
            let c = *class_of_root.entry(r).or_insert_with(|| {
                result.push(Vec::new());
                result.len() - 1
            });
            result[c].push(v);
        }
        result
    }
}

/// Union-find whose classes carry a label; labels of merged classes are
/// combined with a user supplied function.
pub struct LabelledPartition<T, L, F> {
    partition: Partition<T>,
    labels: Vec<L>,
    combine: F,
}

impl<T, L, F> LabelledPartition<T, L, F>
where
    T: Hash + Eq + Clone,
    L: Clone + Default,
    F: Fn(&L, &L) -> L,
{
    pub fn new(combine: F) -> Self {
        Self {
            partition: Partition::new(),
            labels: Vec::new(),
            combine,
        }
    }

    fn sync_labels(&mut self) {
        while self.labels.len() < self.partition.parent.len() {
            self.labels.push(L::default());
        }
    }

    pub fn find(&mut self, x: &T) -> usize {
        let r = self.partition.find(x);
        self.sync_labels();
        r
    }

    pub fn same_class(&mut self, x: &T, y: &T) -> bool {
        self.find(x) == self.find(y)
    }

    pub fn label(&mut self, x: &T) -> L {
        let r = self.find(x);
        self.labels[r].clone()
    }

    pub fn set_label(&mut self, x: &T, label: L) {
        let r = self.find(x);
        self.labels[r] = label;
    }

    pub fn union(&mut self, x: &T, y: &T) {
        let rx = self.find(x);
        let ry = self.find(y);
        if let Some((root, absorbed)) = self.partition.link(x, y) {
            let merged = (self.combine)(&self.labels[rx], &self.labels[ry]);
            self.labels[root] = merged;
            self.labels[absorbed] = L::default();
        }
    }
}

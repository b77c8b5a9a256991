//! Dependency graph over opaque string keys.
//!
//! The graph is a set of ordered pairs `(s, t)`. Given the graph:
//!
//! - the *dependents* of `s` are every `t` with `(s, t)` in the graph
//! - the *dependees* of `t` are every `s` with `(s, t)` in the graph
//!
//! Both directions are indexed so that lookups and membership checks are O(1)
//! amortized. The two indexes always describe the same edge set, and a key
//! whose adjacency set becomes empty is dropped from its index.
//!
//! The spreadsheet records `(cell, referenced)` for every variable in a cell's
//! formula, so `dependees_of(x)` are the cells whose formulas mention `x`.

use std::collections::{HashMap, HashSet};

/// Bidirectional edge index. `Clone` produces a fully independent copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependents: HashMap<String, HashSet<String>>,
    dependees: HashMap<String, HashSet<String>>,
    size: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains_edge(&self, s: &str, t: &str) -> bool {
        self.dependents.get(s).is_some_and(|set| set.contains(t))
    }

    /// Add `(s, t)`. No effect if the edge is already present.
    pub fn add_edge(&mut self, s: &str, t: &str) {
        let inserted = self
            .dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());
        if inserted {
            self.dependees
                .entry(t.to_string())
                .or_default()
                .insert(s.to_string());
            self.size += 1;
        }
    }

    /// Remove `(s, t)`. No effect if the edge is absent.
    pub fn remove_edge(&mut self, s: &str, t: &str) {
        if !remove_from(&mut self.dependents, s, t) {
            return;
        }
        remove_from(&mut self.dependees, t, s);
        self.size -= 1;
    }

    pub fn dependents_of<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependents
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn dependees_of<'a>(&'a self, t: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependees
            .get(t)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.contains_key(s)
    }

    pub fn has_dependees(&self, t: &str) -> bool {
        self.dependees.contains_key(t)
    }

    /// Replace every edge `(s, _)` with `(s, t)` for each `t` in `targets`.
    pub fn replace_dependents<I, T>(&mut self, s: &str, targets: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if let Some(old) = self.dependents.remove(s) {
            for t in &old {
                remove_from(&mut self.dependees, t, s);
            }
            self.size -= old.len();
        }
        for t in targets {
            self.add_edge(s, t.as_ref());
        }
    }

    /// Replace every edge `(_, t)` with `(s, t)` for each `s` in `sources`.
    pub fn replace_dependees<I, S>(&mut self, t: &str, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependees.remove(t) {
            for s in &old {
                remove_from(&mut self.dependents, s, t);
            }
            self.size -= old.len();
        }
        for s in sources {
            self.add_edge(s.as_ref(), t);
        }
    }
}

/// Remove `value` from `index[key]`, dropping the entry once it is empty.
/// Returns whether anything was removed.
fn remove_from(index: &mut HashMap<String, HashSet<String>>, key: &str, value: &str) -> bool {
    let Some(set) = index.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        index.remove(key);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sorted<'a>(iter: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        let mut v: Vec<_> = iter.collect();
        v.sort_unstable();
        v
    }

    /// {("a","b"), ("a","c"), ("b","d"), ("d","d")}
    fn sample() -> DependencyGraph {
        let mut g = DependencyGraph::new();
        g.add_edge("a", "b");
        g.add_edge("a", "c");
        g.add_edge("b", "d");
        g.add_edge("d", "d");
        g
    }

    #[test]
    fn test_empty_graph() {
        let g = DependencyGraph::new();
        assert!(g.is_empty());
        assert!(!g.has_dependents("a"));
        assert!(!g.has_dependees("a"));
        assert_eq!(g.dependents_of("a").count(), 0);
    }

    #[test]
    fn test_both_directions() {
        let g = sample();
        assert_eq!(g.len(), 4);
        assert_eq!(sorted(g.dependents_of("a")), vec!["b", "c"]);
        assert_eq!(sorted(g.dependents_of("b")), vec!["d"]);
        assert_eq!(sorted(g.dependents_of("c")), Vec::<&str>::new());
        assert_eq!(sorted(g.dependents_of("d")), vec!["d"]);
        assert_eq!(sorted(g.dependees_of("a")), Vec::<&str>::new());
        assert_eq!(sorted(g.dependees_of("b")), vec!["a"]);
        assert_eq!(sorted(g.dependees_of("d")), vec!["b", "d"]);
        assert!(g.has_dependents("a"));
        assert!(!g.has_dependents("c"));
        assert!(g.has_dependees("c"));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut g = sample();
        g.add_edge("a", "b");
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_remove_edge_drops_empty_entries() {
        let mut g = sample();
        g.remove_edge("b", "d");
        assert_eq!(g.len(), 3);
        assert!(!g.has_dependents("b"));
        assert_eq!(sorted(g.dependees_of("d")), vec!["d"]);

        // Absent edges are ignored.
        g.remove_edge("b", "d");
        g.remove_edge("x", "y");
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_replace_dependents() {
        let mut g = sample();
        g.replace_dependents("a", ["x", "y", "b"]);
        assert_eq!(sorted(g.dependents_of("a")), vec!["b", "x", "y"]);
        assert!(!g.has_dependees("c"));
        assert_eq!(sorted(g.dependees_of("x")), vec!["a"]);
        assert_eq!(g.len(), 5);

        g.replace_dependents("a", Vec::<String>::new());
        assert!(!g.has_dependents("a"));
        assert!(!g.has_dependees("b"));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_replace_dependees() {
        let mut g = sample();
        g.replace_dependees("d", ["a"]);
        assert_eq!(sorted(g.dependees_of("d")), vec!["a"]);
        assert!(!g.has_dependents("b"));
        assert_eq!(sorted(g.dependents_of("a")), vec!["b", "c", "d"]);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        copy.add_edge("a", "z");
        copy.remove_edge("b", "d");
        assert_eq!(original.len(), 4);
        assert!(!original.contains_edge("a", "z"));
        assert!(original.contains_edge("b", "d"));
        assert_eq!(copy.len(), 4);
    }

    #[test]
    fn test_large_graph() {
        let mut g = DependencyGraph::new();
        for i in 0..1000 {
            for j in (i + 1)..(i + 5) {
                g.add_edge(&i.to_string(), &j.to_string());
            }
        }
        assert_eq!(g.len(), 4000);
        for i in (0..1000).step_by(2) {
            g.replace_dependents(&i.to_string(), [String::from("hub")]);
        }
        assert_eq!(g.len(), 500 * 4 + 500);
        assert_eq!(g.dependees_of("hub").count(), 500);
    }

    fn key() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(String::from)
    }

    proptest! {
        #[test]
        fn prop_indexes_stay_in_lockstep(edges in prop::collection::vec((key(), key(), any::<bool>()), 0..64)) {
            let mut g = DependencyGraph::new();
            let mut expected = HashSet::new();
            for (s, t, add) in &edges {
                if *add {
                    g.add_edge(s, t);
                    expected.insert((s.clone(), t.clone()));
                } else {
                    g.remove_edge(s, t);
                    expected.remove(&(s.clone(), t.clone()));
                }
            }
            prop_assert_eq!(g.len(), expected.len());
            for (s, t) in &expected {
                prop_assert!(g.dependents_of(s).any(|x| x == t.as_str()));
                prop_assert!(g.dependees_of(t).any(|x| x == s.as_str()));
            }
            let forward: usize = ["a", "b", "c", "d", "e", "f"].iter().map(|k| g.dependents_of(k).count()).sum();
            let backward: usize = ["a", "b", "c", "d", "e", "f"].iter().map(|k| g.dependees_of(k).count()).sum();
            prop_assert_eq!(forward, expected.len());
            prop_assert_eq!(backward, expected.len());
        }

        #[test]
        fn prop_replace_dependents_is_exact(
            before in prop::collection::vec((key(), key()), 0..32),
            targets in prop::collection::hash_set(key(), 0..6),
        ) {
            let mut g = DependencyGraph::new();
            for (s, t) in &before {
                g.add_edge(s, t);
            }
            g.replace_dependents("a", &targets);
            let now: HashSet<String> = g.dependents_of("a").map(String::from).collect();
            prop_assert_eq!(now, targets);
        }
    }
}

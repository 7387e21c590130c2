//! Dependency graph collected during transitive resolution.

use std::collections::HashMap;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use depsel_core::artifact::ArtifactCoordinate;

/// A collected dependency graph backed by petgraph. At most one node per
/// `group:artifact:type:classifier` (the nearest one wins).
pub struct DependencyGraph {
    graph: DiGraph<ArtifactCoordinate, ()>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl DependencyGraph {
    pub fn new(root: ArtifactCoordinate) -> Self {
        let mut graph = DiGraph::new();
        let key = root.conflict_key();
        let root = graph.add_node(root);
        Self {
            graph,
            index: HashMap::from([(key, root)]),
            root,
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Add or retrieve a node. If the key already exists, returns the existing index.
    pub fn add_node(&mut self, node: ArtifactCoordinate) -> NodeIndex {
        let key = node.conflict_key();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Add a dependency edge from `from` to `to`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Look up a node by `group:artifact:type:classifier`.
    pub fn find(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// Shortest path from the root to the node, rendered as
    /// `group:artifact:type[:classifier]:version` entries.
    pub fn trail(&self, key: &str) -> Option<Vec<String>> {
        let target = self.find(key)?;
        let (_, path) = astar(&self.graph, self.root, |n| n == target, |_| 1, |_| 0)?;
        Some(path.into_iter().map(|idx| trail_id(&self.graph[idx])).collect())
    }
}

/// Trail entry for one artifact: its coordinate without scope.
pub fn trail_id(a: &ArtifactCoordinate) -> String {
    if a.has_classifier() {
        format!(
            "{}:{}:{}:{}:{}",
            a.group_id, a.artifact_id, a.type_, a.classifier, a.version
        )
    } else {
        format!("{}:{}:{}:{}", a.group_id, a.artifact_id, a.type_, a.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(group: &str, artifact: &str, version: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::new(group, artifact, version)
    }

    #[test]
    fn duplicate_add_returns_same_index() {
        let mut g = DependencyGraph::new(node("com.example", "app", "1.0"));
        let idx1 = g.add_node(node("org.example", "lib", "1.0"));
        let idx2 = g.add_node(node("org.example", "lib", "2.0"));
        assert_eq!(idx1, idx2);
        assert_eq!(g.graph[idx1].version, "1.0");
    }

    #[test]
    fn classifier_and_type_are_distinct_nodes() {
        let mut g = DependencyGraph::new(node("com.example", "app", "1.0"));
        let jar = g.add_node(node("org.example", "lib", "1.0"));
        let sources = g.add_node(node("org.example", "lib", "1.0").with_classifier("sources"));
        let tests = g.add_node(node("org.example", "lib", "1.0").with_type("test-jar"));
        assert_ne!(jar, sources);
        assert_ne!(jar, tests);
        assert_eq!(g.find("org.example:lib:jar:sources"), Some(sources));
    }

    #[test]
    fn trail_follows_shortest_path() {
        let mut g = DependencyGraph::new(node("com.example", "app", "1.0"));
        let root = g.root();
        let a = g.add_node(node("org.a", "a", "1.0"));
        let b = g.add_node(node("org.b", "b", "2.0"));
        let c = g.add_node(node("org.c", "c", "3.0"));
        g.add_edge(root, a);
        g.add_edge(a, b);
        g.add_edge(b, c);
        g.add_edge(root, c);

        let trail = g.trail("org.b:b:jar:").unwrap();
        assert_eq!(
            trail,
            ["com.example:app:jar:1.0", "org.a:a:jar:1.0", "org.b:b:jar:2.0"]
        );
        assert_eq!(g.trail("org.c:c:jar:").unwrap().len(), 2);
        assert!(g.trail("org.missing:x:jar:").is_none());
    }
}

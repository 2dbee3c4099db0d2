//! Direct-dependency lookup and a petgraph-backed target graph.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The one capability the calculator needs from a build graph.
///
/// Unknown targets and targets without dependencies both yield an empty list.
pub trait DirectDependencies {
    fn direct_dependencies(&self, target: &str) -> Vec<String>;
}

impl<G: DirectDependencies + ?Sized> DirectDependencies for &G {
    fn direct_dependencies(&self, target: &str) -> Vec<String> {
        (**self).direct_dependencies(target)
    }
}

impl<S: std::hash::BuildHasher> DirectDependencies for HashMap<String, Vec<String>, S> {
    fn direct_dependencies(&self, target: &str) -> Vec<String> {
        self.get(target).cloned().unwrap_or_default()
    }
}

impl DirectDependencies for BTreeMap<String, Vec<String>> {
    fn direct_dependencies(&self, target: &str) -> Vec<String> {
        self.get(target).cloned().unwrap_or_default()
    }
}

/// A target declaration: its name and the targets it directly depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetNode {
    pub name: String,
    #[serde(default)]
    pub deps: Vec<String>,
}

impl TargetNode {
    pub fn new(name: impl Into<String>, deps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            deps,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NodeDef {
    #[serde(default)]
    deps: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphFile {
    #[serde(default)]
    targets: IndexMap<String, NodeDef>,
}

/// Directed graph of targets, edges pointing from a target to its
/// dependencies.
///
/// Unlike a scheduling graph this one accepts cycles: the profiler only ever
/// looks one edge away from a target.
#[derive(Debug, Clone, Default)]
pub struct TargetGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl TargetGraph {
    /// Builds a graph from target declarations.
    ///
    /// A dependency naming a target that is not declared becomes an implicit
    /// leaf node. A dependency listed twice keeps both edges, so it counts
    /// twice towards waiting time, as with a plain map of dependency lists.
    pub fn new(nodes: Vec<TargetNode>) -> Self {
        let mut target_graph = Self::default();

        for node in &nodes {
            target_graph.ensure_node(&node.name);
        }

        for node in &nodes {
            let from = target_graph.node_map[&node.name];
            for dep in &node.deps {
                if !target_graph.node_map.contains_key(dep) {
                    tracing::debug!(target_name = %node.name, dep = %dep, "adding implicit dependency node");
                }
                let to = target_graph.ensure_node(dep);
                target_graph.graph.add_edge(from, to, ());
            }
        }

        target_graph
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_map.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Parses `[targets."<name>"] deps = [...]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: GraphFile = toml::from_str(content).map_err(|error| Error::Toml {
            error,
            context: "target graph".to_string(),
        })?;
        Ok(Self::from_defs(file.targets))
    }

    /// Parses a JSON object of the form `{"<name>": {"deps": [...]}}`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let defs: IndexMap<String, NodeDef> =
            serde_json::from_str(content).map_err(|error| Error::Json {
                error,
                context: "target graph".to_string(),
            })?;
        Ok(Self::from_defs(defs))
    }

    /// Loads a graph file, choosing JSON for `.json` files and TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let graph = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .map_err(|e| match e {
            Error::Json { error, .. } => Error::Json {
                error,
                context: path.display().to_string(),
            },
            Error::Toml { error, .. } => Error::Toml {
                error,
                context: path.display().to_string(),
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), targets = graph.len(), "loaded target graph");
        Ok(graph)
    }

    fn from_defs(defs: IndexMap<String, NodeDef>) -> Self {
        Self::new(
            defs.into_iter()
                .map(|(name, def)| TargetNode::new(name, def.deps))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[inline]
    pub fn contains(&self, target: &str) -> bool {
        self.node_map.contains_key(target)
    }

    /// Returns all target names in declaration order.
    pub fn targets(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Returns direct dependencies of a target in declaration order.
    pub fn dependencies(&self, target: &str) -> Vec<String> {
        self.neighbors(target, Direction::Outgoing)
    }

    /// Returns targets that directly depend on `target`.
    pub fn dependents(&self, target: &str) -> Vec<String> {
        self.neighbors(target, Direction::Incoming)
    }

    fn neighbors(&self, target: &str, direction: Direction) -> Vec<String> {
        let Some(node) = self.node_map.get(target) else {
            return Vec::new();
        };
        // petgraph yields neighbors newest edge first
        let mut names: Vec<String> = self
            .graph
            .neighbors_directed(*node, direction)
            .map(|idx| self.graph[idx].clone())
            .collect();
        names.reverse();
        names
    }
}

impl DirectDependencies for TargetGraph {
    fn direct_dependencies(&self, target: &str) -> Vec<String> {
        self.dependencies(target)
    }
}

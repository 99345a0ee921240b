use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use log::{debug, warn};

use crate::mod_system::error::ModError;
use crate::mod_system::manifest::{Manifest, ModPriority};

/// Directed "loads before" graph over a set of mods.
///
/// Nodes are indexed by discovery order. An edge `a -> b` means `a` must be
/// placed before `b`. Edges only ever connect mods that are present; hints
/// naming unknown ids are dropped here and missing dependencies surface at
/// load time instead. An optional dependency only adds an edge when that edge
/// does not close a cycle.
#[derive(Debug, Clone)]
pub struct OrderGraph {
    ids: Vec<String>,
    priorities: Vec<ModPriority>,
    edges: BTreeSet<(usize, usize)>,
}

impl OrderGraph {
    /// Build the graph from manifests given in discovery order
    pub fn build<'a, I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = &'a Manifest>,
    {
        let manifests: Vec<&Manifest> = manifests.into_iter().collect();
        let index: HashMap<&str, usize> = manifests
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id(), i))
            .collect();

        let mut graph = Self {
            ids: manifests.iter().map(|m| m.id().to_string()).collect(),
            priorities: manifests.iter().map(|m| m.priority()).collect(),
            edges: BTreeSet::new(),
        };

        for (this, manifest) in manifests.iter().enumerate() {
            // `load_after: [x]` and a required dependency on x both mean x -> this
            let predecessors = manifest
                .get_load_after()
                .iter()
                .map(String::as_str)
                .chain(manifest.required_dependencies().map(|d| d.mod_id.as_str()));
            for other_id in predecessors {
                if let Some(&other) = index.get(other_id) {
                    graph.add_edge(other, this);
                }
            }

            for other_id in manifest.get_load_before() {
                if let Some(&other) = index.get(other_id.as_str()) {
                    graph.add_edge(this, other);
                }
            }
        }

        // Optional dependencies are hints: added last, and only where they
        // leave the hard constraints satisfiable.
        for (this, manifest) in manifests.iter().enumerate() {
            for dependency in manifest.get_dependencies().iter().filter(|d| d.optional) {
                let Some(&other) = index.get(dependency.mod_id.as_str()) else {
                    continue;
                };
                if other != this && graph.reaches(this, other) {
                    debug!(
                        "Ignoring optional ordering '{}' -> '{}': it would close a cycle",
                        graph.ids[other], graph.ids[this]
                    );
                    continue;
                }
                graph.add_edge(other, this);
            }
        }

        graph
    }

    /// Whether `to` is reachable from `from` along existing edges
    fn reaches(&self, from: usize, to: usize) -> bool {
        let mut visited = vec![false; self.ids.len()];
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if std::mem::replace(&mut visited[node], true) {
                continue;
            }
            stack.extend(self.edges.range((node, 0)..=(node, usize::MAX)).map(|&(_, next)| next));
        }
        false
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        if from == to {
            warn!("Mod '{}' references itself in its ordering hints, ignoring", self.ids[from]);
            return;
        }
        self.edges.insert((from, to));
    }

    /// Whether `before` is directly constrained to load before `after`
    pub fn has_edge(&self, before: &str, after: &str) -> bool {
        let find = |id: &str| self.ids.iter().position(|x| x == id);
        match (find(before), find(after)) {
            (Some(a), Some(b)) => self.edges.contains(&(a, b)),
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Topologically sort the graph (Kahn's algorithm).
    ///
    /// Among the nodes that are ready at each step the highest priority wins,
    /// then the earliest discovered. Fails with `CyclicDependency` listing every
    /// node that could not be placed, in discovery order; no partial order is
    /// ever returned.
    pub fn sort(&self) -> Result<Vec<String>, ModError> {
        let n = self.ids.len();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        for &(from, to) in &self.edges {
            successors[from].push(to);
            in_degree[to] += 1;
        }

        let mut ready: BinaryHeap<(ModPriority, Reverse<usize>)> = (0..n)
            .filter(|&i| in_degree[i] == 0)
            .map(|i| (self.priorities[i], Reverse(i)))
            .collect();

        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);
        while let Some((_, Reverse(node))) = ready.pop() {
            placed[node] = true;
            order.push(self.ids[node].clone());
            for &next in &successors[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push((self.priorities[next], Reverse(next)));
                }
            }
        }

        if order.len() != n {
            let remaining: Vec<String> = (0..n)
                .filter(|&i| !placed[i])
                .map(|i| self.ids[i].clone())
                .collect();
            return Err(ModError::CyclicDependency(remaining));
        }

        debug!("Computed load order: {:?}", order);
        Ok(order)
    }
}

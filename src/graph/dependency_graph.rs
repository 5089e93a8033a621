use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::story::UserStory;
use crate::timeline::{UnresolvedReason, UnresolvedStory};

/// Dependency DAG over a backlog, used to explain why stories survived the
/// scheduler's fixed point. Edges run dependency -> dependent.
pub struct DependencyGraph<'a> {
    stories: &'a [UserStory],
    graph: DiGraph<usize, ()>,
    id_to_index: HashMap<&'a str, NodeIndex>,
}

impl<'a> DependencyGraph<'a> {
    pub fn build(stories: &'a [UserStory]) -> Self {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut id_to_index: HashMap<&'a str, NodeIndex> = HashMap::new();

        for (idx, story) in stories.iter().enumerate() {
            let node_ix = graph.add_node(idx);
            id_to_index.insert(story.id.as_str(), node_ix);
        }

        // Edges dep -> story; references to unknown ids get no edge, they are
        // reported as missing instead.
        for story in stories {
            let v = id_to_index[story.id.as_str()];
            for dep in &story.dependencies {
                if let Some(&u) = id_to_index.get(dep.as_str()) {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self { stories, graph, id_to_index }
    }

    /// Node indices that sit on a dependency cycle.
    fn cyclic_nodes(&self) -> HashSet<NodeIndex> {
        let mut cyclic = HashSet::new();
        for component in tarjan_scc(&self.graph) {
            if component.len() > 1 {
                cyclic.extend(component);
            } else if let Some(&only) = component.first() {
                if self.graph.contains_edge(only, only) {
                    cyclic.insert(only);
                }
            }
        }
        cyclic
    }

    /// Classify every story in `pending` (indices into the backlog) that the
    /// scheduler could not place. `completed` holds the ids that were
    /// scheduled.
    pub fn explain_unresolved(
        &self,
        pending: &[usize],
        completed: &HashSet<String>,
    ) -> Vec<UnresolvedStory> {
        let cyclic = self.cyclic_nodes();
        let mut unresolved = Vec::with_capacity(pending.len());

        for &idx in pending {
            let story = &self.stories[idx];
            let reason = if let Some(missing) = story
                .dependencies
                .iter()
                .find(|dep| !self.id_to_index.contains_key(dep.as_str()))
            {
                UnresolvedReason::MissingDependency(missing.clone())
            } else if cyclic.contains(&self.id_to_index[story.id.as_str()]) {
                let mut members: Vec<String> = self
                    .cycle_members(self.id_to_index[story.id.as_str()], &cyclic);
                members.sort();
                UnresolvedReason::DependencyCycle(members)
            } else {
                let blocker = story
                    .dependencies
                    .iter()
                    .find(|dep| !completed.contains(dep.as_str()))
                    .cloned()
                    .unwrap_or_else(|| story.id.clone());
                UnresolvedReason::BlockedBy(blocker)
            };

            unresolved.push(UnresolvedStory {
                id: story.id.clone(),
                reason,
            });
        }

        unresolved
    }

    fn cycle_members(&self, node: NodeIndex, cyclic: &HashSet<NodeIndex>) -> Vec<String> {
        for component in tarjan_scc(&self.graph) {
            if component.contains(&node) {
                return component
                    .into_iter()
                    .filter(|n| cyclic.contains(n))
                    .map(|n| self.stories[self.graph[n]].id.clone())
                    .collect();
            }
        }
        Vec::new()
    }
}

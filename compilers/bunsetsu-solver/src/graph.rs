use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use bunsetsu_protocol::{Analysis, BunsetsuId};
use log::warn;

/// Dependency edges as a directed graph: dependent -> head, weighted by label.
pub struct DependencyGraph {
    graph: DiGraph<BunsetsuId, String>,
    nodes: Vec<NodeIndex>,
}

/// One node of a [`Hierarchy`]. `id` is `None` for a synthesized root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: Option<BunsetsuId>,
    /// Label of the edge from the parent node.
    pub label: String,
    pub depth: usize,
    children: Vec<usize>,
}

/// Tree over every bunsetsu, stored flat in pre-order. The first node is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
}

/// Pending visit: arena slot of the parent, bunsetsu, label of the edge into it, depth.
type Visit = (Option<usize>, BunsetsuId, String, usize);

impl DependencyGraph {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = analysis.bunsetsu.iter().map(|b| graph.add_node(b.id)).collect();

        for dep in &analysis.dependencies {
            match (nodes.get(dep.from.index()), nodes.get(dep.to.index())) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, dep.label.clone());
                }
                _ => warn!("dropping dependency {} -> {}: bunsetsu out of range", dep.from, dep.to),
            }
        }

        Self { graph, nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn inner(&self) -> &DiGraph<BunsetsuId, String> {
        &self.graph
    }

    /// Bunsetsu that never appear as the target of a dependency.
    pub fn roots(&self) -> Vec<BunsetsuId> {
        self.nodes
            .iter()
            .filter(|&&n| self.graph.edges_directed(n, Direction::Incoming).next().is_none())
            .map(|&n| self.graph[n])
            .collect()
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Targets of the dependencies leaving `id`, in sentence order, with their labels.
    pub fn targets(&self, id: BunsetsuId) -> Vec<(BunsetsuId, &str)> {
        let Some(&node) = self.nodes.get(id.index()) else {
            return Vec::new();
        };
        let mut targets: Vec<(BunsetsuId, &str)> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (self.graph[e.target()], e.weight().as_str()))
            .collect();
        targets.sort_by_key(|&(id, _)| id);
        targets
    }

    /// Builds a single tree over every bunsetsu, children hanging along `from -> to`.
    ///
    /// - one root: that bunsetsu is the tree root
    /// - several roots: a synthesized root adopts them in sentence order
    /// - no root (every bunsetsu is some edge's target): bunsetsu 0 is used as the root
    ///
    /// Each bunsetsu appears exactly once, under the first parent that reaches it.
    /// Bunsetsu unreachable from the root are attached directly under it.
    pub fn hierarchy(&self) -> Option<Hierarchy> {
        if self.is_empty() {
            return None;
        }

        let mut nodes: Vec<TreeNode> = Vec::with_capacity(self.len() + 1);
        let mut visited = vec![false; self.len()];
        let mut stack: Vec<Visit> = Vec::new();

        match self.roots().as_slice() {
            [single] => stack.push((None, *single, String::new(), 0)),
            [] => {
                warn!("dependency graph has no root; falling back to the first bunsetsu");
                stack.push((None, BunsetsuId(0), String::new(), 0));
            }
            many => {
                nodes.push(TreeNode {
                    id: None,
                    label: String::new(),
                    depth: 0,
                    children: Vec::new(),
                });
                for &id in many.iter().rev() {
                    stack.push((Some(0), id, String::new(), 1));
                }
            }
        }
        self.walk(&mut stack, &mut nodes, &mut visited);

        for index in 0..self.len() {
            if !visited[index] {
                warn!("bunsetsu {} unreachable from root; attaching to root", index);
                stack.push((Some(0), BunsetsuId::from(index), String::new(), 1));
                self.walk(&mut stack, &mut nodes, &mut visited);
            }
        }

        Some(Hierarchy { nodes })
    }

    fn walk(&self, stack: &mut Vec<Visit>, nodes: &mut Vec<TreeNode>, visited: &mut [bool]) {
        while let Some((parent, id, label, depth)) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;

            let slot = nodes.len();
            nodes.push(TreeNode {
                id: Some(id),
                label,
                depth,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(slot);
            }

            // reversed so the earliest target is popped first
            for (target, target_label) in self.targets(id).into_iter().rev() {
                if !visited[target.index()] {
                    stack.push((Some(slot), target, target_label.to_string(), depth + 1));
                }
            }
        }
    }
}

impl Hierarchy {
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn children<'a>(&'a self, node: &'a TreeNode) -> impl Iterator<Item = &'a TreeNode> + 'a {
        node.children.iter().map(move |&slot| &self.nodes[slot])
    }

    /// Number of nodes, synthesized root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented text rendering, one line per node.
    pub fn render(&self, analysis: &Analysis) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let text = match node.id.and_then(|id| analysis.get(id)) {
                Some(b) => b.surface.as_str(),
                None => "(root)",
            };
            out.push_str(&"  ".repeat(node.depth));
            out.push_str(text);
            if !node.label.is_empty() {
                out.push_str(" [");
                out.push_str(&node.label);
                out.push(']');
            }
            out.push('\n');
        }
        out
    }
}

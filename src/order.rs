//! Build ordering.
//!
//! Files are emitted in depth-first post-order: a file appears only after
//! every file it includes that is itself part of the graph. Include tokens
//! that name no graph node are leaves and never show up in the result.
//!
//! Cycles do not stop the walk. An edge back into a file that is still being
//! expanded is skipped, the order is produced anyway, and the skipped edge is
//! recorded so callers can decide whether a partially valid order is enough.

use crate::graph::DependencyGraph;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the traversal stack.
    Open,
    /// Emitted.
    Done,
}

/// Linear compile order for a [`DependencyGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOrder {
    files: Vec<String>,
    back_edges: Vec<(String, String)>,
}

impl BuildOrder {
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn position(&self, file: &str) -> Option<usize> {
        self.files.iter().position(|f| f == file)
    }

    /// `true` when every edge between graph files is honoured by the order.
    pub fn is_complete(&self) -> bool {
        self.back_edges.is_empty()
    }

    /// Edges `(from, to)` skipped because `to` was still being expanded.
    pub fn back_edges(&self) -> &[(String, String)] {
        &self.back_edges
    }

    /// Reject orders broken by an include cycle.
    pub fn require_complete(self) -> anyhow::Result<Self> {
        if let Some((from, to)) = self.back_edges.first() {
            anyhow::bail!(
                "Include cycle detected: {} includes {} which is still being ordered",
                from,
                to
            );
        }
        Ok(self)
    }
}

/// Order `graph` so that each file follows the files it depends on.
///
/// Roots are taken in graph order and dependencies in the order they were
/// included, so a fixed graph always yields the same sequence.
pub fn build_order(graph: &DependencyGraph) -> BuildOrder {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(graph.len());
    let mut order = BuildOrder {
        files: Vec::with_capacity(graph.len()),
        back_edges: Vec::new(),
    };
    // (file, index of the next dependency to look at)
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for root in graph.files() {
        if marks.contains_key(root) {
            continue;
        }
        marks.insert(root, Mark::Open);
        stack.push((root, 0));

        while let Some(&(file, next)) = stack.last() {
            let deps = graph.dependencies(file).unwrap_or_default();
            let Some(dep) = deps.get(next) else {
                stack.pop();
                marks.insert(file, Mark::Done);
                order.files.push(file.to_string());
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let dep = dep.as_str();
            if !graph.contains(dep) {
                continue;
            }
            match marks.get(dep) {
                None => {
                    marks.insert(dep, Mark::Open);
                    stack.push((dep, 0));
                }
                Some(Mark::Open) => order
                    .back_edges
                    .push((file.to_string(), dep.to_string())),
                Some(Mark::Done) => {}
            }
        }
    }

    order
}

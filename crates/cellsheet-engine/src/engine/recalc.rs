//! Recalculation ordering and circular dependency detection.
//!
//! When a cell changes, it and every cell that transitively references it
//! must be recomputed, each one after the cells it reads from. This module
//! walks the graph depth-first from the changed cell, marking keys as
//! in-progress while they are on the current path and done once all of their
//! referencing cells have been visited. Reaching an in-progress key means the
//! edit closed a loop.

use std::collections::HashSet;

use super::deps::DependencyGraph;
use super::error::CycleError;

/// Order `name` and all cells that transitively reference it so that every
/// cell comes after the cells it depends on. `name` is always first.
///
/// Returns the cycle path if `name` reaches itself.
pub fn cells_to_recalculate(graph: &DependencyGraph, name: &str) -> Result<Vec<String>, CycleError> {
    let mut in_progress = HashSet::new();
    let mut done = HashSet::new();
    let mut path = vec![name];
    let mut postorder = Vec::new();

    // One frame per key on the current path, holding the referencing cells
    // still to visit. Explicit so long chains do not grow the call stack.
    let mut frames = vec![(name, graph.dependees_of(name))];
    in_progress.insert(name);

    loop {
        let Some((current, referencing)) = frames.last_mut() else {
            break;
        };
        let current = *current;
        let next = referencing.next();

        match next {
            Some(next) if in_progress.contains(next) => {
                let mut cycle: Vec<String> = path.iter().map(|s| s.to_string()).collect();
                cycle.push(next.to_string());
                return Err(CycleError { path: cycle });
            }
            Some(next) if done.contains(next) => {}
            Some(next) => {
                in_progress.insert(next);
                path.push(next);
                frames.push((next, graph.dependees_of(next)));
            }
            None => {
                frames.pop();
                path.pop();
                in_progress.remove(current);
                done.insert(current);
                postorder.push(current.to_string());
            }
        }
    }

    postorder.reverse();
    log::trace!("recalculation order from {}: {:?}", name, postorder);
    Ok(postorder)
}

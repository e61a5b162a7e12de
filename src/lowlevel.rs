use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::common::{Agent, Path};
use crate::constraint::{ConstraintSet, ConstraintTable};
use crate::map::{GridMap, Vertex};
use crate::stats::Stats;

struct AStarNode {
    loc: Vertex,
    g: usize,
    h: usize,
    time_step: usize,
    parent: Option<usize>,
}

// Min-heap over (f, h, loc): lower f, then lower h, then smaller location.
struct OpenEntry {
    index: usize,
    f: usize,
    h: usize,
    loc: Vertex,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.loc.cmp(&self.loc))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn reconstruct(arena: &[AStarNode], mut index: usize) -> Path {
    let mut locs = vec![arena[index].loc];
    while let Some(parent) = arena[index].parent {
        index = parent;
        locs.push(arena[index].loc);
    }
    locs.reverse();
    Path(locs)
}

// Returns None if no path exists under constraints; the high-level search
// discards the child on None rather than treating it as an error.
pub fn plan_single(
    map: &GridMap,
    agent: &Agent,
    heuristic: &HashMap<Vertex, usize>,
    constraints: &ConstraintSet,
    stats: &mut Stats,
) -> Option<Path> {
    let table = ConstraintTable::build(constraints, agent.id);

    let Some(&start_h) = heuristic.get(&agent.start) else {
        return None;
    };

    let mut arena = vec![AStarNode {
        loc: agent.start,
        g: 0,
        h: start_h,
        time_step: 0,
        parent: None,
    }];
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        index: 0,
        f: start_h,
        h: start_h,
        loc: agent.start,
    });
    let mut best_g: HashMap<(Vertex, usize), usize> = HashMap::new();
    best_g.insert((agent.start, 0), 0);

    while let Some(entry) = open.pop() {
        let (loc, g, time_step) = {
            let node = &arena[entry.index];
            (node.loc, node.g, node.time_step)
        };

        if best_g.get(&(loc, time_step)).is_some_and(|&best| best < g) {
            continue;
        }
        stats.low_level_expanded += 1;

        if loc == agent.goal && no_future_negative_on_goal(&table, time_step, agent.goal) {
            return Some(reconstruct(&arena, entry.index));
        }

        let next_time = time_step + 1;
        let mut candidates = map.neighbours(loc);
        candidates.push(loc);

        let forced: Vec<Vertex> = candidates
            .iter()
            .copied()
            .filter(|&next| table.is_positively_constrained(loc, next, next_time))
            .collect();
        let successors: Vec<Vertex> = if !forced.is_empty() {
            vec![forced[0]]
        } else {
            candidates
                .into_iter()
                .filter(|&next| !table.is_negatively_constrained(loc, next, next_time))
                .collect()
        };

        for next in successors {
            let tentative_g = g + 1;
            let key = (next, next_time);
            if tentative_g >= *best_g.get(&key).unwrap_or(&usize::MAX) {
                continue;
            }
            let Some(&h) = heuristic.get(&next) else {
                continue;
            };
            best_g.insert(key, tentative_g);
            let index = arena.len();
            arena.push(AStarNode {
                loc: next,
                g: tentative_g,
                h,
                time_step: next_time,
                parent: Some(entry.index),
            });
            open.push(OpenEntry {
                index,
                f: tentative_g + h,
                h,
                loc: next,
            });
        }
    }

    None
}

fn no_future_negative_on_goal(table: &ConstraintTable, current_time: usize, goal: Vertex) -> bool {
    table
        .negative_timesteps()
        .filter(|&&t| t > current_time)
        .all(|&t| {
            !table
                .negative_at(t)
                .is_some_and(|locs| locs.contains(&crate::constraint::Location::Vertex(goal)))
        })
}

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cache::LowLevelCache;
use crate::collision::{all_collisions, Collision};
use crate::common::{Agent, Path, Solution};
use crate::constraint::{Constraint, ConstraintSet, Location};
use crate::error::CbsError;
use crate::lowlevel::plan_single;
use crate::map::GridMap;
use crate::split::{disjoint_splitting, standard_splitting, Splitting};
use crate::stats::Stats;

#[derive(Clone)]
struct CbsNode {
    constraints: ConstraintSet,
    paths: Vec<Rc<Path>>,
    collisions: Vec<Collision>,
    cost: usize,
    generation: usize,
}

// Lower cost first, then fewer collisions, then earlier generation.
#[derive(Clone, Copy, PartialEq, Eq)]
struct NodeKey {
    cost: usize,
    collisions: usize,
    generation: usize,
}

impl Ord for NodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.collisions.cmp(&self.collisions))
            .then_with(|| other.generation.cmp(&self.generation))
    }
}
impl PartialOrd for NodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct HeapEntry {
    key: NodeKey,
    node: CbsNode,
}
impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for HeapEntry {}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(PartialEq, Eq, Hash)]
struct Fingerprint(Vec<Path>, ConstraintSet);

fn fingerprint(node: &CbsNode) -> Fingerprint {
    Fingerprint(
        node.paths.iter().map(|p| (**p).clone()).collect(),
        node.constraints.clone(),
    )
}

pub struct Cbs {
    map: GridMap,
    agents: Vec<Agent>,
    cache: LowLevelCache,
    stats: Stats,
}

impl Cbs {
    pub fn new(map: GridMap, agents: Vec<Agent>) -> Result<Self, CbsError> {
        for agent in &agents {
            if !map.is_free(agent.start) {
                return Err(CbsError::InvalidEndpoint(agent.start));
            }
            if !map.is_free(agent.goal) {
                return Err(CbsError::InvalidEndpoint(agent.goal));
            }
        }
        Ok(Cbs {
            map,
            agents,
            cache: LowLevelCache::default(),
            stats: Stats::default(),
        })
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    // Returns false if any of agents has no path; caller discards the
    // whole child/root.
    fn plan_agents(
        &mut self,
        agents: &[usize],
        constraints: &ConstraintSet,
        paths: &mut Vec<Rc<Path>>,
    ) -> bool {
        for &id in agents {
            if let Some(cached) = self.cache.get(id, constraints) {
                paths[id] = cached;
                continue;
            }
            let agent = self.agents[id];
            let heuristic = self.map.heuristic(agent.goal);
            let Some(path) = plan_single(&self.map, &agent, &heuristic, constraints, &mut self.stats) else {
                return false;
            };
            let path = Rc::new(path);
            self.cache.insert(id, constraints.clone(), Rc::clone(&path));
            paths[id] = path;
        }
        true
    }

    fn build_root(&mut self) -> Result<CbsNode, CbsError> {
        let constraints = ConstraintSet::new();
        let mut paths = vec![Rc::new(Path(Vec::new())); self.agents.len()];
        for id in 0..self.agents.len() {
            if !self.plan_agents(&[id], &constraints, &mut paths) {
                return Err(CbsError::NoRootSolution(id));
            }
        }
        let collisions = all_collisions(&paths);
        let cost = paths.iter().map(|p| p.cost()).sum();
        Ok(CbsNode {
            constraints,
            paths,
            collisions,
            cost,
            generation: 0,
        })
    }

    fn violating_agents(constraint: &Constraint, paths: &[Rc<Path>]) -> Vec<usize> {
        let mut violators = Vec::new();
        for (i, path) in paths.iter().enumerate() {
            if i == constraint.agent {
                continue;
            }
            let violates = match constraint.loc {
                Location::Vertex(u) => path.loc_at(constraint.time_step) == u,
                Location::Edge(u, v) => {
                    let prev = path.loc_at(constraint.time_step.saturating_sub(1));
                    let curr = path.loc_at(constraint.time_step);
                    (prev, curr) == (u, v) || (prev, curr) == (v, u)
                }
            };
            if violates {
                violators.push(i);
            }
        }
        violators
    }

    fn expand(&mut self, parent: &CbsNode, constraint: Constraint, generation: usize) -> Option<CbsNode> {
        let mut constraints = parent.constraints.clone();
        constraints.insert(constraint);
        let mut paths = parent.paths.clone();

        if !self.plan_agents(&[constraint.agent], &constraints, &mut paths) {
            return None;
        }

        if constraint.positive {
            let violators = Self::violating_agents(&constraint, &paths);
            if !violators.is_empty() && !self.plan_agents(&violators, &constraints, &mut paths) {
                return None;
            }
        }

        let collisions = all_collisions(&paths);
        let cost = paths.iter().map(|p| p.cost()).sum();
        Some(CbsNode {
            constraints,
            paths,
            collisions,
            cost,
            generation,
        })
    }

    pub fn solve(&mut self, splitting: Splitting, seed: u64) -> Result<Solution, CbsError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let root = self.build_root()?;

        let mut generation = 1usize;
        let mut seen: HashSet<Fingerprint> = HashSet::new();
        seen.insert(fingerprint(&root));

        let mut open = BinaryHeap::new();
        open.push(HeapEntry {
            key: NodeKey {
                cost: root.cost,
                collisions: root.collisions.len(),
                generation: 0,
            },
            node: root,
        });
        self.stats.high_level_generated += 1;

        while let Some(HeapEntry { node, .. }) = open.pop() {
            self.stats.high_level_expanded += 1;

            // Always resolve the most recently discovered collision first.
            let Some(collision) = node.collisions.last() else {
                self.stats.log(node.cost);
                return Ok(Solution { paths: node.paths });
            };

            let constraints = match splitting {
                Splitting::Standard => standard_splitting(collision),
                Splitting::Disjoint => disjoint_splitting(collision, &mut rng),
            };

            for constraint in constraints {
                if let Some(child) = self.expand(&node, constraint, generation) {
                    generation += 1;
                    let fp = fingerprint(&child);
                    if seen.insert(fp) {
                        open.push(HeapEntry {
                            key: NodeKey {
                                cost: child.cost,
                                collisions: child.collisions.len(),
                                generation: child.generation,
                            },
                            node: child,
                        });
                        self.stats.high_level_generated += 1;
                    }
                } else {
                    generation += 1;
                }
            }
        }

        Err(CbsError::NoSolution)
    }
}

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::map::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    Vertex(Vertex),
    Edge(Vertex, Vertex),
}

impl Location {
    // No-op for a vertex location.
    pub fn reversed(self) -> Location {
        match self {
            Location::Vertex(v) => Location::Vertex(v),
            Location::Edge(u, v) => Location::Edge(v, u),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    pub agent: usize,
    pub loc: Location,
    pub time_step: usize,
    pub positive: bool,
}

impl Constraint {
    pub fn negative(agent: usize, loc: Location, time_step: usize) -> Self {
        Constraint {
            agent,
            loc,
            time_step,
            positive: false,
        }
    }

    pub fn positive(agent: usize, loc: Location, time_step: usize) -> Self {
        Constraint {
            agent,
            loc,
            time_step,
            positive: true,
        }
    }
}

pub type ConstraintSet = BTreeSet<Constraint>;

// Rebuilt from scratch every time the low-level planner runs.
pub struct ConstraintTable {
    positive: HashMap<usize, HashSet<Location>>,
    negative: HashMap<usize, HashSet<Location>>,
}

impl ConstraintTable {
    pub fn build(constraints: &ConstraintSet, agent: usize) -> Self {
        let mut positive: HashMap<usize, HashSet<Location>> = HashMap::new();
        let mut negative: HashMap<usize, HashSet<Location>> = HashMap::new();

        for c in constraints {
            if c.agent == agent {
                if c.positive {
                    positive.entry(c.time_step).or_default().insert(c.loc);
                } else {
                    negative.entry(c.time_step).or_default().insert(c.loc);
                }
                continue;
            }

            if !c.positive {
                continue;
            }
            let bucket = negative.entry(c.time_step).or_default();
            bucket.insert(c.loc);
            if let Location::Edge(u, v) = c.loc {
                bucket.insert(c.loc.reversed());
                bucket.insert(Location::Vertex(u));
                bucket.insert(Location::Vertex(v));
            }
        }

        ConstraintTable { positive, negative }
    }

    pub fn is_positively_constrained(&self, curr: Vertex, next: Vertex, t: usize) -> bool {
        self.positive
            .get(&t)
            .is_some_and(|locs| locs.contains(&Location::Vertex(next)) || locs.contains(&Location::Edge(curr, next)))
    }

    pub fn is_negatively_constrained(&self, curr: Vertex, next: Vertex, t: usize) -> bool {
        self.negative
            .get(&t)
            .is_some_and(|locs| locs.contains(&Location::Vertex(next)) || locs.contains(&Location::Edge(curr, next)))
    }

    pub fn negative_at(&self, t: usize) -> Option<&HashSet<Location>> {
        self.negative.get(&t)
    }

    pub fn negative_timesteps(&self) -> impl Iterator<Item = &usize> {
        self.negative.keys()
    }
}

use rand::Rng;

use crate::collision::Collision;
use crate::constraint::{Constraint, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splitting {
    Standard,
    Disjoint,
}

pub fn standard_splitting(collision: &Collision) -> [Constraint; 2] {
    match collision.conflict {
        Location::Vertex(_) => [
            Constraint::negative(collision.agent_1, collision.conflict, collision.time_step),
            Constraint::negative(collision.agent_2, collision.conflict, collision.time_step),
        ],
        Location::Edge(_, _) => [
            Constraint::negative(collision.agent_1, collision.conflict, collision.time_step),
            Constraint::negative(
                collision.agent_2,
                collision.conflict.reversed(),
                collision.time_step,
            ),
        ],
    }
}

pub fn disjoint_splitting(collision: &Collision, rng: &mut impl Rng) -> [Constraint; 2] {
    let agent = if rng.gen_bool(0.5) {
        collision.agent_1
    } else {
        collision.agent_2
    };

    let loc = if agent == collision.agent_1 {
        collision.conflict
    } else {
        collision.conflict.reversed()
    };

    [
        Constraint::positive(agent, loc, collision.time_step),
        Constraint::negative(agent, loc, collision.time_step),
    ]
}

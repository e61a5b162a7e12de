use crate::common::Path;
use crate::constraint::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub time_step: usize,
    pub conflict: Location,
    pub agent_1: usize,
    pub agent_2: usize,
}

pub fn first_collision(a1: usize, path1: &Path, a2: usize, path2: &Path) -> Option<Collision> {
    let max_t = path1.len().max(path2.len());

    for t in 0..max_t {
        let u = path1.loc_at(t);
        let v = path2.loc_at(t);
        if u == v {
            return Some(Collision {
                time_step: t,
                conflict: Location::Vertex(u),
                agent_1: a1,
                agent_2: a2,
            });
        }

        let u_next = path1.loc_at(t + 1);
        let v_next = path2.loc_at(t + 1);
        if u == v_next && u_next == v {
            return Some(Collision {
                time_step: t + 1,
                conflict: Location::Edge(u, u_next),
                agent_1: a1,
                agent_2: a2,
            });
        }
    }

    None
}

pub fn all_collisions<P: std::borrow::Borrow<Path>>(paths: &[P]) -> Vec<Collision> {
    let mut collisions = Vec::new();
    for i in 0..paths.len() {
        for j in (i + 1)..paths.len() {
            if let Some(c) = first_collision(i, paths[i].borrow(), j, paths[j].borrow()) {
                collisions.push(c);
            }
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_collision_at_earliest_time() {
        let p1 = Path(vec![(0, 0), (0, 1), (0, 2)]);
        let p2 = Path(vec![(0, 2), (0, 1), (0, 0)]);
        let c = first_collision(0, &p1, 1, &p2).unwrap();
        assert_eq!(c.time_step, 1);
        assert_eq!(c.conflict, Location::Vertex((0, 1)));
    }

    #[test]
    fn edge_swap_collision() {
        let p1 = Path(vec![(0, 0), (0, 1)]);
        let p2 = Path(vec![(0, 1), (0, 0)]);
        let c = first_collision(0, &p1, 1, &p2).unwrap();
        assert_eq!(c.time_step, 1);
        assert_eq!(c.conflict, Location::Edge((0, 0), (0, 1)));
    }

    #[test]
    fn waiting_at_goal_still_conflicts() {
        // agent 0 reaches (0,0) at t=0 and stays; agent 1 arrives at t=2.
        let p1 = Path(vec![(0, 0)]);
        let p2 = Path(vec![(0, 2), (0, 1), (0, 0)]);
        let c = first_collision(0, &p1, 1, &p2).unwrap();
        assert_eq!(c.time_step, 2);
        assert_eq!(c.conflict, Location::Vertex((0, 0)));
    }

    #[test]
    fn disjoint_paths_have_no_collision() {
        let p1 = Path(vec![(0, 0), (0, 1)]);
        let p2 = Path(vec![(5, 5), (5, 6)]);
        assert!(first_collision(0, &p1, 1, &p2).is_none());
    }

    #[test]
    fn all_collisions_covers_every_pair() {
        let paths = vec![
            Path(vec![(0, 0)]),
            Path(vec![(0, 0)]),
            Path(vec![(9, 9)]),
        ];
        let collisions = all_collisions(&paths);
        assert_eq!(collisions.len(), 1);
        assert_eq!((collisions[0].agent_1, collisions[0].agent_2), (0, 1));
    }
}

use cbs_mapf::{Agent, Cbs, CbsError, GridMap, Splitting};

fn agents(pairs: &[((usize, usize), (usize, usize))]) -> Vec<Agent> {
    pairs
        .iter()
        .enumerate()
        .map(|(id, &(start, goal))| Agent { id, start, goal })
        .collect()
}

#[test]
fn head_on_swap_uses_the_passing_bay() {
    // 2x3 grid: row 1 gives one agent somewhere to step aside into while
    // the other passes through the corridor on row 0.
    let map = GridMap::new(vec![vec![false; 3]; 2]);
    let a = agents(&[((0, 0), (0, 2)), ((0, 2), (0, 0))]);
    let mut cbs = Cbs::new(map, a).unwrap();
    let solution = cbs.solve(Splitting::Standard, 0).unwrap();
    assert_eq!(solution.cost(), 5);
}

#[test]
fn independent_goals_never_interact() {
    let map = GridMap::new(vec![vec![false; 8]; 8]);
    let a = agents(&[((0, 0), (7, 7)), ((7, 0), (0, 7))]);
    let mut cbs = Cbs::new(map, a).unwrap();
    let solution = cbs.solve(Splitting::Standard, 0).unwrap();
    assert_eq!(solution.cost(), 28);
}

#[test]
fn goal_blocking_forces_the_other_agent_to_wait() {
    // 1x4 corridor: agent 1 starts right next to agent 0's goal and must
    // clear out before agent 0 can settle there.
    let map = GridMap::new(vec![vec![false; 4]]);
    let a = agents(&[((0, 0), (0, 2)), ((0, 1), (0, 3))]);
    let mut cbs = Cbs::new(map, a).unwrap();
    let solution = cbs.solve(Splitting::Standard, 0).unwrap();
    assert_eq!(solution.cost(), 5);
}

#[test]
fn disjoint_splitting_matches_standard_splitting_on_cost() {
    let map = GridMap::new(vec![vec![false; 3]; 2]);
    let a = agents(&[((0, 0), (0, 2)), ((0, 2), (0, 0))]);
    let mut standard = Cbs::new(map.clone(), a.clone()).unwrap();
    let mut disjoint = Cbs::new(map, a).unwrap();

    let standard_cost = standard.solve(Splitting::Standard, 0).unwrap().cost();
    let disjoint_cost = disjoint.solve(Splitting::Disjoint, 7).unwrap().cost();
    assert_eq!(standard_cost, disjoint_cost);
}

#[test]
fn a_walled_off_goal_is_rejected_before_the_search_runs() {
    let mut grid = vec![vec![false; 3]; 3];
    for row in grid.iter_mut() {
        row[1] = true;
    }
    let map = GridMap::new(grid);
    let a = vec![Agent {
        id: 0,
        start: (0, 0),
        goal: (0, 2),
    }];
    let mut cbs = Cbs::new(map, a).unwrap();
    assert!(matches!(
        cbs.solve(Splitting::Standard, 0),
        Err(CbsError::NoRootSolution(0))
    ));
}

#[test]
fn solver_is_reproducible_under_a_fixed_seed() {
    let map = GridMap::new(vec![vec![false; 3]; 2]);
    let a = agents(&[((0, 0), (0, 2)), ((0, 2), (0, 0))]);
    let mut first = Cbs::new(map.clone(), a.clone()).unwrap();
    let mut second = Cbs::new(map, a).unwrap();

    let one = first.solve(Splitting::Disjoint, 11).unwrap();
    let two = second.solve(Splitting::Disjoint, 11).unwrap();
    assert_eq!(one.cost(), two.cost());
}

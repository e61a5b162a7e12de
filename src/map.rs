use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use crate::error::CbsError;

// (x, y), x the row index and y the column index.
pub type Vertex = (usize, usize);

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone)]
pub struct GridMap {
    height: usize,
    width: usize,
    obstacles: Vec<bool>,
    heuristics: RefCell<HashMap<Vertex, Arc<HashMap<Vertex, usize>>>>,
}

impl GridMap {
    pub fn new(grid: Vec<Vec<bool>>) -> Self {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());
        let mut obstacles = Vec::with_capacity(height * width);
        for row in grid {
            assert_eq!(row.len(), width, "ragged grid row");
            obstacles.extend(row);
        }
        GridMap {
            height,
            width,
            obstacles,
            heuristics: RefCell::new(HashMap::new()),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, v: Vertex) -> usize {
        v.0 * self.width + v.1
    }

    pub fn in_bounds(&self, v: Vertex) -> bool {
        v.0 < self.height && v.1 < self.width
    }

    pub fn is_free(&self, v: Vertex) -> bool {
        self.in_bounds(v) && !self.obstacles[self.index(v)]
    }

    // Does not include v itself; the low-level planner appends the wait self-loop.
    pub fn neighbours(&self, v: Vertex) -> Vec<Vertex> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = v.0 as isize + dx;
                let ny = v.1 as isize + dy;
                if nx < 0 || ny < 0 {
                    return None;
                }
                let next = (nx as usize, ny as usize);
                self.is_free(next).then_some(next)
            })
            .collect()
    }

    // Dijkstra distances from every free reachable cell to goal, memoized.
    pub fn heuristic(&self, goal: Vertex) -> Arc<HashMap<Vertex, usize>> {
        if let Some(table) = self.heuristics.borrow().get(&goal) {
            return Arc::clone(table);
        }

        let mut dist: HashMap<Vertex, usize> = HashMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(goal, 0);
        heap.push(Reverse((0usize, goal)));

        while let Some(Reverse((cost, v))) = heap.pop() {
            if dist.get(&v).is_some_and(|&best| best < cost) {
                continue;
            }
            for next in self.neighbours(v) {
                let next_cost = cost + 1;
                if next_cost < *dist.get(&next).unwrap_or(&usize::MAX) {
                    dist.insert(next, next_cost);
                    heap.push(Reverse((next_cost, next)));
                }
            }
        }

        let table = Arc::new(dist);
        self.heuristics
            .borrow_mut()
            .insert(goal, Arc::clone(&table));
        table
    }

    // Ignores time and constraints; used by external collaborators only, never
    // by the core search.
    pub fn shortest_path(&self, start: Vertex, goal: Vertex) -> Result<(Vec<Vertex>, usize), CbsError> {
        if !self.is_free(start) {
            return Err(CbsError::InvalidEndpoint(start));
        }
        if !self.is_free(goal) {
            return Err(CbsError::InvalidEndpoint(goal));
        }

        let heuristic = self.heuristic(goal);
        let Some(&cost) = heuristic.get(&start) else {
            return Err(CbsError::NoPathExists(start, goal));
        };

        // Walk downhill in the heuristic field; ties broken by the first
        // neighbour enumerated, which is deterministic given `DIRECTIONS`.
        let mut path = vec![start];
        let mut current = start;
        while current != goal {
            let current_cost = heuristic[&current];
            let next = self
                .neighbours(current)
                .into_iter()
                .find(|n| heuristic.get(n) == Some(&(current_cost - 1)))
                .expect("heuristic field has no discontinuities on a connected component");
            path.push(next);
            current = next;
        }

        Ok((path, cost))
    }
}

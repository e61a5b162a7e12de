use std::rc::Rc;

use crate::map::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Agent {
    pub id: usize,
    pub start: Vertex,
    pub goal: Vertex,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Path(pub Vec<Vertex>);

impl Path {
    // path[t] while t is in range, otherwise the final vertex (wait at goal).
    pub fn loc_at(&self, t: usize) -> Vertex {
        *self.0.get(t).unwrap_or_else(|| self.0.last().expect("path is non-empty"))
    }

    pub fn cost(&self) -> usize {
        self.0.len() - 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Solution {
    pub paths: Vec<Rc<Path>>,
}

impl Solution {
    pub fn cost(&self) -> usize {
        self.paths.iter().map(|p| p.cost()).sum()
    }
}

use std::collections::HashMap;
use std::rc::Rc;

use crate::common::Path;
use crate::constraint::ConstraintSet;

#[derive(Default)]
pub struct LowLevelCache {
    entries: HashMap<(usize, ConstraintSet), Rc<Path>>,
}

impl LowLevelCache {
    pub fn get(&self, agent: usize, constraints: &ConstraintSet) -> Option<Rc<Path>> {
        self.entries
            .get(&(agent, constraints.clone()))
            .map(Rc::clone)
    }

    pub fn insert(&mut self, agent: usize, constraints: ConstraintSet, path: Rc<Path>) {
        self.entries.insert((agent, constraints), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Path;

    #[test]
    fn caches_by_agent_and_constraint_set() {
        let mut cache = LowLevelCache::default();
        let constraints = ConstraintSet::new();
        let path = Rc::new(Path(vec![(0, 0), (0, 1)]));
        cache.insert(0, constraints.clone(), Rc::clone(&path));

        assert!(cache.get(0, &constraints).is_some());
        assert!(cache.get(1, &constraints).is_none());
    }
}

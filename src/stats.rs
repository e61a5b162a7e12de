#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub high_level_generated: usize,
    pub high_level_expanded: usize,
    pub low_level_expanded: usize,
}

impl Stats {
    pub fn log(&self, cost: usize) {
        tracing::info!(
            cost,
            high_level_generated = self.high_level_generated,
            high_level_expanded = self.high_level_expanded,
            low_level_expanded = self.low_level_expanded,
            "solve finished"
        );
    }
}

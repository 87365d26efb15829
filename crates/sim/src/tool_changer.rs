use factory_core::{FactoryError, Result};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

/// Tool changes are only considered on every tenth cycle.
pub const CHANGE_INTERVAL: u64 = 10;

/// Automatic tool changer mounted on the CNC mill.
///
/// The only machine component that carries state between cycles.
#[derive(Debug, Clone)]
pub struct ToolChanger {
    tools: Vec<i64>,
    current: i64,
}

impl ToolChanger {
    /// Starts with the first tool mounted. An empty tool list is rejected.
    pub fn new(tools: Vec<i64>) -> Result<Self> {
        let current = *tools
            .first()
            .ok_or_else(|| FactoryError::Config("tool changer needs at least one tool".into()))?;
        Ok(Self { tools, current })
    }

    pub fn current_tool(&self) -> i64 {
        self.current
    }

    pub fn tools(&self) -> &[i64] {
        &self.tools
    }

    /// Pick a new tool on cycles divisible by [`CHANGE_INTERVAL`], otherwise
    /// keep the mounted one. Returns the tool in use for this cycle.
    pub fn check_and_change_tool(&mut self, cycle_id: u64, rng: &mut dyn RngCore) -> i64 {
        if cycle_id % CHANGE_INTERVAL == 0 {
            let previous = self.current;
            self.current = self.tools.choose(rng).copied().unwrap_or(previous);
            debug!(cycle_id, previous, current = self.current, "tool change check");
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_tool_list_is_rejected() {
        assert!(matches!(
            ToolChanger::new(Vec::new()),
            Err(FactoryError::Config(_))
        ));
    }

    #[test]
    fn starts_with_first_tool() {
        let changer = ToolChanger::new(vec![4, 2, 9]).unwrap();
        assert_eq!(changer.current_tool(), 4);
    }

    #[test]
    fn unchanged_between_change_points() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut changer = ToolChanger::new(vec![1, 2, 3, 4, 5]).unwrap();
        for cycle_id in 1..=200u64 {
            let before = changer.current_tool();
            let tool = changer.check_and_change_tool(cycle_id, &mut rng);
            if cycle_id % CHANGE_INTERVAL != 0 {
                assert_eq!(tool, before, "tool changed on cycle {cycle_id}");
            }
            assert!(changer.tools().contains(&tool));
        }
    }

    #[test]
    fn change_points_eventually_pick_another_tool() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut changer = ToolChanger::new(vec![1, 2, 3, 4, 5]).unwrap();
        let picks: Vec<i64> = (1..=50u64)
            .map(|i| changer.check_and_change_tool(i * CHANGE_INTERVAL, &mut rng))
            .collect();
        assert!(picks.iter().any(|&t| t != 1));
    }

    #[test]
    fn single_tool_never_changes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut changer = ToolChanger::new(vec![7]).unwrap();
        for cycle_id in 1..=30 {
            assert_eq!(changer.check_and_change_tool(cycle_id, &mut rng), 7);
        }
    }
}

use serde::{Deserialize, Serialize};

/// Attempt and retry bounds for the generation pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorLimits {
    /// Random draws when picking start and goal before using the fixed corners.
    pub endpoint_attempts: u32,
    /// Randomized route searches before using the L-shaped fallback.
    pub route_attempts: u32,
    /// Cell expansions allowed in a single route search.
    pub route_expansions: u32,
    /// Scrambles tried from a fresh solved board.
    pub scramble_attempts: u32,
    /// Extra swaps applied to repair a scramble.
    pub corrective_swaps: u32,
    /// Searches for a free cell chain when laying a decoy segment.
    pub decoy_segment_attempts: u32,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            endpoint_attempts: 100,
            route_attempts: 40,
            route_expansions: 2_000,
            scramble_attempts: 50,
            corrective_swaps: 5,
            decoy_segment_attempts: 20,
        }
    }
}

/// Bounds of the swap-distance search.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    pub max_states: usize,
    pub max_depth_to_goal: u32,
    pub max_depth_all_gems: u32,
    /// Reported when the search runs out of states or depth.
    pub fallback_swaps: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_states: 1_000,
            max_depth_to_goal: 8,
            max_depth_all_gems: 15,
            fallback_swaps: 5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Undo snapshots kept; the oldest is dropped past this.
    pub history_capacity: usize,
    pub search: SearchLimits,
    pub generator: GeneratorLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: 256,
            search: SearchLimits::default(),
            generator: GeneratorLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"history_capacity": 8, "search": {"max_states": 50}}"#)
                .unwrap();

        assert_eq!(config.history_capacity, 8);
        assert_eq!(config.search.max_states, 50);
        assert_eq!(config.search.fallback_swaps, 5);
        assert_eq!(config.generator, GeneratorLimits::default());
    }
}

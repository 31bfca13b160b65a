//! Engine configuration model and defaults.

/// Root configuration consumed by [`crate::manager::Manager::with_config`].
///
/// The engine never reads this from disk itself (persisted state is external
/// per the core's scope); an embedding application decodes its own config
/// file into this struct and hands it to the engine.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EngineConfig {
    /// Maximum number of distinct song ids tracked by the popularity index.
    pub heap_capacity: usize,
    #[serde(default = "default_recommendation_limit")]
    /// Fallback limit used by callers of `recommendations` that don't pass one.
    pub default_recommendation_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            heap_capacity: default_heap_capacity(),
            default_recommendation_limit: default_recommendation_limit(),
        }
    }
}

fn default_heap_capacity() -> usize {
    256
}

fn default_recommendation_limit() -> usize {
    10
}

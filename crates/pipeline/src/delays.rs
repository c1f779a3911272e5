//! Simulated build stage durations.

use std::time::Duration;

const DEFAULT_ANALYSIS_MS: u64 = 2_000;
const DEFAULT_CODE_GENERATION_MS: u64 = 3_000;
const DEFAULT_COMPILATION_MS: u64 = 4_000;

/// Pauses inserted between generation stages.
///
/// The analysis pause only applies to URL conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationDelays {
    pub analysis: Duration,
    pub code_generation: Duration,
    pub compilation: Duration,
}

impl GenerationDelays {
    /// All stages take the same `stage` duration.
    pub fn uniform(stage: Duration) -> Self {
        Self {
            analysis: stage,
            code_generation: stage,
            compilation: stage,
        }
    }

    /// No pauses at all.
    pub fn zero() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// Load from environment variables, falling back to the defaults.
    ///
    /// | Variable                       | Default |
    /// |--------------------------------|---------|
    /// | `GENERATION_ANALYSIS_DELAY_MS` | `2000`  |
    /// | `GENERATION_CODEGEN_DELAY_MS`  | `3000`  |
    /// | `GENERATION_COMPILE_DELAY_MS`  | `4000`  |
    pub fn from_env() -> Self {
        Self {
            analysis: env_millis("GENERATION_ANALYSIS_DELAY_MS", DEFAULT_ANALYSIS_MS),
            code_generation: env_millis("GENERATION_CODEGEN_DELAY_MS", DEFAULT_CODE_GENERATION_MS),
            compilation: env_millis("GENERATION_COMPILE_DELAY_MS", DEFAULT_COMPILATION_MS),
        }
    }

    /// Total simulated time for a job, with or without the analysis stage.
    pub fn total(&self, with_analysis: bool) -> Duration {
        let build = self.code_generation + self.compilation;
        if with_analysis {
            build + self.analysis
        } else {
            build
        }
    }
}

impl Default for GenerationDelays {
    fn default() -> Self {
        Self {
            analysis: Duration::from_millis(DEFAULT_ANALYSIS_MS),
            code_generation: Duration::from_millis(DEFAULT_CODE_GENERATION_MS),
            compilation: Duration::from_millis(DEFAULT_COMPILATION_MS),
        }
    }
}

fn env_millis(name: &str, default: u64) -> Duration {
    let ms = std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}

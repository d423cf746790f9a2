//! Region computation configuration, validation, and error types.
//!
//! [`RegionConfig`] is constructed with [`RegionConfig::builder`], which
//! validates every knob up front. The [`Default`] configuration is the
//! documented baseline and always valid.

use std::error::Error;
use std::fmt;

// ── SampleTarget ───────────────────────────────────────────────────

/// How many cells to resolve exactly before the propagation scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleTarget {
    /// A fixed number of samples.
    Count(usize),
    /// A fraction of the grid's cell count, rounded up, at least 1.
    Fraction(f64),
}

impl SampleTarget {
    /// Resolve to a concrete sample count for a grid of `cell_count` cells.
    pub fn resolve(self, cell_count: usize) -> usize {
        match self {
            Self::Count(n) => n,
            Self::Fraction(f) => ((cell_count as f64 * f).ceil() as usize).max(1),
        }
    }
}

impl Default for SampleTarget {
    fn default() -> Self {
        Self::Fraction(0.05)
    }
}

// ── ConsensusPolicy ────────────────────────────────────────────────

/// When a cell may adopt its resolved neighbours' id without an exact query.
///
/// Voters are the resolved, walkable neighbours of the cell. A voter
/// resolved to `0` (no reachable candidate) casts no vote but still counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsensusPolicy {
    /// Every voter names the same id.
    #[default]
    Unanimous,
    /// The leading id holds more than half of the voters.
    StrictMajority,
}

impl ConsensusPolicy {
    /// Whether `votes` for the leading id out of `voters` is enough.
    pub fn accepts(self, votes: usize, voters: usize) -> bool {
        if votes == 0 {
            return false;
        }
        match self {
            Self::Unanimous => votes == voters,
            Self::StrictMajority => votes * 2 > voters,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`RegionConfigBuilder::build`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `SampleTarget::Fraction` is NaN, infinite, or outside `(0, 1]`.
    InvalidSampleFraction {
        /// The invalid value.
        value: f64,
    },
    /// `near_seed_fraction` is NaN or outside `[0, 1]`.
    InvalidNearSeedFraction {
        /// The invalid value.
        value: f64,
    },
    /// `max_jitter` is zero; near-seed samples would all land on seeds.
    ZeroJitter,
    /// `shortlist_k` is zero; exact resolution would have no candidates.
    ZeroShortlist,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleFraction { value } => {
                write!(f, "sample fraction must be in (0, 1], got {value}")
            }
            Self::InvalidNearSeedFraction { value } => {
                write!(f, "near_seed_fraction must be in [0, 1], got {value}")
            }
            Self::ZeroJitter => write!(f, "max_jitter must be at least 1"),
            Self::ZeroShortlist => write!(f, "shortlist_k must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── RegionConfig ───────────────────────────────────────────────────

/// Tuning knobs for one region computation.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionConfig {
    samples: SampleTarget,
    near_seed_fraction: f64,
    max_jitter: u32,
    shortlist_k: usize,
    consensus: ConsensusPolicy,
    exhaustive_fallback: bool,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            samples: SampleTarget::default(),
            near_seed_fraction: 0.5,
            max_jitter: 3,
            shortlist_k: crate::shortlist::DEFAULT_SHORTLIST_K,
            consensus: ConsensusPolicy::Unanimous,
            exhaustive_fallback: true,
        }
    }
}

impl RegionConfig {
    /// Start from the default configuration.
    pub fn builder() -> RegionConfigBuilder {
        RegionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Sample budget.
    pub fn samples(&self) -> SampleTarget {
        self.samples
    }

    /// Share of the sample budget spent near seeds. Default: 0.5.
    pub fn near_seed_fraction(&self) -> f64 {
        self.near_seed_fraction
    }

    /// Largest per-axis offset of a near-seed sample. Default: 3.
    pub fn max_jitter(&self) -> u32 {
        self.max_jitter
    }

    /// Straight-line nearest seeds per exact query. Default: 5.
    pub fn shortlist_k(&self) -> usize {
        self.shortlist_k
    }

    /// Propagation threshold. Default: unanimous.
    pub fn consensus(&self) -> ConsensusPolicy {
        self.consensus
    }

    /// Whether exact resolution widens to every seed in the cell's
    /// component when no shortlisted seed is reachable. Default: `true`.
    pub fn exhaustive_fallback(&self) -> bool {
        self.exhaustive_fallback
    }

    /// Concrete `(near_seed, uniform)` sample targets for a grid.
    ///
    /// The total never exceeds the number of non-seed cells, whatever the
    /// configured budget.
    pub fn sample_split(&self, cell_count: usize, seed_count: usize) -> (usize, usize) {
        let total = self
            .samples
            .resolve(cell_count)
            .min(cell_count.saturating_sub(seed_count));
        let near = ((total as f64) * self.near_seed_fraction).round() as usize;
        let near = near.min(total);
        (near, total - near)
    }
}

/// Builder for [`RegionConfig`].
pub struct RegionConfigBuilder {
    config: RegionConfig,
}

impl RegionConfigBuilder {
    /// Set the sample budget.
    pub fn samples(mut self, samples: SampleTarget) -> Self {
        self.config.samples = samples;
        self
    }

    /// Set the share of samples drawn near seeds.
    pub fn near_seed_fraction(mut self, fraction: f64) -> Self {
        self.config.near_seed_fraction = fraction;
        self
    }

    /// Set the largest per-axis jitter for near-seed samples.
    pub fn max_jitter(mut self, jitter: u32) -> Self {
        self.config.max_jitter = jitter;
        self
    }

    /// Set how many straight-line nearest seeds each exact query considers.
    pub fn shortlist_k(mut self, k: usize) -> Self {
        self.config.shortlist_k = k;
        self
    }

    /// Set the propagation threshold.
    pub fn consensus(mut self, consensus: ConsensusPolicy) -> Self {
        self.config.consensus = consensus;
        self
    }

    /// Enable or disable the component-wide fallback.
    pub fn exhaustive_fallback(mut self, enabled: bool) -> Self {
        self.config.exhaustive_fallback = enabled;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the sample fraction is not finite or outside `(0, 1]`
    /// - `near_seed_fraction` is not finite or outside `[0, 1]`
    /// - `max_jitter` or `shortlist_k` is zero
    pub fn build(self) -> Result<RegionConfig, ConfigError> {
        let c = self.config;
        if let SampleTarget::Fraction(value) = c.samples {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::InvalidSampleFraction { value });
            }
        }
        if !c.near_seed_fraction.is_finite() || !(0.0..=1.0).contains(&c.near_seed_fraction) {
            return Err(ConfigError::InvalidNearSeedFraction {
                value: c.near_seed_fraction,
            });
        }
        if c.max_jitter == 0 {
            return Err(ConfigError::ZeroJitter);
        }
        if c.shortlist_k == 0 {
            return Err(ConfigError::ZeroShortlist);
        }
        Ok(c)
    }
}

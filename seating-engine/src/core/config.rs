/// Planner configuration - every tunable of a plan session
///
/// # Environment variables
///
/// All values can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SEATING_GRID_STEP | 20 | Snap grid step (hall units) |
/// | SEATING_SNAP_TO_GRID | false | Snap table moves by default |
/// | SEATING_DUPLICATE_OFFSET | 40 | Offset of a duplicated table |
/// | SEATING_HISTORY_LIMIT | 200 | History entries kept per mode |
/// | SEATING_LOCK_TTL_MS | 60000 | Lock lifetime without renewal |
/// | SEATING_COLLABORATION | false | Enforce per-table locks |
/// | SEATING_AUTOSAVE_DEBOUNCE_MS | 800 | Quiet period before saving |
/// | SEATING_RETRY_BASE_MS | 1000 | First save retry delay |
/// | SEATING_RETRY_MAX_MS | 30000 | Retry delay cap |
/// | SEATING_MIN_SCALE | 0.2 | Viewport zoom floor |
/// | SEATING_MAX_SCALE | 4.0 | Viewport zoom ceiling |
/// | SEATING_FIT_PADDING | 40 | Fit-to-content padding (px) |
/// | SEATING_MIN_TABLE_SPACING | 140 | Spacing below which tables conflict |
/// | SEATING_TARGET_TABLE_SPACING | 220 | Spacing proposed by fixes |
/// | SEATING_RECOMMENDATION_LIMIT | 3 | Candidates per guest |
/// | SEATING_WEIGHT_AFFINITY | 10 | Scoring weight |
/// | SEATING_WEIGHT_VIP_PROXIMITY | 25 | Scoring weight |
/// | SEATING_WEIGHT_CAPACITY_FIT | 5 | Scoring weight |
/// | SEATING_WEIGHT_SIDE_CONFLICT | 15 | Scoring weight |
///
/// # Example
///
/// ```ignore
/// SEATING_COLLABORATION=true SEATING_LOCK_TTL_MS=30000 cargo test
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Snap grid step; `moveTable` rounds to multiples of it when snapping
    pub grid_step: f64,
    /// Snap when a move command does not say otherwise
    pub snap_to_grid: bool,
    /// `duplicateTable` places the clone this far right and down
    pub duplicate_offset: f64,
    /// History entries per mode; oldest evicted beyond this
    pub history_limit: usize,
    pub lock_ttl_ms: i64,
    /// Lock gate on table mutations
    pub collaboration_enabled: bool,
    pub autosave_debounce_ms: u64,
    pub retry_base_ms: u64,
    pub retry_max_ms: u64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Pixel padding used by fit-to-content
    pub fit_padding: f64,
    pub min_table_spacing: f64,
    pub target_table_spacing: f64,
    /// Top-N recommendations per guest
    pub recommendation_limit: usize,
    pub scoring: ScoringWeights,
}

/// Recommendation scoring weights
///
/// Each factor is normalised to `[0, 1]` before weighting, so the weight is
/// the maximum contribution of that factor. All weights must be ≥ 0 for the
/// score to stay monotonic in each factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Shared group / tags with guests already at the table
    pub affinity: f64,
    /// Closeness to the stage for VIP guests
    pub vip_proximity: f64,
    /// Adequate but not excessive free places
    pub capacity_fit: f64,
    /// Penalty when the opposing side dominates the table
    pub side_conflict: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            affinity: 10.0,
            vip_proximity: 25.0,
            capacity_fit: 5.0,
            side_conflict: 15.0,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PlannerConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let d = Self::defaults();
        let scoring = ScoringWeights {
            affinity: env_or("SEATING_WEIGHT_AFFINITY", d.scoring.affinity),
            vip_proximity: env_or("SEATING_WEIGHT_VIP_PROXIMITY", d.scoring.vip_proximity),
            capacity_fit: env_or("SEATING_WEIGHT_CAPACITY_FIT", d.scoring.capacity_fit),
            side_conflict: env_or("SEATING_WEIGHT_SIDE_CONFLICT", d.scoring.side_conflict),
        };
        Self {
            grid_step: env_or("SEATING_GRID_STEP", d.grid_step),
            snap_to_grid: env_or("SEATING_SNAP_TO_GRID", d.snap_to_grid),
            duplicate_offset: env_or("SEATING_DUPLICATE_OFFSET", d.duplicate_offset),
            history_limit: env_or("SEATING_HISTORY_LIMIT", d.history_limit),
            lock_ttl_ms: env_or("SEATING_LOCK_TTL_MS", d.lock_ttl_ms),
            collaboration_enabled: env_or("SEATING_COLLABORATION", d.collaboration_enabled),
            autosave_debounce_ms: env_or("SEATING_AUTOSAVE_DEBOUNCE_MS", d.autosave_debounce_ms),
            retry_base_ms: env_or("SEATING_RETRY_BASE_MS", d.retry_base_ms),
            retry_max_ms: env_or("SEATING_RETRY_MAX_MS", d.retry_max_ms),
            min_scale: env_or("SEATING_MIN_SCALE", d.min_scale),
            max_scale: env_or("SEATING_MAX_SCALE", d.max_scale),
            fit_padding: env_or("SEATING_FIT_PADDING", d.fit_padding),
            min_table_spacing: env_or("SEATING_MIN_TABLE_SPACING", d.min_table_spacing),
            target_table_spacing: env_or("SEATING_TARGET_TABLE_SPACING", d.target_table_spacing),
            recommendation_limit: env_or("SEATING_RECOMMENDATION_LIMIT", d.recommendation_limit),
            scoring,
        }
        .sanitized()
    }

    /// Built-in defaults, ignoring the environment
    pub fn defaults() -> Self {
        Self {
            grid_step: 20.0,
            snap_to_grid: false,
            duplicate_offset: 40.0,
            history_limit: 200,
            lock_ttl_ms: 60_000,
            collaboration_enabled: false,
            autosave_debounce_ms: 800,
            retry_base_ms: 1_000,
            retry_max_ms: 30_000,
            min_scale: 0.2,
            max_scale: 4.0,
            fit_padding: 40.0,
            min_table_spacing: 140.0,
            target_table_spacing: 220.0,
            recommendation_limit: 3,
            scoring: ScoringWeights::default(),
        }
    }

    /// Defaults with the lock gate switched on (用于协作测试)
    pub fn collaborative() -> Self {
        Self {
            collaboration_enabled: true,
            ..Self::defaults()
        }
    }

    /// Repair values that would break invariants (non-positive scales, zero caps)
    fn sanitized(mut self) -> Self {
        let d = Self::defaults();
        if !(self.min_scale > 0.0) {
            self.min_scale = d.min_scale;
        }
        if !(self.max_scale >= self.min_scale) {
            self.max_scale = self.min_scale.max(d.max_scale);
        }
        if self.history_limit == 0 {
            self.history_limit = 1;
        }
        if self.recommendation_limit == 0 {
            self.recommendation_limit = d.recommendation_limit;
        }
        if self.lock_ttl_ms <= 0 {
            self.lock_ttl_ms = d.lock_ttl_ms;
        }
        for w in [
            &mut self.scoring.affinity,
            &mut self.scoring.vip_proximity,
            &mut self.scoring.capacity_fit,
            &mut self.scoring.side_conflict,
        ] {
            if !(*w >= 0.0) {
                *w = 0.0;
            }
        }
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = PlannerConfig::defaults();
        assert_eq!(c.history_limit, 200);
        assert_eq!(c.lock_ttl_ms, 60_000);
        assert_eq!(c.autosave_debounce_ms, 800);
        assert_eq!(c.recommendation_limit, 3);
        assert_eq!(c.scoring.vip_proximity, 25.0);
        assert!(!c.collaboration_enabled);
        assert!(PlannerConfig::collaborative().collaboration_enabled);
    }

    #[test]
    fn sanitize_repairs_broken_values() {
        let mut c = PlannerConfig::defaults();
        c.min_scale = -1.0;
        c.max_scale = f64::NAN;
        c.history_limit = 0;
        c.scoring.affinity = -3.0;
        let c = c.sanitized();
        assert_eq!(c.min_scale, 0.2);
        assert_eq!(c.max_scale, 4.0);
        assert_eq!(c.history_limit, 1);
        assert_eq!(c.scoring.affinity, 0.0);
    }
}

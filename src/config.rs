use crate::error::ConfigError;

/// Smallest number of slots a table ever allocates.
pub const MIN_CAPACITY: usize = 8;

/// Load factor used when none is configured.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.45;

/// Construction parameters for a [`ProbingTable`](crate::ProbingTable).
///
/// # Examples
///
/// ```rust
/// use quad_hash::TableConfig;
///
/// let config = TableConfig::default()
///     .with_initial_capacity(10)
///     .with_load_factor(0.5);
/// assert_eq!(config.effective_capacity(), Ok(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested number of slots. Rounded up to a power of two, minimum 8.
    pub initial_capacity: usize,
    /// Ratio of used buckets to capacity at which the table grows.
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: MIN_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Sets the requested initial capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor.
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that the configuration describes a constructible table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.effective_capacity()?;
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::LoadFactor(self.load_factor));
        }
        Ok(())
    }

    /// The slot count a table built from this configuration starts with.
    pub fn effective_capacity(&self) -> Result<usize, ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::Capacity(self.initial_capacity));
        }
        self.initial_capacity
            .checked_next_power_of_two()
            .map(|capacity| capacity.max(MIN_CAPACITY))
            .ok_or(ConfigError::Capacity(self.initial_capacity))
    }
}

/// Number of used buckets that triggers growth for a given capacity.
#[inline(always)]
pub(crate) fn threshold_for(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.load_factor, 0.45);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.effective_capacity(), Ok(8));
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        let cases = [(1, 8), (3, 8), (8, 8), (9, 16), (10, 16), (16, 16), (100, 128)];
        for (requested, expected) in cases {
            let config = TableConfig::default().with_initial_capacity(requested);
            assert_eq!(config.effective_capacity(), Ok(expected), "{requested}");
        }
    }

    #[test]
    fn rejects_zero_and_overflowing_capacity() {
        let config = TableConfig::default().with_initial_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::Capacity(0)));

        let config = TableConfig::default().with_initial_capacity(usize::MAX);
        assert_eq!(config.validate(), Err(ConfigError::Capacity(usize::MAX)));
    }

    #[test]
    fn rejects_bad_load_factors() {
        for load_factor in [0.0, -0.45, f64::INFINITY, f64::NEG_INFINITY] {
            let config = TableConfig::default().with_load_factor(load_factor);
            assert_eq!(config.validate(), Err(ConfigError::LoadFactor(load_factor)));
        }

        let config = TableConfig::default().with_load_factor(f64::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::LoadFactor(lf)) if lf.is_nan()));
    }

    #[test]
    fn accepts_load_factors_above_one() {
        let config = TableConfig::default().with_load_factor(2.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn threshold_truncates() {
        assert_eq!(threshold_for(8, 0.45), 3);
        assert_eq!(threshold_for(16, 0.45), 7);
        assert_eq!(threshold_for(32, 0.45), 14);
        assert_eq!(threshold_for(8, 0.05), 0);
        assert_eq!(threshold_for(8, 1.0), 8);
    }
}

use std::time::Duration;

use crate::error::SweepError;

/// Port the Talos API daemon answers on while a node waits for
/// configuration.
pub const TALOS_API_PORT: u16 = 50000;

/// Concurrency budget used when the batch size is left at the sentinel.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Sentinel batch size meaning "use [`DEFAULT_BATCH_SIZE`]".
pub const BATCH_SIZE_DEFAULT: i64 = -1;

/// Knobs for one reachability sweep.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Service port every candidate is dialed on.
    pub service_port: u16,
    /// Upper bound for a single connection attempt.
    pub attempt_timeout: Duration,
    /// Concurrent attempts per batch, or [`BATCH_SIZE_DEFAULT`].
    pub batch_size: i64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            service_port: TALOS_API_PORT,
            attempt_timeout: Duration::from_secs(3),
            batch_size: BATCH_SIZE_DEFAULT,
        }
    }
}

impl ProbeConfig {
    /// Resolves the configured batch size into a usable budget.
    ///
    /// Zero and negative values other than the sentinel are rejected
    /// here, before the first connection attempt is made.
    pub fn batch_limit(&self) -> Result<usize, SweepError> {
        match self.batch_size {
            BATCH_SIZE_DEFAULT => Ok(DEFAULT_BATCH_SIZE),
            n if n > 0 => Ok(n as usize),
            n => Err(SweepError::InvalidBatchSize(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_resolves_to_default_budget() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.batch_limit(), Ok(DEFAULT_BATCH_SIZE));
    }

    #[test]
    fn positive_sizes_pass_through() {
        let cfg = ProbeConfig {
            batch_size: 7,
            ..ProbeConfig::default()
        };
        assert_eq!(cfg.batch_limit(), Ok(7));
    }

    #[test]
    fn zero_and_negative_sizes_are_rejected() {
        for bad in [0, -2, -100] {
            let cfg = ProbeConfig {
                batch_size: bad,
                ..ProbeConfig::default()
            };
            assert_eq!(cfg.batch_limit(), Err(SweepError::InvalidBatchSize(bad)));
        }
    }
}

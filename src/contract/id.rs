//! Contract ID synthesis.
//!
//! When the caller does not supply `deal.contractId`, one is synthesized. The
//! source is injectable so tests can pin the value; the default keeps the
//! platform's time-based `CNT-<millis>` shape. Wall-clock ids can collide
//! under very high concurrency, which is an accepted weakness of the scheme.
//! Callers wanting stable ids supply their own.

use chrono::Utc;

/// Source of synthesized contract ids.
pub trait ContractIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Default source: `CNT-` followed by the current Unix timestamp in
/// milliseconds.
pub struct WallClockIdSource;

impl ContractIdSource for WallClockIdSource {
    fn next_id(&self) -> String {
        format!("CNT-{}", Utc::now().timestamp_millis())
    }
}

/// Fixed source for deterministic tests.
pub struct FixedIdSource(pub String);

impl ContractIdSource for FixedIdSource {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_ids_are_timestamp_like() {
        let id = WallClockIdSource.next_id();
        let digits = id.strip_prefix("CNT-").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_wall_clock_ids_differ_over_time() {
        let first = WallClockIdSource.next_id();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = WallClockIdSource.next_id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fixed_source_repeats() {
        let source = FixedIdSource("CNT-TEST-1".to_string());
        assert_eq!(source.next_id(), "CNT-TEST-1");
        assert_eq!(source.next_id(), "CNT-TEST-1");
    }
}

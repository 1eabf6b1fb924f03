use std::time::{SystemTime, UNIX_EPOCH};

/// Derives a seed from the system clock.
///
/// Every random consumer in this crate takes an explicit seed, this is only meant for the
/// unseeded convenience constructors and for binaries that were not given one.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

//! Relative age labels for feed rows.

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Current wall-clock time in unix millis.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Coarse relative age of `epoch_ms` as seen at `now_ms`.
///
/// Under a minute (or in the future) reads "Just now", under an hour
/// reads "{m}m ago", anything older reads "{h}h ago". There is no day
/// granularity.
#[inline]
pub fn age_label(epoch_ms: i64, now_ms: i64) -> String {
    let elapsed = now_ms.saturating_sub(epoch_ms);

    if elapsed < MINUTE_MS {
        "Just now".to_string()
    } else if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else {
        format!("{}h ago", elapsed / HOUR_MS)
    }
}

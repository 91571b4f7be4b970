//! Message-bus payloads.
//!
//! The publisher itself lives outside this workspace; it only needs a string
//! body, a topic name and a client id, all built here.

use city_core::config::DEFAULT_CLIENT_ID_PREFIX;
use city_sim::SimMetrics;

use crate::OutputResult;

/// Compact JSON object with the four metrics fields, in declaration order.
pub fn metrics_payload(metrics: &SimMetrics) -> OutputResult<String> {
    Ok(serde_json::to_string(metrics)?)
}

/// `base/suffix`, ignoring leading slashes on `suffix`.  An empty suffix
/// yields `base` unchanged.
pub fn topic(base: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('/');
    if suffix.is_empty() {
        base.to_owned()
    } else {
        format!("{base}/{suffix}")
    }
}

/// Client id `prefix-suffix`, or just `prefix` without a suffix.
///
/// Surrounding whitespace is trimmed from `prefix`; a blank prefix falls
/// back to `simcity`.
pub fn client_id(prefix: &str, suffix: Option<&str>) -> String {
    let prefix = match prefix.trim() {
        "" => DEFAULT_CLIENT_ID_PREFIX,
        p => p,
    };
    match suffix {
        Some(s) if !s.is_empty() => format!("{prefix}-{s}"),
        _ => prefix.to_owned(),
    }
}

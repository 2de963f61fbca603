use std::sync::LazyLock;

use regex::Regex;

static ISO_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex"));

const ZERO: &str = "0:00";

/// Format an ISO-8601 `PT#H#M#S` duration as `H:MM:SS`, or `M:SS` under an hour.
///
/// Missing or malformed input renders as `0:00`.
pub fn parse_duration(iso8601: Option<&str>) -> String {
    iso8601
        .and_then(components)
        .map(|(h, m, s)| {
            if h > 0 {
                format!("{h}:{m:02}:{s:02}")
            } else {
                format!("{m}:{s:02}")
            }
        })
        .unwrap_or_else(|| ZERO.to_string())
}

fn components(input: &str) -> Option<(u64, u64, u64)> {
    let caps = ISO_DURATION.captures(input.trim())?;
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some((part(1)?, part(2)?, part(3)?))
}

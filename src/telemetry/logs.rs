//! Synthetic server log generator.

use super::{SyntheticRng, TelemetryError};

/// One log line per five minutes of window, floor of one.
const LINE_INTERVAL_MINUTES: i64 = 5;

/// Hard ceiling so absurd windows cannot balloon the output.
const MAX_LINES: i64 = 2880;

/// Fabricate a multi-line log excerpt for `server_id` covering the last
/// `window_minutes` minutes. Timestamps are relative offsets (`t-055m`)
/// so the text is a pure function of the inputs.
pub fn fetch_server_logs(server_id: &str, window_minutes: i64) -> Result<String, TelemetryError> {
    if window_minutes <= 0 {
        return Err(TelemetryError::InvalidWindow(window_minutes));
    }

    let mut rng = SyntheticRng::seeded(&[server_id, &window_minutes.to_string()]);
    let line_count = (window_minutes / LINE_INTERVAL_MINUTES).clamp(1, MAX_LINES);

    let mut out = format!(
        "--- logs for {} (last {}m) ---\n",
        server_id, window_minutes
    );

    for i in 0..line_count {
        let offset = window_minutes - i * LINE_INTERVAL_MINUTES;
        let (level, message) = sample_line(&mut rng);
        out.push_str(&format!(
            "[t-{:03}m] {:<5} {} {}\n",
            offset, level, server_id, message
        ));
    }

    Ok(out)
}

fn sample_line(rng: &mut SyntheticRng) -> (&'static str, String) {
    // Roughly 70% INFO, 22% WARN, 8% ERROR.
    let roll = rng.pick(0, 100);
    if roll < 70 {
        let msg = match rng.pick(0, 4) {
            0 => format!("healthcheck passed in {}ms", rng.pick(2, 40)),
            1 => format!("request rate steady at {} rps", rng.pick(120, 900)),
            2 => format!("cache hit ratio {}%", rng.pick(88, 100)),
            _ => format!("background vacuum completed in {}s", rng.pick(3, 45)),
        };
        ("INFO", msg)
    } else if roll < 92 {
        let msg = match rng.pick(0, 3) {
            0 => format!("disk usage {}% on /var/lib/postgresql", rng.pick(78, 95)),
            1 => format!(
                "request latency p99 {}ms on /api/checkout",
                rng.pick(400, 1800)
            ),
            _ => format!(
                "database connection pool at {}% capacity",
                rng.pick(80, 100)
            ),
        };
        ("WARN", msg)
    } else {
        let msg = match rng.pick(0, 2) {
            0 => format!("database query timeout after {}ms", rng.pick(5000, 30000)),
            _ => format!("disk write stall {}ms on primary volume", rng.pick(200, 2500)),
        };
        ("ERROR", msg)
    }
}

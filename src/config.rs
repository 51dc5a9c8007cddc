use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Gravida Care";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long a critical-patient highlight stays on screen before auto-clearing.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(7);

/// Number of entries shown in the "upcoming reminders" card.
pub const UPCOMING_LIMIT: usize = 3;

/// Height assumed by the health tracker until the patient enters one.
pub const DEFAULT_HEIGHT_CM: f64 = 165.0;

/// Environment variable overriding the HTTP bind address.
pub const BIND_ADDR_ENV: &str = "GRAVIDA_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,gravida_care_lib=debug".to_string()
}

/// Address the HTTP server listens on.
///
/// Reads `GRAVIDA_BIND_ADDR`; an unset or unparsable value falls back to
/// the loopback default.
pub fn bind_addr() -> SocketAddr {
    parse_bind_addr(std::env::var(BIND_ADDR_ENV).ok().as_deref())
}

fn parse_bind_addr(raw: Option<&str>) -> SocketAddr {
    let fallback = || {
        DEFAULT_BIND_ADDR
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8787)))
    };
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value, "Invalid {BIND_ADDR_ENV}, using default");
            fallback()
        }),
        None => fallback(),
    }
}

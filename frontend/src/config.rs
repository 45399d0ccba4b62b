use chatmind::ClientConfig;
use chatmind::config::DEFAULT_BACKEND_URL;

/// Set at build time, see build.rs.
const BACKEND_URL: Option<&str> = option_env!("CHATMIND_BACKEND_URL");

pub fn load() -> ClientConfig {
    let base = BACKEND_URL.unwrap_or(DEFAULT_BACKEND_URL);
    ClientConfig::new(base).unwrap_or_else(|e| {
        log::error!("{e}; using {DEFAULT_BACKEND_URL}");
        ClientConfig::default()
    })
}

use std::fmt::Write as _;

use bharatshop_core::{AppConfig, LogFormat};

/// Print effective configuration. The API key itself is never shown.
pub fn run(config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "recommender.top_k          = {}", config.recommender.top_k);
    let _ = writeln!(out, "recommender.assisted_top_k = {}", config.recommender.assisted_top_k);
    let _ = writeln!(
        out,
        "gemini.api_key             = {}",
        if config.gemini_enabled() { "<redacted>" } else { "<not set>" }
    );
    let _ = writeln!(out, "gemini.base_url            = {}", config.gemini.base_url);
    let _ = writeln!(out, "gemini.model               = {}", config.gemini.model);
    let _ = writeln!(out, "gemini.timeout_secs        = {}", config.gemini.timeout_secs);
    let _ = writeln!(out, "logging.level              = {}", config.logging.level);
    let _ = writeln!(
        out,
        "logging.format             = {}",
        match config.logging.format {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    );
    out
}

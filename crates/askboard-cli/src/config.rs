//! Board configuration.
//!
//! Reads the `[board]` section from `config/default.toml` and falls back
//! to defaults when the file or section is absent.

/// Settings loaded from the `[board]` section of `config/default.toml`.
pub struct BoardConfig {
    /// Directory holding the SQLite database.
    pub data_dir: String,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Load board configuration from `config/default.toml`.
pub fn load_board_config() -> BoardConfig {
    match std::fs::read_to_string("config/default.toml") {
        Ok(content) => parse_board_config(&content),
        Err(_) => BoardConfig::default(),
    }
}

/// Parse a configuration document, keeping defaults for anything missing
/// or malformed.
fn parse_board_config(content: &str) -> BoardConfig {
    let defaults = BoardConfig::default();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return defaults,
    };

    let board = match table.get("board") {
        Some(toml::Value::Table(b)) => b,
        _ => return defaults,
    };

    BoardConfig {
        data_dir: board
            .get("data_dir")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(defaults.data_dir),
        log_level: board
            .get("log_level")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(defaults.log_level),
    }
}

// ── tests ────────────────────────────────────────────────────────────

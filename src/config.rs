// ============================================================================
// Configuration de l'application
// ============================================================================
// Lue depuis les variables d'environnement, avec des valeurs par défaut
//
// Variables :
// - STOCKVIEW_SYMBOLS      : tickers proposés, séparés par des virgules
// - STOCKVIEW_TIMEFRAME    : période initiale ("1 Month", "1Y", ...)
// - STOCKVIEW_MA_WINDOW    : fenêtre de moyenne mobile (>= 1)
// - STOCKVIEW_AUD_RATE     : taux USD → AUD (> 0)
// - STOCKVIEW_LOG_DIR      : répertoire des logs
//
// Une valeur absente ou invalide retombe sur la valeur par défaut.
// ============================================================================

use std::env;
use std::path::PathBuf;

use crate::models::{Timeframe, DEFAULT_USD_TO_AUD_RATE};
use crate::series::DEFAULT_MOVING_AVERAGE_WINDOW;

/// Tickers proposés par défaut (seul NVDA a des données)
pub const DEFAULT_SYMBOLS: &[&str] = &["NVDA", "AAPL", "TSLA"];

/// Répertoire de logs par défaut
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub symbols: Vec<String>,
    pub timeframe: Timeframe,
    pub moving_average_window: usize,
    /// Source de taux : constante, aucune récupération
    pub aud_rate: f64,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            timeframe: Timeframe::default(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            aud_rate: DEFAULT_USD_TO_AUD_RATE,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Lit la configuration depuis une fonction de lookup
    ///
    /// CONCEPT RUST : Injection par closure
    /// - from_env() passe env::var
    /// - Les tests passent une HashMap sans toucher à l'environnement
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let symbols = get("STOCKVIEW_SYMBOLS")
            .map(|raw| parse_symbols(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.symbols);

        let timeframe = get("STOCKVIEW_TIMEFRAME")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeframe);

        let moving_average_window = get("STOCKVIEW_MA_WINDOW")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&w| w >= 1)
            .unwrap_or(defaults.moving_average_window);

        let aud_rate = get("STOCKVIEW_AUD_RATE")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(defaults.aud_rate);

        let log_dir = get("STOCKVIEW_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        Self {
            symbols,
            timeframe,
            moving_average_window,
            aud_rate,
            log_dir,
        }
    }
}

/// "nvda, aapl,,NVDA" → ["NVDA", "AAPL"]
fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.symbols[0], "NVDA");
        assert_eq!(config.aud_rate, 1.59);
        assert_eq!(config.timeframe, Timeframe::OneMonth);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOCKVIEW_SYMBOLS", "nvda, msft,,NVDA"),
            ("STOCKVIEW_TIMEFRAME", "1 Year"),
            ("STOCKVIEW_MA_WINDOW", "5"),
            ("STOCKVIEW_AUD_RATE", "1.5"),
            ("STOCKVIEW_LOG_DIR", "/tmp/sv"),
        ]);

        assert_eq!(config.symbols, vec!["NVDA", "MSFT"]);
        assert_eq!(config.timeframe, Timeframe::OneYear);
        assert_eq!(config.moving_average_window, 5);
        assert_eq!(config.aud_rate, 1.5);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/sv"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("STOCKVIEW_SYMBOLS", " , "),
            ("STOCKVIEW_TIMEFRAME", "fortnight"),
            ("STOCKVIEW_MA_WINDOW", "0"),
            ("STOCKVIEW_AUD_RATE", "-2"),
        ]);

        assert_eq!(config, AppConfig::default());
    }
}

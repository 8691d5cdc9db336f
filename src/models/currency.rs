// ============================================================================
// Enum : Currency
// ============================================================================
// Devise d'affichage (bouton "Switch to AUD / USD" de la page)
//
// Les prix source sont en USD. Le taux AUD est une constante fournie par la
// configuration : aucune récupération de taux réel.
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Taux USD → AUD par défaut
pub const DEFAULT_USD_TO_AUD_RATE: f64 = 1.59;

/// Devise d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Usd,
    Aud,
}

impl Currency {
    /// Code ISO affiché ("USD", "AUD")
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Aud => "AUD",
        }
    }

    /// Bascule USD ↔ AUD
    pub fn toggle(&self) -> Currency {
        match self {
            Currency::Usd => Currency::Aud,
            Currency::Aud => Currency::Usd,
        }
    }

    /// Multiplicateur à appliquer aux prix USD
    ///
    /// # Arguments
    /// * `aud_rate` - Taux USD → AUD (source de taux externe)
    pub fn multiplier(&self, aud_rate: f64) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Aud => aud_rate,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "AUD" => Ok(Currency::Aud),
            _ => Err(format!("devise inconnue : {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_toggle() {
        assert_eq!(Currency::Usd.toggle(), Currency::Aud);
        assert_eq!(Currency::Aud.toggle().toggle(), Currency::Aud);
    }

    #[test]
    fn test_currency_multiplier() {
        assert_eq!(Currency::Usd.multiplier(DEFAULT_USD_TO_AUD_RATE), 1.0);
        assert_eq!(Currency::Aud.multiplier(DEFAULT_USD_TO_AUD_RATE), 1.59);
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("aud".parse::<Currency>(), Ok(Currency::Aud));
        assert!("EUR".parse::<Currency>().is_err());
    }
}

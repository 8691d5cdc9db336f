// ============================================================================
// Enum : Timeframe
// ============================================================================
// Période affichée sur le graphique (sélecteur "Time Frame" de la page)
//
// CONCEPTS RUST :
// 1. Enum Copy : petite valeur, copiée plutôt que déplacée
// 2. &'static str : labels littéraux, pas d'allocation
// 3. FromStr : parsing depuis le label (CLI, configuration)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Période de temps pour une série de prix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Dernière heure (points à la minute)
    OneHour,
    /// Journée (points toutes les 3 heures)
    OneDay,
    /// Mois (points hebdomadaires)
    OneMonth,
    /// Année (points trimestriels)
    OneYear,
    /// 5 ans (points annuels)
    FiveYears,
}

impl Timeframe {
    /// Retourne le label pour l'affichage (identique au sélecteur d'origine)
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1 Hour",
            Timeframe::OneDay => "1 Day",
            Timeframe::OneMonth => "1 Month",
            Timeframe::OneYear => "1 Year",
            Timeframe::FiveYears => "5 Years",
        }
    }

    /// Retourne toutes les périodes disponibles (pour UI de sélection)
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::OneHour,
            Timeframe::OneDay,
            Timeframe::OneMonth,
            Timeframe::OneYear,
            Timeframe::FiveYears,
        ]
    }

    /// Retourne la période suivante (cycle)
    pub fn next(&self) -> Timeframe {
        match self {
            Timeframe::OneHour => Timeframe::OneDay,
            Timeframe::OneDay => Timeframe::OneMonth,
            Timeframe::OneMonth => Timeframe::OneYear,
            Timeframe::OneYear => Timeframe::FiveYears,
            Timeframe::FiveYears => Timeframe::OneHour, // Boucle
        }
    }

    /// Retourne la période précédente (cycle)
    pub fn previous(&self) -> Timeframe {
        match self {
            Timeframe::OneHour => Timeframe::FiveYears, // Boucle
            Timeframe::OneDay => Timeframe::OneHour,
            Timeframe::OneMonth => Timeframe::OneDay,
            Timeframe::OneYear => Timeframe::OneMonth,
            Timeframe::FiveYears => Timeframe::OneYear,
        }
    }
}

impl Default for Timeframe {
    /// Période par défaut : 1 mois (série de repli de la page d'origine)
    fn default() -> Self {
        Timeframe::OneMonth
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsing tolérant : accepte "1 Month", "1month", "1M", "month"...
///
/// CONCEPT RUST : FromStr
/// - Permet "1 Month".parse::<Timeframe>()
/// - Utilisé par clap (value_parser) et par la configuration
impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "1hour" | "1h" | "hour" => Ok(Timeframe::OneHour),
            "1day" | "1d" | "day" => Ok(Timeframe::OneDay),
            "1month" | "1m" | "month" => Ok(Timeframe::OneMonth),
            "1year" | "1y" | "year" => Ok(Timeframe::OneYear),
            "5years" | "5y" => Ok(Timeframe::FiveYears),
            _ => Err(format!("période inconnue : {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_cycle() {
        assert_eq!(Timeframe::OneHour.next(), Timeframe::OneDay);
        assert_eq!(Timeframe::FiveYears.next(), Timeframe::OneHour); // Boucle
        assert_eq!(Timeframe::OneHour.previous(), Timeframe::FiveYears);

        // Un tour complet revient au point de départ
        let mut tf = Timeframe::default();
        for _ in 0..Timeframe::all().len() {
            tf = tf.next();
        }
        assert_eq!(tf, Timeframe::default());
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("1 Month".parse::<Timeframe>(), Ok(Timeframe::OneMonth));
        assert_eq!("5Y".parse::<Timeframe>(), Ok(Timeframe::FiveYears));
        assert_eq!(" 1 hour ".parse::<Timeframe>(), Ok(Timeframe::OneHour));
        assert!("2 Weeks".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_label_roundtrip() {
        for tf in Timeframe::all() {
            assert_eq!(tf.label().parse::<Timeframe>(), Ok(tf));
        }
    }
}

// ============================================================================
// Fournisseur de données : séries d'exemple
// ============================================================================
// Séries de prix littérales, indexées par (symbole, période)
// Aucune source réelle : les tables sont compilées dans le binaire
//
// CONCEPTS RUST :
// 1. &'static [T] : tables constantes, aucune allocation avant la lecture
// 2. Iterator find : recherche linéaire (quelques entrées seulement)
// 3. #[instrument] : span tracing avec symbole et période
// ============================================================================

use tracing::{debug, instrument, warn};

use crate::models::{PricePoint, PriceSeries, Timeframe, Transaction};

/// Symbole de la série de repli
pub const FALLBACK_SYMBOL: &str = "NVDA";

/// Période de la série de repli
pub const FALLBACK_TIMEFRAME: Timeframe = Timeframe::OneMonth;

/// Une ligne de table : label, prix, bande (high, low) optionnelle
struct SampleRow {
    label: &'static str,
    price: f64,
    range: Option<(f64, f64)>,
}

/// Table d'une série pour un couple (symbole, période)
struct SampleTable {
    symbol: &'static str,
    timeframe: Timeframe,
    rows: &'static [SampleRow],
}

const fn row(label: &'static str, price: f64) -> SampleRow {
    SampleRow {
        label,
        price,
        range: None,
    }
}

const fn ranged(label: &'static str, price: f64, high: f64, low: f64) -> SampleRow {
    SampleRow {
        label,
        price,
        range: Some((high, low)),
    }
}

// ============================================================================
// Tables
// ============================================================================
// Les séries intraday portent une bande high/low (variante "high/low" du
// graphique). Les séries longues n'ont que le prix.
// ============================================================================

static SAMPLE_TABLES: &[SampleTable] = &[
    SampleTable {
        symbol: "NVDA",
        timeframe: Timeframe::OneHour,
        rows: &[
            ranged("2025-03-14 16:45", 121.50, 121.58, 121.41),
            ranged("2025-03-14 16:46", 121.67, 121.72, 121.49),
            ranged("2025-03-14 16:47", 121.60, 121.70, 121.55),
        ],
    },
    SampleTable {
        symbol: "NVDA",
        timeframe: Timeframe::OneDay,
        rows: &[
            ranged("2025-03-14 09:00", 121.00, 121.35, 120.62),
            ranged("2025-03-14 12:00", 121.50, 121.78, 120.95),
            ranged("2025-03-14 15:00", 121.67, 121.90, 121.30),
        ],
    },
    SampleTable {
        symbol: "NVDA",
        timeframe: Timeframe::OneMonth,
        rows: &[
            row("2025-02-14", 138.48),
            row("2025-02-21", 135.00),
            row("2025-02-28", 130.00),
            row("2025-03-07", 125.00),
            row("2025-03-14", 121.67),
        ],
    },
    SampleTable {
        symbol: "NVDA",
        timeframe: Timeframe::OneYear,
        rows: &[
            row("2024-03-14", 150.00),
            row("2024-06-14", 145.00),
            row("2024-09-14", 140.00),
            row("2024-12-14", 130.00),
            row("2025-03-14", 121.67),
        ],
    },
    SampleTable {
        symbol: "NVDA",
        timeframe: Timeframe::FiveYears,
        rows: &[
            row("2020-03-14", 50.00),
            row("2021-03-14", 75.00),
            row("2022-03-14", 100.00),
            row("2023-03-14", 120.00),
            row("2024-03-14", 150.00),
            row("2025-03-14", 121.67),
        ],
    },
];

impl SampleTable {
    fn to_series(&self) -> PriceSeries {
        let points = self
            .rows
            .iter()
            .map(|r| match r.range {
                Some((high, low)) => PricePoint::with_range(r.label, r.price, high, low),
                None => PricePoint::new(r.label, r.price),
            })
            .collect();

        PriceSeries::new(self.symbol.to_string(), self.timeframe, points)
    }
}

/// Cherche une table exacte (symbole insensible à la casse)
fn find_table(symbol: &str, timeframe: Timeframe) -> Option<&'static SampleTable> {
    SAMPLE_TABLES
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol.trim()) && t.timeframe == timeframe)
}

/// Retourne la série d'un couple (symbole, période)
///
/// Si le couple n'existe pas, retourne la série NVDA / 1 Month.
/// La série retournée porte toujours le symbole et la période des données
/// réellement utilisées : `series.symbol != symbol` signale un repli.
#[instrument(skip(timeframe), fields(timeframe = %timeframe.label()))]
pub fn series_for(symbol: &str, timeframe: Timeframe) -> PriceSeries {
    match find_table(symbol, timeframe) {
        Some(table) => {
            debug!(points = table.rows.len(), "Sample series found");
            table.to_series()
        }
        None => {
            warn!(
                fallback_symbol = FALLBACK_SYMBOL,
                fallback_timeframe = %FALLBACK_TIMEFRAME.label(),
                "No sample series for this pair, using fallback"
            );
            fallback_series()
        }
    }
}

/// Série de repli (NVDA / 1 Month)
pub fn fallback_series() -> PriceSeries {
    SAMPLE_TABLES
        .iter()
        .find(|t| t.symbol == FALLBACK_SYMBOL && t.timeframe == FALLBACK_TIMEFRAME)
        .map(SampleTable::to_series)
        .unwrap_or_else(|| PriceSeries::new(FALLBACK_SYMBOL.to_string(), FALLBACK_TIMEFRAME, Vec::new()))
}

/// Symboles disposant de données, sans doublon, dans l'ordre des tables
pub fn known_symbols() -> Vec<&'static str> {
    let mut symbols: Vec<&'static str> = Vec::new();
    for table in SAMPLE_TABLES {
        if !symbols.contains(&table.symbol) {
            symbols.push(table.symbol);
        }
    }
    symbols
}

/// Journal initial : une transaction codée en dur
pub fn seed_transactions() -> Vec<Transaction> {
    vec![Transaction::new(
        "2025-03-14 17:45:00".to_string(),
        "NVDA".to_string(),
        10.0,
        121.67,
    )]
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_nvda_timeframe_has_data() {
        for tf in Timeframe::all() {
            let series = series_for("NVDA", tf);
            assert_eq!(series.symbol, "NVDA");
            assert_eq!(series.timeframe, tf);
            assert!(!series.points.is_empty());
            // Toutes les séries finissent au même dernier prix
            assert_eq!(series.points.last().map(|p| p.price), Some(121.67));
        }
    }

    #[test]
    fn test_known_symbols() {
        assert_eq!(known_symbols(), vec!["NVDA"]);
    }

    #[test]
    fn test_series_contents() {
        let month = series_for("NVDA", Timeframe::OneMonth);
        let prices: Vec<f64> = month.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![138.48, 135.00, 130.00, 125.00, 121.67]);
        assert_eq!(month.points[0].timestamp, "2025-02-14");

        let five = series_for("NVDA", Timeframe::FiveYears);
        assert_eq!(five.points.len(), 6);
    }

    #[test]
    fn test_intraday_series_carry_range() {
        let hour = series_for("NVDA", Timeframe::OneHour);
        assert!(hour.points.iter().all(|p| p.high.is_some() && p.low.is_some()));

        let year = series_for("NVDA", Timeframe::OneYear);
        assert!(year.points.iter().all(|p| p.high.is_none() && p.low.is_none()));
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        let series = series_for(" nvda ", Timeframe::OneDay);
        assert_eq!(series.timeframe, Timeframe::OneDay);
    }

    #[test]
    fn test_unknown_symbol_falls_back() {
        let series = series_for("TSLA", Timeframe::OneHour);
        assert_eq!(series.symbol, FALLBACK_SYMBOL);
        assert_eq!(series.timeframe, FALLBACK_TIMEFRAME);
        assert_eq!(series.points.len(), 5);
    }

    #[test]
    fn test_seed_transactions() {
        let seed = seed_transactions();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].log_line(), "14/03/2025 17:45: NVDA - 10 @ USD $121.67");
    }
}

// ============================================================================
// Structures : PricePoint et PriceSeries
// ============================================================================
// Un point de prix (label de temps + prix, high/low optionnels) et la série
// ordonnée qui les regroupe pour un couple (symbole, période)
//
// CONCEPTS RUST :
// 1. Option<f64> : high/low absents dans les séries "prix seul"
// 2. String pour le timestamp : label opaque (ex: "2025-03-14 16:45")
// 3. NaiveDateTime : parsing best-effort des labels pour positionner l'overlay
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Timeframe;

/// Un point de prix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Label de temps (opaque ou ISO-8601)
    pub timestamp: String,

    /// Prix (USD)
    pub price: f64,

    /// Plus haut de la période (optionnel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,

    /// Plus bas de la période (optionnel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
}

impl PricePoint {
    /// Constructeur : point sans high/low
    pub fn new(timestamp: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
            high: None,
            low: None,
        }
    }

    /// Constructeur : point avec bande high/low
    pub fn with_range(timestamp: impl Into<String>, price: f64, high: f64, low: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
            high: Some(high),
            low: Some(low),
        }
    }
}

/// Série de prix pour un ticker et une période
///
/// CONCEPT RUST : Ownership
/// - PriceSeries possède le Vec, le Vec possède les points
/// - Les points sont triés par ordre chronologique
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbole du ticker
    pub symbol: String,

    /// Période couverte
    pub timeframe: Timeframe,

    /// Points, du plus ancien au plus récent
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: String, timeframe: Timeframe, points: Vec<PricePoint>) -> Self {
        Self {
            symbol,
            timeframe,
            points,
        }
    }
}

/// Parse un label de temps en NaiveDateTime (best-effort)
///
/// Formats acceptés :
/// - RFC 3339 / ISO-8601 : "2025-03-14T17:45:00.000Z"
/// - "2025-03-14 17:45:00", "2025-03-14 17:45"
/// - "2025-03-14" (minuit)
///
/// Retourne None pour un label opaque.
pub fn parse_label(label: &str) -> Option<NaiveDateTime> {
    let label = label.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(label) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(label, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(label, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_price_point_range() {
        let plain = PricePoint::new("2025-03-14", 121.67);
        assert_eq!((plain.high, plain.low), (None, None));

        let ranged = PricePoint::with_range("2025-03-14 16:45", 121.50, 121.80, 121.30);
        assert_eq!((ranged.high, ranged.low), (Some(121.80), Some(121.30)));
    }

    #[test]
    fn test_price_series_new() {
        let series = PriceSeries::new(
            "NVDA".to_string(),
            Timeframe::OneDay,
            vec![
                PricePoint::new("2025-03-14 09:00", 121.00),
                PricePoint::new("2025-03-14 12:00", 121.50),
            ],
        );

        assert_eq!(series.symbol, "NVDA");
        assert_eq!(series.timeframe, Timeframe::OneDay);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[1].price, 121.50);
    }

    #[test]
    fn test_parse_label_formats() {
        let iso = parse_label("2025-03-14T17:45:00.000Z").unwrap();
        assert_eq!((iso.hour(), iso.minute()), (17, 45));

        let spaced = parse_label("2025-03-14 17:45:00").unwrap();
        assert_eq!(spaced, iso);

        let short = parse_label("2025-03-14 16:45").unwrap();
        assert_eq!(short.minute(), 45);

        let day = parse_label("2025-02-14").unwrap();
        assert_eq!(day.hour(), 0);

        assert!(parse_label("Q1").is_none());
    }
}

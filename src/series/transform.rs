// ============================================================================
// Transformation des séries : prix bruts → séries prêtes à dessiner
// ============================================================================
// Fonction pure : aucune entrée/sortie, aucun état partagé
//
// ALGORITHME :
// 1. Validation (série non vide, multiplicateur > 0, fenêtre >= 1)
// 2. Mise à l'échelle des prix / high / low par le multiplicateur de devise
// 3. Moyenne mobile à fenêtre croissante : fenêtre [max(0, i-w+1), i]
// 4. Overlay des transactions du symbole, dans l'ordre d'entrée
// 5. Prix courant, prédiction (+2%) et signal
// ============================================================================

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TransformError;
use crate::models::{PricePoint, Transaction};

/// Markup constant de la "prédiction"
pub const PREDICTION_MARKUP: f64 = 1.02;

/// Fenêtre de moyenne mobile par défaut
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// Options d'affichage pour une requête de rendu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Multiplicateur de devise (> 0)
    pub currency_multiplier: f64,

    /// Largeur de la fenêtre de moyenne mobile (>= 1)
    pub moving_average_window: usize,
}

impl DisplayOptions {
    pub fn new(currency_multiplier: f64, moving_average_window: usize) -> Self {
        Self {
            currency_multiplier,
            moving_average_window,
        }
    }

    /// Vérifie que les options sont dans leur domaine
    pub fn validate(&self) -> Result<(), TransformError> {
        // is_finite() écarte aussi NaN
        if !self.currency_multiplier.is_finite() || self.currency_multiplier <= 0.0 {
            return Err(TransformError::InvalidOption(format!(
                "currency_multiplier doit être > 0 (reçu {})",
                self.currency_multiplier
            )));
        }

        if self.moving_average_window == 0 {
            return Err(TransformError::InvalidOption(
                "moving_average_window doit être >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DisplayOptions {
    /// USD (multiplicateur 1.0) et fenêtre par défaut
    fn default() -> Self {
        Self::new(1.0, DEFAULT_MOVING_AVERAGE_WINDOW)
    }
}

/// Signe d'un marqueur de transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlaySign {
    /// Achat (quantité > 0)
    Positive,
    /// Vente (quantité <= 0)
    Negative,
}

/// Un marqueur de transaction positionné contre la série
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPoint {
    /// Timestamp de la transaction
    pub x: String,

    /// Prix de la transaction, mis à l'échelle
    pub y: f64,

    pub sign: OverlaySign,
}

/// Signal affiché à côté de la prédiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
        }
    }
}

/// Séries dérivées, prêtes pour une surface de rendu
///
/// Invariant : toutes les séries par point ont la longueur de l'entrée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSeries {
    /// Labels de l'axe X (timestamps des points)
    pub labels: Vec<String>,

    pub scaled_prices: Vec<f64>,

    /// None là où le point source n'a pas de high
    pub scaled_highs: Vec<Option<f64>>,

    /// None là où le point source n'a pas de low
    pub scaled_lows: Vec<Option<f64>>,

    pub moving_average: Vec<f64>,

    pub transaction_overlay: Vec<OverlayPoint>,

    pub current_price: f64,

    pub predicted_price: f64,

    pub signal: Signal,
}

impl RenderSeries {
    /// Retourne le nombre de points
    pub fn len(&self) -> usize {
        self.scaled_prices.len()
    }

    /// Toujours false pour une série produite par transform()
    pub fn is_empty(&self) -> bool {
        self.scaled_prices.is_empty()
    }

    /// Vérifie si au moins un point porte un high ou un low
    pub fn has_range(&self) -> bool {
        self.scaled_highs.iter().any(Option::is_some) || self.scaled_lows.iter().any(Option::is_some)
    }
}

/// Transforme une série brute en séries prêtes à dessiner
///
/// # Arguments
/// * `points` - Points de prix, ordre chronologique, non vide
/// * `options` - Multiplicateur de devise et fenêtre de moyenne mobile
/// * `transactions` - Journal des transactions (lu, jamais modifié)
/// * `symbol` - Symbole dont on affiche les transactions
///
/// # Erreurs
/// * `TransformError::EmptyInput` si `points` est vide
/// * `TransformError::InvalidOption` si multiplicateur <= 0 ou fenêtre = 0
pub fn transform(
    points: &[PricePoint],
    options: &DisplayOptions,
    transactions: &[Transaction],
    symbol: &str,
) -> Result<RenderSeries, TransformError> {
    if points.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    options.validate()?;

    let rate = options.currency_multiplier;

    let labels: Vec<String> = points.iter().map(|p| p.timestamp.clone()).collect();
    let scaled_prices: Vec<f64> = points.iter().map(|p| p.price * rate).collect();
    let scaled_highs: Vec<Option<f64>> = points.iter().map(|p| p.high.map(|h| h * rate)).collect();
    let scaled_lows: Vec<Option<f64>> = points.iter().map(|p| p.low.map(|l| l * rate)).collect();

    let moving_average = moving_average(&scaled_prices, options.moving_average_window);

    let transaction_overlay: Vec<OverlayPoint> = transactions
        .iter()
        .filter(|t| t.symbol == symbol)
        .map(|t| OverlayPoint {
            x: t.timestamp.clone(),
            y: t.price_at_transaction * rate,
            sign: if t.is_buy() {
                OverlaySign::Positive
            } else {
                OverlaySign::Negative
            },
        })
        .collect();

    // Non vide : vérifié plus haut
    let current_price = scaled_prices[scaled_prices.len() - 1];
    let predicted_price = current_price * PREDICTION_MARKUP;
    let signal = if predicted_price > current_price {
        Signal::Buy
    } else {
        Signal::Sell
    };

    trace!(
        symbol,
        points = scaled_prices.len(),
        overlay = transaction_overlay.len(),
        "Series transformed"
    );

    Ok(RenderSeries {
        labels,
        scaled_prices,
        scaled_highs,
        scaled_lows,
        moving_average,
        transaction_overlay,
        current_price,
        predicted_price,
        signal,
    })
}

/// Moyenne mobile à fenêtre croissante
///
/// `result[i] = moyenne(values[max(0, i-window+1) ..= i])`
///
/// La fenêtre est bornée à `values.len()`. Une fenêtre de 0 est traitée
/// comme 1 (transform() la rejette avant d'arriver ici).
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.clamp(1, values.len().max(1));

    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

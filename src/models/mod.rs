// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod currency;    // Devise d'affichage (USD / AUD)
pub mod price_point; // Points et séries de prix
pub mod timeframe;   // Périodes affichées
pub mod transaction; // Transactions saisies

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use stockview::models::price_point::PricePoint;
// On peut faire : use stockview::models::PricePoint;
pub use currency::{Currency, DEFAULT_USD_TO_AUD_RATE};
pub use price_point::{parse_label, PricePoint, PriceSeries};
pub use timeframe::Timeframe;
pub use transaction::Transaction;

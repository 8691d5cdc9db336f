// ============================================================================
// Structure : Transaction
// ============================================================================
// Une transaction fabriquée (achat si quantité > 0, vente sinon)
//
// CONCEPTS RUST :
// 1. Journal append-only : possédé par l'appelant (App), jamais par le core
// 2. String building : format! pour la ligne du journal
// ============================================================================

use serde::{Deserialize, Serialize};

/// Une transaction saisie par l'utilisateur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date/heure ISO-8601 (ex: "2025-03-14T17:45:00.000Z")
    pub timestamp: String,

    /// Symbole du ticker (ex: "NVDA")
    pub symbol: String,

    /// Quantité signée : > 0 achat, <= 0 vente
    pub quantity: f64,

    /// Prix unitaire au moment de la transaction (USD)
    pub price_at_transaction: f64,
}

impl Transaction {
    /// Constructeur
    pub fn new(timestamp: String, symbol: String, quantity: f64, price_at_transaction: f64) -> Self {
        Self {
            timestamp,
            symbol,
            quantity,
            price_at_transaction,
        }
    }

    /// Vérifie si la transaction est un achat
    pub fn is_buy(&self) -> bool {
        self.quantity > 0.0
    }

    /// Formatte la transaction pour le journal
    ///
    /// Format : "14/03/2025 17:45: NVDA - 10 @ USD $121.67"
    ///
    /// Le timestamp est découpé par position (AAAA-MM-JJ?HH:MM), ce qui couvre
    /// "2025-03-14 17:45:00" comme "2025-03-14T17:45:00.000Z". Un timestamp
    /// trop court est affiché tel quel.
    pub fn log_line(&self) -> String {
        let ts = self.timestamp.as_str();
        let when = match (ts.get(0..4), ts.get(5..7), ts.get(8..10), ts.get(11..16)) {
            (Some(year), Some(month), Some(day), Some(hm)) => {
                format!("{}/{}/{} {}", day, month, year, hm)
            }
            _ => ts.to_string(),
        };

        format!("{}: {}", when, self.summary())
    }

    /// Partie "TICKER - montant @ USD $prix" des lignes de journal
    pub fn summary(&self) -> String {
        format!(
            "{} - {} @ USD ${:.2}",
            self.symbol, self.quantity, self.price_at_transaction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Transaction {
        Transaction::new(
            "2025-03-14 17:45:00".to_string(),
            "NVDA".to_string(),
            10.0,
            121.67,
        )
    }

    #[test]
    fn test_transaction_side() {
        assert!(seed().is_buy());

        let mut sell = seed();
        sell.quantity = 0.0;
        assert!(!sell.is_buy()); // Zéro = marqueur de vente
    }

    #[test]
    fn test_log_line() {
        assert_eq!(seed().log_line(), "14/03/2025 17:45: NVDA - 10 @ USD $121.67");
    }

    #[test]
    fn test_summary() {
        assert_eq!(seed().summary(), "NVDA - 10 @ USD $121.67");
    }

    #[test]
    fn test_log_line_iso_and_fraction() {
        let tx = Transaction::new(
            "2025-03-15T09:30:00.000Z".to_string(),
            "AAPL".to_string(),
            -2.5,
            100.0,
        );
        assert_eq!(tx.log_line(), "15/03/2025 09:30: AAPL - -2.5 @ USD $100.00");
    }

    #[test]
    fn test_log_line_short_timestamp() {
        let tx = Transaction::new("today".to_string(), "NVDA".to_string(), 1.0, 1.0);
        assert_eq!(tx.log_line(), "today: NVDA - 1 @ USD $1.00");
    }
}

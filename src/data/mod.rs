// ============================================================================
// Module : data
// ============================================================================
// Sources de données de l'application :
// - sample : séries de prix codées en dur et journal initial
// - entry : saisie d'une transaction depuis le formulaire
// ============================================================================

pub mod entry;  // Formulaire de transaction
pub mod sample; // Séries d'exemple

// Re-export des fonctions principales
pub use entry::{entry_log_lines, error_log_line, parse_entry, TransactionEntry};
pub use sample::{known_symbols, seed_transactions, series_for};

// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod chart;     // Rendu du graphique (prix, high/low, SMA, transactions)
pub mod dashboard; // Layout et routage des écrans
pub mod events;    // Gestion des événements clavier
pub mod ledger;    // Journal des transactions et formulaire

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};

// ============================================================================
// StockView - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;     // État de l'application
pub mod config;  // Configuration (variables d'environnement)
pub mod data;    // Séries d'exemple et saisie des transactions
pub mod error;   // Erreurs typées
pub mod models;  // Structures de données
pub mod series;  // Transformation des séries
pub mod ui;      // Interface utilisateur

pub use error::{EntryError, TransformError};
pub use series::{transform, DisplayOptions, RenderSeries};

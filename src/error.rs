// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées de la bibliothèque
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère l'implémentation de Display
// - Le binaire les convertit en anyhow::Error avec ?
// ============================================================================

use thiserror::Error;

/// Erreurs de la transformation des séries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// La série de prix est vide
    #[error("la série de prix est vide")]
    EmptyInput,

    /// Une option d'affichage est hors de son domaine
    #[error("option invalide : {0}")]
    InvalidOption(String),
}

/// Erreurs de saisie d'une transaction (formulaire)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Missing ticker")]
    MissingTicker,

    #[error("Invalid date/time")]
    InvalidDateTime,

    #[error("Invalid amount")]
    InvalidAmount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_error_messages() {
        // Les messages sont affichés tels quels dans le journal
        assert_eq!(EntryError::InvalidDateTime.to_string(), "Invalid date/time");
        assert_eq!(EntryError::InvalidAmount.to_string(), "Invalid amount");
    }

    #[test]
    fn test_transform_error_detail() {
        let err = TransformError::InvalidOption("currency_multiplier = 0".to_string());
        assert!(err.to_string().contains("currency_multiplier = 0"));
    }
}

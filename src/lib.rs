// ============================================================================
// StockDash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // Source live Yahoo Finance + repli snapshot CSV
pub mod app;    // État de l'application et handlers
pub mod models; // Structures de données et payloads de rendu
pub mod ui;     // Interface terminal

// ============================================================================
// Module : ui
// ============================================================================
// Toute l'interface terminal : événements clavier et rendu des régions
// ============================================================================

pub mod boxplot_text; // Box-plot Unicode du volume
pub mod chart;        // Figures lignes (prix, bande)
pub mod dashboard;    // Composition de la page complète
pub mod events;       // Événements clavier + tick
pub mod table;        // Tableau d'historique récent

// Re-exports pour simplifier les imports
pub use dashboard::{render, render_empty};
pub use events::{Event, EventHandler};

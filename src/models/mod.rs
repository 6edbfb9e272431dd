// ============================================================================
// Module : models
// ============================================================================
// Toutes les structures de données de l'application
// ============================================================================

pub mod figure;         // Figures de graphiques (lignes, box-plot)
pub mod payload;        // RenderPayload : sortie atomique du handler
pub mod recommendation; // Signal BUY / SELL
pub mod series;         // Historique de prix journalier
pub mod table;          // Tableau d'historique récent
pub mod ticker;         // Allow-list de tickers

// Re-export des structures principales pour simplifier les imports
pub use figure::{Figure, FiveNumberSummary, LineSeries, VolumeBoxPlot};
pub use payload::RenderPayload;
pub use recommendation::Recommendation;
pub use series::{DailyBar, PriceSeries};
pub use table::TableSpec;
pub use ticker::Ticker;

// ============================================================================
// Module : api
// ============================================================================
// Chargement des données de marché : source live Yahoo Finance, avec repli
// sur le snapshot CSV local par ticker
// ============================================================================

pub mod snapshot; // Repli CSV local (data/<TICKER>.csv)
pub mod yahoo;    // Client Yahoo Finance (source live)

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::PriceSeries;

pub use yahoo::{fetch_daily_history, FetchError};

/// Charge l'historique d'un ticker : source live, sinon snapshot
///
/// Politique de repli : seul un [`FetchError`] récupérable déclenche la
/// lecture du snapshot (une ligne de warn est alors loguée) ; aujourd'hui
/// toutes les catégories le sont. Si le snapshot échoue aussi, l'erreur
/// remonte sans autre tentative — le cycle de rendu échoue en bloc.
pub async fn load_price_series(symbol: &str, snapshot_dir: &Path) -> Result<PriceSeries> {
    match yahoo::fetch_daily_history(symbol).await {
        Ok(series) => Ok(series),
        Err(err) if err.is_recoverable() => {
            warn!(ticker = %symbol, error = %err, "Live fetch failed, falling back to snapshot");
            snapshot::read_snapshot(snapshot_dir, symbol)
                .with_context(|| format!("fallback snapshot unavailable for {}", symbol))
        }
        Err(err) => Err(err.into()),
    }
}

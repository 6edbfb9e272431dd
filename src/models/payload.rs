// ============================================================================
// Structure : RenderPayload (sortie atomique du handler de ticker)
// ============================================================================
// Le six-tuple {titre, figure prix, figure bande, box-plot volume,
// recommandation, tableau} produit en une fois par changement de ticker.
// Il remplace intégralement l'état visible du dashboard : pas de fusion
// incrémentale, pas de rendu partiel
// ============================================================================

use anyhow::{bail, Result};

use crate::models::{Figure, PriceSeries, Recommendation, TableSpec, VolumeBoxPlot};

/// Payload complet d'un cycle de mise à jour du dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    /// Titre de page : "<TICKER> Stock Prices"
    pub title: String,

    /// Lignes Close / Open
    pub price_figure: Figure,

    /// Lignes High / Close avec bande remplie
    pub band_figure: Figure,

    /// Distribution du volume
    pub volume_figure: VolumeBoxPlot,

    /// Signal BUY / SELL de la dernière barre
    pub recommendation: Recommendation,

    /// Tableau des 10 premières barres
    pub table: TableSpec,
}

impl RenderPayload {
    /// Construit le payload complet depuis un historique trié
    ///
    /// Fonction pure : une entrée, les six sorties, aucun effet de bord.
    /// L'historique doit être non vide (invariant garanti par les chargeurs),
    /// sinon l'erreur remonte et le cycle de rendu échoue en bloc.
    pub fn build(series: &PriceSeries) -> Result<Self> {
        let symbol = series.symbol.as_str();

        // latest() et of_volume() ne sont None que sur une série vide
        let (Some(latest), Some(volume_figure)) = (
            series.latest(),
            VolumeBoxPlot::of_volume(symbol, &series.bars),
        ) else {
            bail!("empty price series for {}", symbol);
        };

        Ok(Self {
            title: format!("{} Stock Prices", symbol),
            price_figure: Figure::price_figure(symbol, &series.bars),
            band_figure: Figure::band_figure(&series.bars),
            volume_figure,
            recommendation: Recommendation::from_bar(latest),
            table: TableSpec::from_bars(&series.bars),
        })
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

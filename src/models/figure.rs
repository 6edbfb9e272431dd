// ============================================================================
// Structures : Figure, LineSeries, VolumeBoxPlot
// ============================================================================
// Descriptions de graphiques indépendantes du rendu : le handler de mise à
// jour construit ces payloads purs, la couche ui les dessine ensuite
//
// CONCEPT : Séparation données / rendu
// - Les figures sont testables sans terminal
// - Le module ui ne fait que traduire en widgets ratatui
// ============================================================================

use chrono::NaiveDate;

use crate::models::DailyBar;

/// Une série de points (date, valeur) tracée en ligne
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    /// Nom de la série (légende)
    pub name: String,

    /// Points par date croissante
    pub points: Vec<(NaiveDate, f64)>,
}

impl LineSeries {
    /// Construit une série en projetant un champ de chaque barre
    fn from_bars(name: &str, bars: &[DailyBar], field: fn(&DailyBar) -> f64) -> Self {
        Self {
            name: name.to_string(),
            points: bars.iter().map(|b| (b.date, field(b))).collect(),
        }
    }
}

/// Un graphique ligne : un titre et une ou plusieurs séries
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Titre affiché au-dessus du graphique
    pub title: String,

    /// Séries tracées, dans l'ordre de déclaration
    pub series: Vec<LineSeries>,

    /// Si true, la zone entre la première et la dernière série est remplie
    pub fill_between: bool,
}

impl Figure {
    /// Figure de prix : Close puis Open, sur toute la fenêtre
    pub fn price_figure(symbol: &str, bars: &[DailyBar]) -> Self {
        Self {
            title: format!("{} Prices, Currency in USD", symbol),
            series: vec![
                LineSeries::from_bars("Close", bars, |b| b.close),
                LineSeries::from_bars("Open", bars, |b| b.open),
            ],
            fill_between: false,
        }
    }

    /// Figure de bande : High puis Close, zone entre les deux remplie
    pub fn band_figure(bars: &[DailyBar]) -> Self {
        Self {
            title: "High vs. Low Prices".to_string(),
            series: vec![
                LineSeries::from_bars("High", bars, |b| b.high),
                LineSeries::from_bars("Close", bars, |b| b.close),
            ],
            fill_between: true,
        }
    }

    /// Bornes min/max de toutes les séries (pour l'axe Y)
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y));

        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), y| (min.min(y), max.max(y)));
        Some((min, max))
    }

    /// Nombre de points de la série la plus longue
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).max().unwrap_or(0)
    }
}

/// Résumé en cinq nombres d'une distribution (pour le box-plot)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Calcule le résumé d'une liste de valeurs
    ///
    /// Quartiles par interpolation linéaire sur les rangs (même convention
    /// que numpy par défaut). Retourne None si la liste est vide.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.50),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Quantile par interpolation linéaire (la slice doit être triée)
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Distribution du volume sous forme de box-plot horizontal
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBoxPlot {
    /// Titre affiché au-dessus du box-plot
    pub title: String,

    /// Résumé en cinq nombres du volume
    pub summary: FiveNumberSummary,
}

impl VolumeBoxPlot {
    /// Construit la distribution du volume d'une liste de barres
    pub fn of_volume(symbol: &str, bars: &[DailyBar]) -> Option<Self> {
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
        Some(Self {
            title: format!("{} Volume Distribution", symbol),
            summary: FiveNumberSummary::of(&volumes)?,
        })
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<DailyBar> {
        (1..=4u32)
            .map(|d| {
                let date = NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
                let base = 100.0 + d as f64;
                DailyBar::new(date, base, base + 5.0, base - 5.0, base + 1.0, base + 1.0, d as u64 * 100)
            })
            .collect()
    }

    #[test]
    fn test_price_figure_shape() {
        let fig = Figure::price_figure("AMZN", &bars());
        assert_eq!(fig.title, "AMZN Prices, Currency in USD");
        assert_eq!(fig.series.len(), 2);
        assert_eq!(fig.series[0].name, "Close");
        assert_eq!(fig.series[1].name, "Open");
        assert!(!fig.fill_between);
        assert_eq!(fig.point_count(), 4);
    }

    #[test]
    fn test_band_figure_shape() {
        let fig = Figure::band_figure(&bars());
        assert_eq!(fig.title, "High vs. Low Prices");
        assert_eq!(fig.series[0].name, "High");
        assert_eq!(fig.series[1].name, "Close");
        assert!(fig.fill_between);
    }

    #[test]
    fn test_value_bounds_cover_all_series() {
        let fig = Figure::band_figure(&bars());
        // High va de 106 à 109, Close de 102 à 105
        let (min, max) = fig.value_bounds().unwrap();
        assert_eq!(min, 102.0);
        assert_eq!(max, 109.0);
    }

    #[test]
    fn test_five_number_summary() {
        let summary = FiveNumberSummary::of(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 5.0);
    }

    #[test]
    fn test_quantile_interpolates() {
        // 4 valeurs : q1 tombe entre les rangs 0 et 1
        let summary = FiveNumberSummary::of(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(summary.q1, 17.5);
        assert_eq!(summary.median, 25.0);
        assert_eq!(summary.q3, 32.5);
    }

    #[test]
    fn test_summary_of_empty_is_none() {
        assert!(FiveNumberSummary::of(&[]).is_none());
    }

    #[test]
    fn test_volume_boxplot_title() {
        let plot = VolumeBoxPlot::of_volume("TSLA", &bars()).unwrap();
        assert_eq!(plot.title, "TSLA Volume Distribution");
        assert_eq!(plot.summary.min, 100.0);
        assert_eq!(plot.summary.max, 400.0);
    }
}

// ============================================================================
// Structure : PriceSeries (historique de prix journalier)
// ============================================================================
// Représente l'historique OHLCV d'un ticker sur la fenêtre glissante de
// 3 mois, une barre par jour de cotation
//
// CONCEPTS RUST :
// 1. NaiveDate : date sans timezone (une barre = un jour de cotation)
// 2. f64 pour les prix, u64 pour le volume (toujours positif)
// 3. Ownership : PriceSeries possède son Vec<DailyBar>
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Une barre de prix journalière (Open, High, Low, Close, Adj Close, Volume)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Jour de cotation
    pub date: NaiveDate,

    /// Prix d'ouverture
    pub open: f64,

    /// Prix le plus haut
    pub high: f64,

    /// Prix le plus bas
    pub low: f64,

    /// Prix de clôture
    pub close: f64,

    /// Clôture ajustée (dividendes et splits)
    pub adj_close: f64,

    /// Volume échangé
    pub volume: u64,
}

impl DailyBar {
    /// Constructeur : crée une nouvelle barre journalière
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        }
    }
}

/// Historique de prix d'un ticker, trié par date croissante
///
/// Invariant : non vide après un chargement réussi (fetch live ou snapshot).
/// Le tri est ré-appliqué défensivement par les chargeurs, la source pouvant
/// déjà être triée ou non.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbole du ticker
    pub symbol: String,

    /// Barres journalières, par date croissante
    pub bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Crée un historique vide pour un symbole
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    /// Ajoute une barre journalière
    pub fn push_bar(&mut self, bar: DailyBar) {
        self.bars.push(bar);
    }

    /// Retourne le nombre de barres
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Vérifie si l'historique est vide
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Trie les barres par date croissante
    ///
    /// CONCEPT RUST : sort_by_key
    /// - NaiveDate implémente Ord, le tri est direct
    /// - Tri stable : deux barres de même date gardent leur ordre
    pub fn sort_by_date(&mut self) {
        self.bars.sort_by_key(|bar| bar.date);
    }

    /// Retourne la barre la plus récente
    pub fn latest(&self) -> Option<&DailyBar> {
        self.bars.last()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn bar(d: u32, close: f64) -> DailyBar {
        DailyBar::new(day(d), close - 1.0, close + 2.0, close - 3.0, close, close, 1_000)
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("AMZN".to_string());
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }

    #[test]
    fn test_sort_by_date_defensive() {
        // La source peut arriver désordonnée : le tri la remet croissante
        let mut series = PriceSeries::new("AMZN".to_string());
        series.push_bar(bar(15, 102.0));
        series.push_bar(bar(11, 100.0));
        series.push_bar(bar(13, 101.0));

        series.sort_by_date();

        let dates: Vec<NaiveDate> = series.bars.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![day(11), day(13), day(15)]);
        assert_eq!(series.latest().unwrap().date, day(15));
    }

    #[test]
    fn test_sort_already_sorted_is_noop() {
        let mut series = PriceSeries::new("GOOG".to_string());
        series.push_bar(bar(11, 100.0));
        series.push_bar(bar(12, 101.0));

        let before = series.bars.clone();
        series.sort_by_date();
        assert_eq!(series.bars, before);
    }
}

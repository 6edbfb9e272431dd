// ============================================================================
// Snapshot store : repli CSV local
// ============================================================================
// Un fichier data/<TICKER>.csv par ticker, mêmes colonnes que la source live.
// C'est le dernier filet : si ce fichier manque ou est corrompu, l'erreur
// remonte telle quelle et le cycle de rendu échoue
// ============================================================================

use std::path::Path;

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{DailyBar, PriceSeries};

/// Une ligne du CSV snapshot, colonnes nommées comme la source
#[derive(Debug, Deserialize)]
struct SnapshotRow {
    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Open")]
    open: f64,

    #[serde(rename = "High")]
    high: f64,

    #[serde(rename = "Low")]
    low: f64,

    #[serde(rename = "Close")]
    close: f64,

    #[serde(rename = "Adj Close")]
    adj_close: f64,

    #[serde(rename = "Volume")]
    volume: u64,
}

/// Lit le snapshot CSV d'un ticker
///
/// Retourne un historique trié par date croissante. Toute erreur (fichier
/// absent, ligne corrompue, fichier vide) est fatale pour le cycle en cours.
pub fn read_snapshot(dir: &Path, symbol: &str) -> Result<PriceSeries> {
    let path = dir.join(format!("{}.csv", symbol));
    debug!(path = %path.display(), "Reading snapshot file");

    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("cannot open snapshot {}", path.display()))?;

    let mut series = PriceSeries::new(symbol.to_string());
    for (line, record) in reader.deserialize::<SnapshotRow>().enumerate() {
        let row = record
            .with_context(|| format!("corrupt row {} in {}", line + 1, path.display()))?;

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .with_context(|| format!("bad date {:?} in {}", row.date, path.display()))?;

        series.push_bar(DailyBar::new(
            date, row.open, row.high, row.low, row.close, row.adj_close, row.volume,
        ));
    }

    ensure!(!series.is_empty(), "snapshot {} has no rows", path.display());

    // Tri défensif, comme pour la source live
    series.sort_by_date();
    info!(ticker = %symbol, bars = series.len(), "Loaded snapshot data");
    Ok(series)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Écrit un CSV de test dans un sous-répertoire temporaire unique
    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stockdash-test-{}", name));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("AMZN.csv"), contents).unwrap();
        dir
    }

    const VALID_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-03-12,175.0,177.5,174.2,176.8,176.8,41000000
2024-03-11,174.0,176.0,172.9,175.1,175.1,39000000
";

    #[test]
    fn test_read_snapshot_sorts_ascending() {
        let dir = write_fixture("sorts", VALID_CSV);
        let series = read_snapshot(&dir, "AMZN").unwrap();

        assert_eq!(series.len(), 2);
        // Le fixture est décroissant : la lecture re-trie
        assert_eq!(
            series.bars[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
        assert_eq!(series.latest().unwrap().close, 176.8);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = std::env::temp_dir().join("stockdash-test-missing");
        fs::create_dir_all(&dir).unwrap();
        assert!(read_snapshot(&dir, "NOPE").is_err());
    }

    #[test]
    fn test_corrupt_row_is_an_error() {
        let dir = write_fixture(
            "corrupt",
            "Date,Open,High,Low,Close,Adj Close,Volume\n2024-03-11,abc,1,1,1,1,1\n",
        );
        assert!(read_snapshot(&dir, "AMZN").is_err());
    }

    #[test]
    fn test_header_only_file_is_an_error() {
        let dir = write_fixture("empty", "Date,Open,High,Low,Close,Adj Close,Volume\n");
        assert!(read_snapshot(&dir, "AMZN").is_err());
    }
}

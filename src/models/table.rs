// ============================================================================
// Structure : TableSpec (tableau d'historique récent)
// ============================================================================
// Le tableau affiche les 10 premières barres de l'historique dans l'ordre de
// tri courant, une colonne par champ, avec un formatage par type de cellule
// ============================================================================

use chrono::NaiveDate;

use crate::models::DailyBar;

/// En-têtes de colonnes, dans l'ordre d'affichage
pub const TABLE_HEADERS: [&str; 7] =
    ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

/// Nombre maximum de lignes affichées dans le tableau
pub const TABLE_ROW_LIMIT: usize = 10;

/// Contenu pré-formaté du tableau d'historique
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// En-têtes de colonnes
    pub headers: Vec<String>,

    /// Lignes du corps, cellules déjà formatées en texte
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// Construit le tableau depuis les premières barres de l'historique
    ///
    /// Exactement min(10, nombre de barres) lignes, dans l'ordre reçu.
    /// Formats de cellule :
    /// - Date : `DD Mon YYYY`
    /// - Prix (flottants) : tronqués en entier
    /// - Volume : tel quel
    pub fn from_bars(bars: &[DailyBar]) -> Self {
        let rows = bars
            .iter()
            .take(TABLE_ROW_LIMIT)
            .map(|bar| {
                vec![
                    format_date(bar.date),
                    format_price(bar.open),
                    format_price(bar.high),
                    format_price(bar.low),
                    format_price(bar.close),
                    format_price(bar.adj_close),
                    bar.volume.to_string(),
                ]
            })
            .collect();

        Self {
            headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

/// Formate une date de cellule : "11 Mar 2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Formate un prix de cellule : troncature en entier (pas d'arrondi)
pub fn format_price(value: f64) -> String {
    (value.trunc() as i64).to_string()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(d: u32, close: f64, volume: u64) -> DailyBar {
        let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        DailyBar::new(date, close - 0.5, close + 1.9, close - 2.1, close, close, volume)
    }

    #[test]
    fn test_headers() {
        let table = TableSpec::from_bars(&[]);
        assert_eq!(
            table.headers,
            vec!["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"]
        );
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_row_limit() {
        let bars: Vec<DailyBar> = (1..=15).map(|d| bar(d, 100.0, 1_000)).collect();
        let table = TableSpec::from_bars(&bars);
        assert_eq!(table.rows.len(), TABLE_ROW_LIMIT);
    }

    #[test]
    fn test_fewer_rows_than_limit() {
        let bars: Vec<DailyBar> = (1..=3).map(|d| bar(d, 100.0, 1_000)).collect();
        let table = TableSpec::from_bars(&bars);
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let bars = vec![bar(11, 100.0, 10), bar(12, 101.0, 20), bar(13, 99.0, 30)];
        let table = TableSpec::from_bars(&bars);
        let dates: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(dates, vec!["11 Mar 2024", "12 Mar 2024", "13 Mar 2024"]);
    }

    #[test]
    fn test_date_cell_format() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()), "05 Jan 2024");
    }

    #[test]
    fn test_price_cell_truncates() {
        // Troncature, pas arrondi : 101.9 -> 101
        assert_eq!(format_price(101.9), "101");
        assert_eq!(format_price(101.1), "101");
        assert_eq!(format_price(0.7), "0");
    }

    #[test]
    fn test_volume_cell_verbatim() {
        let table = TableSpec::from_bars(&[bar(11, 100.0, 123_456_789)]);
        assert_eq!(table.rows[0][6], "123456789");
    }
}

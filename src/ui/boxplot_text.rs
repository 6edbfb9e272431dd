// ============================================================================
// Box-plot Unicode - Distribution du volume
// ============================================================================
// Ratatui n'a pas de widget box-plot : on le dessine en texte, une ligne de
// caractères Unicode à l'échelle de la zone
//
//   ├────────┤████████▓████┣──────────┤
//  min       q1     médiane q3        max
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{FiveNumberSummary, VolumeBoxPlot};

/// Dessine le box-plot horizontal du volume dans la zone donnée
pub fn render_volume_boxplot(frame: &mut Frame, plot: &VolumeBoxPlot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", plot.title));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < 10 || inner.height < 3 {
        return; // zone trop petite pour un tracé lisible
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // espaceur
            Constraint::Length(1), // tracé
            Constraint::Length(1), // valeurs
            Constraint::Min(0),
        ])
        .split(inner);

    let width = inner.width as usize;
    let line = boxplot_line(&plot.summary, width);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            line,
            Style::default().fg(Color::Yellow),
        ))),
        chunks[1],
    );

    let labels = format!(
        "min {}   median {}   max {}",
        format_volume(plot.summary.min),
        format_volume(plot.summary.median),
        format_volume(plot.summary.max),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            labels,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center),
        chunks[2],
    );
}

/// Compose la ligne de tracé du box-plot à la largeur demandée
///
/// Fonction pure, testée sans terminal : moustaches en `─`, bornes en `├`/`┤`,
/// boîte q1..q3 en `█`, médiane en `▓`.
pub fn boxplot_line(summary: &FiveNumberSummary, width: usize) -> String {
    let width = width.max(5);
    let span = summary.max - summary.min;

    // Distribution dégénérée (toutes les valeurs égales) : une boîte pleine
    if span <= f64::EPSILON {
        return "█".repeat(width);
    }

    let col = |value: f64| -> usize {
        let ratio = (value - summary.min) / span;
        ((ratio * (width - 1) as f64).round() as usize).min(width - 1)
    };

    let (q1, med, q3) = (col(summary.q1), col(summary.median), col(summary.q3));
    let mut cells = vec![' '; width];

    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = if i == 0 {
            '├'
        } else if i == width - 1 {
            '┤'
        } else if i == med {
            '▓'
        } else if i >= q1 && i <= q3 {
            '█'
        } else {
            '─'
        };
    }

    cells.into_iter().collect()
}

/// Formate un volume en notation compacte (1.2B, 41M, 530K)
fn format_volume(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> FiveNumberSummary {
        FiveNumberSummary {
            min: 0.0,
            q1: 25.0,
            median: 50.0,
            q3: 75.0,
            max: 100.0,
        }
    }

    #[test]
    fn test_boxplot_line_width_and_bounds() {
        let line = boxplot_line(&summary(), 41);
        let chars: Vec<char> = line.chars().collect();
        assert_eq!(chars.len(), 41);
        assert_eq!(chars[0], '├');
        assert_eq!(chars[40], '┤');
    }

    #[test]
    fn test_boxplot_line_box_placement() {
        let line = boxplot_line(&summary(), 41);
        let chars: Vec<char> = line.chars().collect();
        // Quartiles à 25/50/75% d'une échelle 0..40
        assert_eq!(chars[10], '█');
        assert_eq!(chars[20], '▓');
        assert_eq!(chars[30], '█');
        assert_eq!(chars[5], '─'); // moustache basse
        assert_eq!(chars[35], '─'); // moustache haute
    }

    #[test]
    fn test_degenerate_distribution() {
        let flat = FiveNumberSummary {
            min: 7.0,
            q1: 7.0,
            median: 7.0,
            q3: 7.0,
            max: 7.0,
        };
        assert_eq!(boxplot_line(&flat, 10), "█".repeat(10));
    }

    #[test]
    fn test_format_volume_scales() {
        assert_eq!(format_volume(1_500_000_000.0), "1.5B");
        assert_eq!(format_volume(41_000_000.0), "41M");
        assert_eq!(format_volume(530_000.0), "530K");
        assert_eq!(format_volume(42.0), "42");
    }
}

// ============================================================================
// Enum : Recommendation (signal BUY / SELL)
// ============================================================================
// Valeur dérivée, jamais stockée : comparaison du close et de l'open de la
// barre la plus récente
// ============================================================================

use crate::models::DailyBar;

/// Signal d'achat ou de vente dérivé de la dernière barre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Close strictement supérieur à l'open (affiché en bleu)
    Buy,

    /// Close inférieur OU ÉGAL à l'open (affiché en rouge)
    Sell,
}

impl Recommendation {
    /// Dérive le signal depuis une barre journalière
    ///
    /// Tie-break : close == open tombe dans la branche Sell (test en
    /// supériorité stricte). Comportement conservé tel quel.
    pub fn from_bar(bar: &DailyBar) -> Self {
        if bar.close > bar.open {
            Recommendation::Buy
        } else {
            Recommendation::Sell
        }
    }

    /// Libellé affiché dans la carte de recommandation
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

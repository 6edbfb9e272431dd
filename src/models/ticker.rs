// ============================================================================
// Structure : Ticker (liste fixe de symboles)
// ============================================================================
// Les symboles proposés par le sélecteur forment une allow-list fermée :
// pas de saisie libre, la sélection est le seul état de session
// ============================================================================

/// Un symbole boursier proposé par le sélecteur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    /// Symbole (ex: "AAPL", "BTC-USD")
    pub symbol: &'static str,

    /// Nom complet affiché
    pub name: &'static str,
}

/// Symbole sélectionné par défaut au démarrage
pub const DEFAULT_SYMBOL: &str = "AMZN";

/// Retourne l'allow-list complète des tickers du sélecteur
///
/// CONCEPT RUST : &'static str
/// - Les symboles sont des littéraux embarqués dans le binaire
/// - Aucune allocation pour la liste de base
pub fn all() -> Vec<Ticker> {
    vec![
        Ticker { symbol: "GOOG", name: "Alphabet Inc." },
        Ticker { symbol: "AAPL", name: "Apple Inc." },
        Ticker { symbol: "AMZN", name: "Amazon.com Inc." },
        Ticker { symbol: "BTC-USD", name: "Bitcoin USD" },
        Ticker { symbol: "FB", name: "Meta Platforms" },
        Ticker { symbol: "TSLA", name: "Tesla Inc." },
        Ticker { symbol: "NVDA", name: "NVIDIA Corp." },
    ]
}

// ============================================================================
// Tests unitaires
// ============================================================================

// ============================================================================
// Structure : App
// ============================================================================
// État global du dashboard et les deux handlers réactifs :
// - horloge : re-formate l'heure UTC à chaque cadence du timer
// - sélection de ticker : déclenche un chargement et applique le
//   RenderPayload résultant en un seul remplacement atomique
//
// PATTERN : Application State
// - L'UI lit uniquement depuis App, toute modification passe par ses méthodes
// - Les résultats de chargement arrivent du worker avec un jeton de séquence :
//   seul le résultat de la requête la plus récente est appliqué
//   (last-request-wins), un résultat périmé est jeté entièrement
// ============================================================================

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::models::{ticker, RenderPayload, Ticker};

/// Format de l'horloge : "11 Mar 2024 at 14:05:33"
pub const CLOCK_FORMAT: &str = "%d %b %Y at %H:%M:%S";

/// Cadence par défaut du timer d'horloge, en secondes
pub const CLOCK_PERIOD_SECS: u64 = 60;

/// Formate l'heure UTC pour la carte d'horloge
///
/// Handler d'horloge complet : formatage pur, aucune autre région touchée.
pub fn format_clock(now: DateTime<Utc>) -> String {
    now.format(CLOCK_FORMAT).to_string()
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Allow-list de tickers du sélecteur
    pub tickers: Vec<Ticker>,

    /// Index du ticker sélectionné ; None = sélection vide (aucune mise à
    /// jour déclenchée, le rendu précédent persiste)
    pub selected_index: Option<usize>,

    /// Dernier payload appliqué (les six régions du dashboard)
    pub payload: Option<RenderPayload>,

    /// Texte de l'horloge (mis à jour par le timer uniquement)
    pub clock_text: String,

    /// Indique si un chargement est en cours
    pub is_loading: bool,

    /// Erreur du dernier cycle si le repli a échoué aussi
    pub load_error: Option<String>,

    /// Confirmation de sortie en attente (two-step quit)
    pub confirm_quit: bool,

    /// Jeton de la requête la plus récente émise
    latest_request: u64,
}

impl App {
    /// Crée l'état initial : allow-list complète, AMZN sélectionné
    pub fn new() -> Self {
        let tickers = ticker::all();
        let selected_index = tickers
            .iter()
            .position(|t| t.symbol == ticker::DEFAULT_SYMBOL);

        Self {
            running: true,
            tickers,
            selected_index,
            payload: None,
            clock_text: format_clock(Utc::now()),
            is_loading: false,
            load_error: None,
            confirm_quit: false,
            latest_request: 0,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Symbole actuellement sélectionné
    pub fn selected_symbol(&self) -> Option<&'static str> {
        self.selected_index
            .and_then(|i| self.tickers.get(i))
            .map(|t| t.symbol)
    }

    /// Sélectionne le ticker suivant (cycle)
    pub fn select_next(&mut self) {
        if let Some(i) = self.selected_index {
            self.selected_index = Some((i + 1) % self.tickers.len());
        }
    }

    /// Sélectionne le ticker précédent (cycle)
    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected_index {
            self.selected_index = Some((i + self.tickers.len() - 1) % self.tickers.len());
        }
    }

    // ========================================================================
    // Handler de mise à jour : séquencement et application atomique
    // ========================================================================

    /// Ouvre un nouveau cycle de chargement et retourne son jeton
    ///
    /// Tout résultat portant un jeton plus ancien sera ignoré à l'arrivée.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.is_loading = true;
        debug!(seq = self.latest_request, "Opened load cycle");
        self.latest_request
    }

    /// Applique le payload d'un cycle réussi
    ///
    /// Remplacement atomique : les six régions changent ensemble, l'erreur
    /// précédente est effacée. Un jeton périmé est jeté sans toucher l'état.
    pub fn apply_payload(&mut self, seq: u64, payload: RenderPayload) {
        if seq != self.latest_request {
            info!(seq, latest = self.latest_request, "Dropping stale payload");
            return;
        }

        self.payload = Some(payload);
        self.load_error = None;
        self.is_loading = false;
    }

    /// Enregistre l'échec d'un cycle (fetch ET snapshot en échec)
    ///
    /// Le corps du dashboard affichera l'erreur pour ce cycle : pas de rendu
    /// partiel. Même règle de péremption que pour les payloads.
    pub fn apply_load_error(&mut self, seq: u64, error: String) {
        if seq != self.latest_request {
            info!(seq, latest = self.latest_request, "Dropping stale load error");
            return;
        }

        warn!(error = %error, "Load cycle failed");
        self.load_error = Some(error);
        self.is_loading = false;
    }

    /// Met à jour le texte de l'horloge (timer tick)
    pub fn update_clock(&mut self, now: DateTime<Utc>) {
        self.clock_text = format_clock(now);
    }

    // ========================================================================
    // Two-step quit (pattern repris du reste de l'UI)
    // ========================================================================

    /// Première pression de 'q' : demande confirmation
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Toute autre touche annule la confirmation
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de sortie
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyBar, PriceSeries};
    use chrono::{NaiveDate, TimeZone};

    fn payload_for(symbol: &str) -> RenderPayload {
        let mut series = PriceSeries::new(symbol.to_string());
        series.push_bar(DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            100.0, 105.0, 99.0, 102.0, 102.0, 1_000,
        ));
        RenderPayload::build(&series).unwrap()
    }

    #[test]
    fn test_default_selection_is_amzn() {
        let app = App::new();
        assert_eq!(app.selected_symbol(), Some("AMZN"));
        assert!(app.payload.is_none());
    }

    #[test]
    fn test_selection_cycles() {
        let mut app = App::new();
        let count = app.tickers.len();
        for _ in 0..count {
            app.select_next();
        }
        assert_eq!(app.selected_symbol(), Some("AMZN")); // tour complet

        app.select_previous();
        assert_eq!(app.selected_symbol(), Some("AAPL"));

        app.select_next();
        assert_eq!(app.selected_symbol(), Some("AMZN"));
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut app = App::new();
        let seq = app.begin_request();
        app.apply_payload(seq, payload_for("AMZN"));
        let before_title = app.payload.as_ref().unwrap().title.clone();

        // Sélection vide : naviguer ne fait rien, le payload persiste
        app.selected_index = None;
        app.select_next();
        assert_eq!(app.selected_symbol(), None);
        assert_eq!(app.payload.as_ref().unwrap().title, before_title);
    }

    #[test]
    fn test_last_request_wins() {
        let mut app = App::new();
        let seq_amzn = app.begin_request();
        let seq_goog = app.begin_request();

        // Le résultat de la requête périmée arrive en dernier : il est jeté
        app.apply_payload(seq_goog, payload_for("GOOG"));
        app.apply_payload(seq_amzn, payload_for("AMZN"));

        assert_eq!(app.payload.as_ref().unwrap().title, "GOOG Stock Prices");
        assert!(!app.is_loading);
    }

    #[test]
    fn test_stale_error_is_dropped() {
        let mut app = App::new();
        let old_seq = app.begin_request();
        let new_seq = app.begin_request();

        app.apply_payload(new_seq, payload_for("AMZN"));
        app.apply_load_error(old_seq, "boom".to_string());

        assert!(app.load_error.is_none());
        assert!(app.payload.is_some());
    }

    #[test]
    fn test_payload_replaces_error_atomically() {
        let mut app = App::new();
        let seq = app.begin_request();
        app.apply_load_error(seq, "no snapshot".to_string());
        assert!(app.load_error.is_some());

        let seq = app.begin_request();
        app.apply_payload(seq, payload_for("TSLA"));
        assert!(app.load_error.is_none());
        assert_eq!(app.payload.as_ref().unwrap().title, "TSLA Stock Prices");
    }

    #[test]
    fn test_clock_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 11, 14, 5, 33).unwrap();
        assert_eq!(format_clock(now), "11 Mar 2024 at 14:05:33");
    }

    #[test]
    fn test_clock_update_touches_only_clock() {
        let mut app = App::new();
        let seq = app.begin_request();
        app.apply_payload(seq, payload_for("AMZN"));
        let payload_before = app.payload.clone();

        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 7).unwrap();
        app.update_clock(now);

        assert_eq!(app.clock_text, "01 Dec 2024 at 00:00:07");
        assert_eq!(app.payload, payload_before);
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.quit();
        assert!(!app.is_running());
    }
}

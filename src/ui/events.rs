// ============================================================================
// Gestion des événements
// ============================================================================
// Lecture clavier avec timeout : soit une touche, soit un Tick régulier qui
// cadence la boucle (et, par accumulation, le timer d'horloge)
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (cadence de la boucle)
    Tick,
}

/// Gestionnaire d'événements (stateless)
pub struct EventHandler;

impl EventHandler {
    /// Crée un nouveau gestionnaire d'événements
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant, timeout 250 ms)
    ///
    /// Timeout écoulé sans touche : Event::Tick.
    pub fn next(&self) -> Result<Event> {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    // Certains OS envoient Press ET Release : on ne garde que
                    // Press pour éviter les doublons
                    if key.kind == KeyEventKind::Press {
                        Ok(Event::Key(key))
                    } else {
                        Ok(Event::Tick)
                    }
                }
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : classification des touches
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est flèche droite ou 'l' (ticker suivant)
pub fn is_next_ticker_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L'))
    } else {
        false
    }
}

/// Vérifie si l'événement est flèche gauche ou 'h' (ticker précédent)
pub fn is_previous_ticker_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'r' (recharger le ticker courant)
pub fn is_refresh_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), event::KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key('q')));
        assert!(!is_quit_event(&key('x')));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_ticker_navigation_events() {
        assert!(is_next_ticker_event(&key('l')));
        assert!(is_previous_ticker_event(&key('h')));
        assert!(is_next_ticker_event(&Event::Key(KeyEvent::new(
            KeyCode::Right,
            event::KeyModifiers::empty()
        ))));
        assert!(!is_next_ticker_event(&key('h')));
    }

    #[test]
    fn test_is_refresh_event() {
        assert!(is_refresh_event(&key('r')));
        assert!(!is_refresh_event(&key('q')));
    }
}

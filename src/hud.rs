//! Score, lives and game-over display
//!
//! The page shows these outside the canvas. The host drains `GameEvent`s each
//! frame and forwards them here; nothing in the simulation touches the DOM.

use crate::sim::GameEvent;

/// Anything that can display the session's vital stats
pub trait Scoreboard {
    fn show_score(&mut self, score: u64);
    fn show_lives(&mut self, lives: u8);
    fn show_game_over(&mut self, final_score: u64);
    /// Back to a fresh session
    fn reset(&mut self, lives: u8);
}

pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn lives_text(lives: u8) -> String {
    "❤️".repeat(lives as usize)
}

/// Forward the display-relevant events to a scoreboard
pub fn apply_events<B: Scoreboard + ?Sized>(events: &[GameEvent], board: &mut B) {
    for event in events {
        match event {
            GameEvent::ScoreChanged { score } => board.show_score(*score),
            GameEvent::LivesChanged { lives } => board.show_lives(*lives),
            GameEvent::GameOver { score } => board.show_game_over(*score),
            GameEvent::ItemCollected { id, kind } => log::debug!("Caught {:?} #{}", kind, id),
            GameEvent::Parried { id } => log::debug!("Parried breath #{}", id),
            _ => {}
        }
    }
}

/// Scoreboard backed by `#score`, `#lives` and `#game-over` elements
#[cfg(target_arch = "wasm32")]
pub struct DomScoreboard {
    document: web_sys::Document,
}

#[cfg(target_arch = "wasm32")]
impl DomScoreboard {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn set_game_over_visible(&self, visible: bool) {
        use wasm_bindgen::JsCast;

        let Some(el) = self.document.get_element_by_id("game-over") else {
            return;
        };
        if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Scoreboard for DomScoreboard {
    fn show_score(&mut self, score: u64) {
        if let Some(el) = self.document.get_element_by_id("score") {
            el.set_text_content(Some(&score_text(score)));
        }
    }

    fn show_lives(&mut self, lives: u8) {
        if let Some(el) = self.document.get_element_by_id("lives") {
            el.set_text_content(Some(&lives_text(lives)));
        }
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.show_score(final_score);
        self.set_game_over_visible(true);
    }

    fn reset(&mut self, lives: u8) {
        self.show_score(0);
        self.show_lives(lives);
        self.set_game_over_visible(false);
    }
}

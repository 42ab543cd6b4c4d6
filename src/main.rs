//! Meat Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use meat_rush::assets::AssetRegistry;
    use meat_rush::assets::loader::{self, SpriteStore};
    use meat_rush::consts::*;
    use meat_rush::hud::{DomScoreboard, apply_events, Scoreboard};
    use meat_rush::platform::{FrameClock, KeySet};
    use meat_rush::renderer::canvas::CanvasTarget;
    use meat_rush::renderer::{DebugOverlay, draw_frame};
    use meat_rush::settings::Settings;
    use meat_rush::sim::{GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        keys: KeySet,
        settings: Settings,
        assets: Rc<RefCell<AssetRegistry>>,
        target: CanvasTarget,
        board: DomScoreboard,
        /// Whether an animation frame is scheduled
        running: bool,
    }

    impl Game {
        /// Run the fixed steps owed for this frame, then draw
        fn frame(&mut self, time: f64) {
            let steps = self.clock.advance(time);
            let input = self.keys.tick_input();
            for _ in 0..steps {
                tick(&mut self.state, &input, SIM_DT_MS);
                if self.state.is_game_over() {
                    break;
                }
            }

            let events = self.state.drain_events();
            apply_events(&events, &mut self.board);

            let overlay = DebugOverlay { fps: self.clock.fps() };
            draw_frame(
                &self.state,
                &self.assets.borrow(),
                &self.settings,
                &overlay,
                &mut self.target,
            );
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.clock.reset();
            self.keys.clear();
            self.board.reset(self.state.lives);
            log::info!("Restarted with seed: {}", seed);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Meat Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed);
        log::info!("Game initialized with seed: {}", seed);

        let assets = Rc::new(RefCell::new(AssetRegistry::with_catalogue(
            state.tuning.bad_fruit_variants,
        )));
        let sprites = Rc::new(RefCell::new(SpriteStore::new()));
        if let Err(e) = loader::load_all(&assets, &sprites, state.tuning.bad_fruit_variants) {
            log::warn!("Sprite loading unavailable, using placeholders: {}", e);
        }

        let mut board = DomScoreboard::new(document);
        board.reset(state.lives);

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(),
            keys: KeySet::new(),
            settings: Settings::load(),
            assets,
            target: CanvasTarget::new(ctx, sprites),
            board,
            running: true,
        }));

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);
        log::info!("Meat Rush running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down: movement, restart, overlay toggle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if KeySet::is_game_key(&key) {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                g.keys.press(&key);

                match key.as_str() {
                    "r" | "R" if g.state.is_game_over() => {
                        g.restart(js_sys::Date::now() as u64);
                        if !g.running {
                            g.running = true;
                            drop(g);
                            request_animation_frame(game.clone());
                        }
                    }
                    "o" | "O" => {
                        g.settings.show_debug_overlay = !g.settings.show_debug_overlay;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus lost: keyup events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);

            // Game over is terminal: stop scheduling frames until restart
            if g.state.is_game_over() {
                g.running = false;
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use meat_rush::assets::AssetRegistry;
    use meat_rush::consts::SIM_DT_MS;
    use meat_rush::renderer::{CommandRecorder, DebugOverlay, draw_frame};
    use meat_rush::settings::Settings;
    use meat_rush::sim::{Bounds, GameEvent, GameState, TickInput, tick};
    use meat_rush::tuning::Tuning;

    /// Five minutes of play at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 5;

    /// Steer toward the most urgent target: incoming breath first, then the
    /// lowest catchable item
    fn autopilot(state: &GameState) -> TickInput {
        let player_x = state.player.bounds().center().x;

        let breath = state
            .projectiles
            .iter()
            .filter(|p| !p.is_parried())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.bounds().center().x);
        let item = state
            .items
            .iter()
            .filter(|i| !i.kind.is_harmful())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|i| i.bounds().center().x);

        match breath.or(item) {
            Some(x) if x < player_x - 5.0 => TickInput { left: true, right: false },
            Some(x) if x > player_x + 5.0 => TickInput { left: false, right: true },
            _ => TickInput::default(),
        }
    }

    fn load_tuning(path: &str) -> Tuning {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
        let tuning = args.next().map(|p| load_tuning(&p)).unwrap_or_default();

        let mut state = GameState::with_config(seed, tuning, Bounds::default());
        log::info!("Headless run with seed {}", seed);

        let mut caught = 0u32;
        let mut parries = 0u32;
        while !state.is_game_over() && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT_MS);
            for event in state.drain_events() {
                match event {
                    GameEvent::ItemCollected { .. } => caught += 1,
                    GameEvent::Parried { .. } => parries += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Finished after {} ticks: score {}, lives {}, gear {}, bosses defeated {}, {} catches, {} parries",
            state.time_ticks,
            state.score,
            state.lives,
            state.player.gear.as_str(),
            state.boss_level,
            caught,
            parries
        );

        let mut recorder = CommandRecorder::new();
        draw_frame(
            &state,
            &AssetRegistry::new(),
            &Settings::load(),
            &DebugOverlay::default(),
            &mut recorder,
        );
        log::info!("Final frame: {} draw calls", recorder.commands.len());

        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Meat Rush (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

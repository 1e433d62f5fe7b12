//! Treasure Isle entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build owns the DOM wiring (keyboard, HUD, audio toggles) and
//! hands each tick's snapshot to the page's renderer; the native build runs
//! a short headless session for smoke-testing the sim.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use treasure_isle::Settings;
    use treasure_isle::audio::AudioManager;
    use treasure_isle::sim::{GameState, Snapshot, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                audio,
                settings,
            }
        }

        /// One host frame: exactly one sim step, then effects and snapshot
        fn frame(&mut self) {
            let input = self.input;
            let events = tick(&mut self.state, &input);
            // Restart is a one-shot; movement intents stay held
            self.input.restart = false;

            for event in events {
                self.audio.handle_event(event);
            }
            self.audio.pump();

            let snapshot = self.state.snapshot();
            publish_snapshot(&snapshot);
            update_hud(&snapshot);
        }
    }

    /// Hand the frame snapshot to the page's rendering collaborator, if one
    /// is registered as `window.renderFrame(json)`. The snapshot is a plain
    /// serialized value; the renderer can't reach back into the sim.
    fn publish_snapshot(snapshot: &Snapshot) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str("renderFrame")) else {
            return;
        };
        let Ok(func) = hook.dyn_into::<js_sys::Function>() else {
            return;
        };
        if let Ok(json) = serde_json::to_string(snapshot) {
            let _ = func.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }

    /// Mirror score / treasure count / win banner into the HUD
    fn update_hud(snapshot: &Snapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&format!("{:06}", snapshot.score)));
        }

        if let Some(el) = document.get_element_by_id("hud-treasures") {
            let collected = snapshot.treasures.iter().filter(|t| t.collected).count();
            el.set_text_content(Some(&format!("{}/{}", collected, snapshot.treasures.len())));
        }

        if let Some(el) = document.get_element_by_id("win-banner") {
            let class = if snapshot.won { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Treasure Isle starting...");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(game.clone());
        setup_audio_toggles(game.clone());

        request_animation_frame(game);

        log::info!("Treasure Isle running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keydown: set held intents; first gesture also resumes audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" | "Space" => g.input.jump = true,
                    "KeyR" => g.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup: clear held intents
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" | "Space" => g.input.jump = false,
                    "KeyR" => g.input.restart = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // First click resumes the audio context too
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow().audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_audio_toggles(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("music-toggle") {
            let game = game.clone();
            let btn_el = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let on = !g.audio.music_enabled();
                g.audio.set_music_enabled(on);
                g.settings.music_enabled = on;
                g.settings.save();
                btn_el.set_text_content(Some(if on { "Music: ON" } else { "Music: OFF" }));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("sfx-toggle") {
            let btn_el = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let on = !g.audio.sfx_enabled();
                g.audio.set_sfx_enabled(on);
                g.settings.sfx_enabled = on;
                g.settings.save();
                btn_el.set_text_content(Some(if on { "SFX: ON" } else { "SFX: OFF" }));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use treasure_isle::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Treasure Isle (native) starting...");
    log::info!("Headless smoke run - the web build is the playable one");

    let mut state = GameState::new(42);
    let mut events_seen = Vec::new();

    // Walk right and hop for a few seconds of sim time
    for i in 0..600u32 {
        let input = TickInput {
            right: true,
            jump: i % 90 == 0,
            ..Default::default()
        };
        events_seen.extend(tick(&mut state, &input));
    }

    let jumps = events_seen
        .iter()
        .filter(|e| **e == GameEvent::Jump)
        .count();
    let collected = state.treasures.iter().filter(|t| t.collected).count();
    log::info!(
        "after {} ticks: x={:.1} score={} jumps={} treasures={}/{}",
        state.time_ticks,
        state.player.pos.x,
        state.score,
        jumps,
        collected,
        state.treasures.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

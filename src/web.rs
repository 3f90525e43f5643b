//! Browser binding
//!
//! Exposes player intents and the current `Screen` (as JSON) to the page.
//! Controller events are flushed into the audio manager after every call.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Math Adventure (web) starting...");
}

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    audio: AudioManager,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64
            ^ (js_sys::Date::now() as u64);
        let settings = Settings::load();
        WebGame {
            game: Game::new(seed),
            audio: AudioManager::from_settings(&settings),
            settings,
        }
    }

    pub fn start_game(&mut self) -> Result<(), JsValue> {
        self.run(Game::start_game)
    }

    pub fn start_level(&mut self) -> Result<(), JsValue> {
        self.run(Game::start_level)
    }

    pub fn start_boss(&mut self, is_final: bool) -> Result<(), JsValue> {
        self.run(|g| g.start_boss(is_final))
    }

    pub fn answer(&mut self, value: u32) -> Result<(), JsValue> {
        self.run(|g| g.handle_answer(value).map(|_| ()))
    }

    pub fn next_question(&mut self) -> Result<(), JsValue> {
        self.run(Game::next_question)
    }

    pub fn next_world(&mut self) -> Result<(), JsValue> {
        self.run(Game::next_world)
    }

    pub fn enter_final_boss(&mut self) -> Result<(), JsValue> {
        self.run(Game::enter_final_boss)
    }

    pub fn retry(&mut self) -> Result<(), JsValue> {
        self.run(Game::retry)
    }

    pub fn return_to_menu(&mut self) -> Result<(), JsValue> {
        self.run(Game::return_to_menu)
    }

    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.run(|g| {
            g.restart();
            Ok(())
        })
    }

    /// The screen's primary button
    pub fn advance(&mut self) -> Result<(), JsValue> {
        self.run(Game::advance)
    }

    /// Call once per second from `setInterval`
    pub fn tick(&mut self) -> bool {
        self.game.tick()
    }

    /// Flip sound on/off and persist the choice; returns `sound_enabled`
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.settings.toggle_sound();
        self.audio.apply_settings(&self.settings);
        self.settings.save();
        enabled
    }

    pub fn screen_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.screen()).map_err(|e| to_js(e.into()))
    }

    /// Release audio when the page goes away
    pub fn dispose(&mut self) {
        self.audio.dispose();
    }
}

impl WebGame {
    /// Run an intent, then play whatever it triggered
    fn run(&mut self, intent: impl FnOnce(&mut Game) -> GameResult<()>) -> Result<(), JsValue> {
        // Every intent comes from a user gesture, so audio may start now
        self.audio.init();
        let result = intent(&mut self.game);
        let events = self.game.drain_events();
        self.audio.handle_events(&events);
        result.map_err(to_js)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

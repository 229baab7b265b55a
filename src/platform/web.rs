//! Browser bindings
//!
//! Thin `wasm_bindgen` wrapper around [`Game`]: LocalStorage persistence,
//! `navigator.vibrate` haptics, and JSON snapshots for a JS renderer. The
//! page owns the animation loop and DOM; it calls in here once per frame.

use wasm_bindgen::prelude::*;

use crate::feedback::{Cue, FeedbackSink};
use crate::game::Game;
use crate::persistence::{LocalStorageBackend, Storage};
use crate::platform::LocalClock;
use crate::settings::Settings;
use crate::sim::{TickInput, system_random};
use crate::tuning::Tuning;

/// LocalStorage key for the save blob
pub const STORAGE_KEY: &str = "flappy_remix_v1";

/// Haptics through the Vibration API; sound cues are logged for the page
struct WebFeedback;

impl FeedbackSink for WebFeedback {
    fn play(&mut self, cue: Cue) {
        log::trace!("cue {:?}", cue);
    }

    fn vibrate(&mut self, ms: u32) {
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(ms);
        }
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Flap Remix core loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let storage = Storage::open(Box::new(LocalStorageBackend::new(STORAGE_KEY)));
        WebGame {
            game: Game::new(
                Tuning::default(),
                storage,
                Box::new(WebFeedback),
                Box::new(LocalClock),
                system_random(),
            ),
        }
    }

    /// Advance one frame; `dt` in seconds, `flap_held` for hold assist
    pub fn tick(&mut self, dt: f32, flap_held: bool) {
        self.game.tick(dt, TickInput { flap_held });
    }

    pub fn flap(&mut self) {
        self.game.handle_flap();
    }

    #[wasm_bindgen(js_name = startRun)]
    pub fn start_run(&mut self, practice: bool, instant: bool) {
        self.game.start_run(practice, instant);
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    #[wasm_bindgen(js_name = quitToHome)]
    pub fn quit_to_home(&mut self) {
        self.game.quit_to_home();
    }

    /// Hook to `visibilitychange` (hidden) and window `blur`
    #[wasm_bindgen(js_name = focusLost)]
    pub fn focus_lost(&mut self) {
        self.game.focus_lost();
    }

    #[wasm_bindgen(js_name = focusGained)]
    pub fn focus_gained(&mut self) {
        self.game.focus_gained();
    }

    #[wasm_bindgen(js_name = uiTap)]
    pub fn ui_tap(&mut self) {
        self.game.ui_tap();
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.frame()).map_err(js_err)
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.settings()).map_err(js_err)
    }

    /// Replace settings from JSON; unknown or missing fields fall back to defaults
    #[wasm_bindgen(js_name = setSettingsJson)]
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings = serde_json::from_str(json).map_err(js_err)?;
        self.game.set_settings(settings);
        Ok(())
    }

    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.stats()).map_err(js_err)
    }

    #[wasm_bindgen(js_name = dailyMissionsJson)]
    pub fn daily_missions_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.daily_missions()).map_err(js_err)
    }

    #[wasm_bindgen(js_name = resetAllData)]
    pub fn reset_all_data(&mut self) {
        self.game.reset_all_data();
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use dino_dash::renderer::{Palette, RenderState};
    use dino_dash::sim::GameState;
    use dino_dash::{FrameDriver, FrameOutcome, Preset, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            Self {
                driver: FrameDriver::new(GameState::new(tuning, seed)),
                render_state: None,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.driver.state.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&snapshot) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update score and game over overlays in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.driver.state;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if state.is_game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Preset from `data-preset`, optionally overridden by `data-tuning` JSON
    fn load_tuning(canvas: &HtmlCanvasElement) -> (Preset, Tuning) {
        let preset = canvas
            .get_attribute("data-preset")
            .and_then(|s| Preset::from_str(&s))
            .unwrap_or_default();

        let tuning = match canvas.get_attribute("data-tuning") {
            Some(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::warn!("{}; using {} preset", e, preset.as_str());
                    preset.tuning()
                }
            },
            None => preset.tuning(),
        };

        (preset, tuning)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Dino Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (preset, mut tuning) = load_tuning(&canvas);
        // The canvas attributes define the logical playfield
        tuning.viewport_width = canvas.width() as f32;
        tuning.viewport_height = canvas.height() as f32;
        log::info!(
            "Preset {} with {}x{} viewport",
            preset.as_str(),
            tuning.viewport_width,
            tuning.viewport_height
        );

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, Palette::for_preset(preset))
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Dino Dash running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        g.driver.request_jump();
                    }
                    "i" | "I" => {
                        g.driver.autopilot = !g.driver.autopilot;
                        log::info!("Idle mode: {}", g.driver.autopilot);
                    }
                    _ => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Tap to jump
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().driver.request_jump();
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = g.driver.frame();
            g.render();
            g.update_hud();
            outcome
        };

        // After game over the last frame stays on screen and nothing is scheduled
        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays each preset until it crashes
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_dash::sim::GameState;
    use dino_dash::{FrameDriver, Preset};

    /// About 10 minutes at 60 fps
    const MAX_FRAMES: u64 = 36_000;

    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    for preset in [Preset::Classic, Preset::Flat] {
        let mut driver = FrameDriver::new(GameState::new(preset.tuning(), 0xD1A0));
        driver.autopilot = true;
        let frames = driver.run_headless(MAX_FRAMES);
        let state = &driver.state;
        println!(
            "{:<8} score {:>4}  frames {:>6}  speed {:>6.2}  {}",
            preset.as_str(),
            state.score,
            frames,
            state.game_speed,
            if state.is_game_over { "crashed" } else { "survived" }
        );
    }
}

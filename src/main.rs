//! Shape Hunt entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use shape_hunt::Settings;
    use shape_hunt::platform::web::{self, Hud};
    use shape_hunt::renderer::{CanvasSurface, Frame};
    use shape_hunt::sim::{SimState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: SimState,
        surface: CanvasSurface,
        hud: Hud,
        input: TickInput,
        frame: Frame,
    }

    impl Game {
        fn update(&mut self) {
            self.frame.clear();
            tick(&mut self.state, &self.input, &mut self.frame);
            self.input.clear();
        }

        fn render(&mut self) {
            self.frame.replay(&mut self.surface, self.state.viewport);
        }

        fn update_hud(&self) {
            if let Some(count) = self.frame.counter {
                self.hud.show_count(count);
            }
            if self.frame.end_visible {
                self.hud.show_end();
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Shape Hunt starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas = web::find_canvas(&document)?;
        let viewport = web::window_viewport(&window);
        web::fit_canvas(&canvas, viewport);
        let surface = CanvasSurface::new(web::context_2d(&canvas)?);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = SimState::seeded(seed, viewport, &settings);
        log::info!("Game initialized with seed: {}", seed);

        let hud = Hud::find(&document);
        hud.show_count(state.displayed_count);

        let game = Rc::new(RefCell::new(Game {
            state,
            surface,
            hud,
            input: TickInput::default(),
            frame: Frame::default(),
        }));

        setup_input_handlers(&window, &canvas, game.clone())?;

        // Start frame loop
        request_animation_frame(game);

        log::info!("Shape Hunt running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Click spawns a shape at the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input
                    .clicks
                    .push((event.client_x() as f64, event.client_y() as f64));
            });
            window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize keeps the canvas matched to the window
        {
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let viewport = web::window_viewport(&window);
                web::fit_canvas(&canvas, viewport);
                game.borrow_mut().input.resize = Some(viewport);
                log::debug!("Resized to {}x{}", viewport.width, viewport.height);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let halted = {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
            g.state.is_halted()
        };

        if halted {
            log::info!("All shapes caught, frame loop stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shape_hunt::Settings;
    use shape_hunt::consts::{HEADLESS_HEIGHT, HEADLESS_WIDTH};
    use shape_hunt::renderer::Frame;
    use shape_hunt::sim::{SimEvent, SimState, TickInput, Viewport, tick};

    env_logger::init();
    log::info!("Shape Hunt (headless) starting...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => match Settings::from_file(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load {}: {}", path.to_string_lossy(), e);
                std::process::exit(1);
            }
        },
        None => Settings::load(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let viewport = Viewport::new(HEADLESS_WIDTH, HEADLESS_HEIGHT);
    let mut state = SimState::seeded(seed, viewport, &settings);
    log::info!(
        "Seed {}, counter refresh {}",
        seed,
        settings.counter_refresh.as_str()
    );

    let input = TickInput::default();
    let mut frame = Frame::default();
    let mut captures = 0usize;
    while state.is_running() && state.time_ticks < settings.max_ticks {
        frame.clear();
        tick(&mut state, &input, &mut frame);
        for event in &frame.events {
            if matches!(event, SimEvent::Captured { .. }) {
                captures += 1;
            }
            if log::log_enabled!(log::Level::Debug) {
                match serde_json::to_string(event) {
                    Ok(json) => log::debug!("tick {}: {}", state.time_ticks, json),
                    Err(e) => log::warn!("Could not serialize event: {}", e),
                }
            }
        }
    }

    if state.is_running() {
        log::info!(
            "Stopped after {} ticks with {} shapes left ({} caught)",
            state.time_ticks,
            state.live_count(),
            captures
        );
    } else {
        log::info!(
            "All shapes caught after {} ticks ({} captures)",
            state.time_ticks,
            captures
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

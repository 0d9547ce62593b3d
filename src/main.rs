//! Fish Tank entry point
//!
//! Handles platform-specific initialization and runs the tank loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent, PageTransitionEvent};

    use fish_tank::Settings;
    use fish_tank::error::{Result, TankError};
    use fish_tank::platform::{self, FrameClock};
    use fish_tank::renderer::{RenderState, scene};
    use fish_tank::sim::{Tank, Viewport};

    const CANVAS_ID: &str = "tank";
    const HINT_TEXT: &str = "Click anywhere to feed the fish!";

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// A DOM listener we registered and must remove on teardown
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn attach(
            target: &EventTarget,
            kind: &'static str,
            callback: Closure<dyn FnMut(web_sys::Event)>,
        ) -> Result<Self> {
            target
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
                .map_err(|e| TankError::Js(format!("{kind} listener: {e:?}")))?;
            Ok(Self {
                target: target.clone(),
                kind,
                callback,
            })
        }

        fn detach(&self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        }
    }

    /// Tank instance holding all state
    struct App {
        tank: Tank,
        settings: Settings,
        clock: FrameClock,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        hint: Option<web_sys::Element>,
        frame_handle: Option<i32>,
        frame_callback: Option<FrameCallback>,
        listeners: Vec<Listener>,
        suspended: bool,
        closed: bool,
    }

    impl App {
        /// Advance the sim to this frame and draw it
        fn frame(&mut self, time: f64) {
            let sim_now = self.clock.frame(time);
            self.tank.advance_to(sim_now);

            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.tank, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Drop food where the canvas was clicked
        fn click(&mut self, event: &MouseEvent) {
            let rect = self.canvas.get_bounding_client_rect();
            let p = platform::tank_point(
                event.client_x() as f64,
                event.client_y() as f64,
                rect.left(),
                rect.top(),
            );
            self.tank.spawn_food(p.x, p.y);

            // First feeding retires the hint for good
            if let Some(hint) = self.hint.take() {
                hint.remove();
                self.settings.show_hint = false;
                self.settings.save();
            }
        }

        /// Re-read the canvas size and push it to the GPU surface and the tank
        fn resize(&mut self) {
            let (width, height, view) = measure(&self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, view);
            }
            self.tank.set_viewport(view);
        }

        fn cancel_frame(&mut self) {
            if let Some(handle) = self.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        /// Page went into the back/forward cache: stop drawing, keep the tank
        fn suspend(&mut self) {
            if self.closed || self.suspended {
                return;
            }
            self.suspended = true;
            self.cancel_frame();
            self.clock.pause();
            log::info!("Fish tank suspended");
        }

        /// Page restored from the back/forward cache
        fn resume(&mut self) {
            if self.closed || !self.suspended {
                return;
            }
            self.suspended = false;

            let handle = match self.frame_callback.as_ref() {
                Some(callback) => match callback.borrow().as_ref() {
                    Some(cb) => request_frame(cb),
                    None => return,
                },
                None => return,
            };
            match handle {
                Ok(handle) => {
                    self.frame_handle = Some(handle);
                    log::info!("Fish tank resumed");
                }
                Err(e) => log::error!("Could not resume animation: {}", e),
            }
        }

        /// Release the animation frame, every listener, and every tank timer
        fn teardown(&mut self) {
            if self.closed {
                return;
            }
            self.closed = true;

            self.cancel_frame();
            if let Some(callback) = self.frame_callback.take() {
                callback.borrow_mut().take();
            }
            // Closures stay owned here; the pagehide one is still running
            for listener in &self.listeners {
                listener.detach();
            }
            if let Some(hint) = self.hint.take() {
                hint.remove();
            }
            self.tank.shutdown();
            self.render_state = None;
            log::info!("Fish tank torn down");
        }
    }

    /// Canvas size: (physical width, physical height, CSS viewport)
    fn measure(canvas: &HtmlCanvasElement) -> (u32, u32, Viewport) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (width, height, Viewport::new(client_w as f32, client_h as f32))
    }

    fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32> {
        let window = web_sys::window().ok_or(TankError::NoWindow)?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| TankError::Js(format!("requestAnimationFrame: {e:?}")))
    }

    /// Put the feeding hint over the canvas
    fn show_hint(document: &web_sys::Document, canvas: &HtmlCanvasElement) -> Result<web_sys::Element> {
        let hint = document
            .create_element("div")
            .map_err(|e| TankError::Js(format!("create hint: {e:?}")))?;
        hint.set_text_content(Some(HINT_TEXT));
        let _ = hint.set_attribute(
            "style",
            "position:absolute;top:16px;left:16px;color:rgba(255,255,255,0.8);\
             font:500 18px sans-serif;text-shadow:0 2px 6px rgba(0,0,0,0.4);\
             pointer-events:none;",
        );
        if let Some(parent) = canvas.parent_element() {
            parent
                .append_child(&hint)
                .map_err(|e| TankError::Js(format!("append hint: {e:?}")))?;
        }
        Ok(hint)
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| TankError::Js(format!("logger: {e}")))?;

        log::info!("Fish Tank starting...");

        let window = web_sys::window().ok_or(TankError::NoWindow)?;
        let document = window.document().ok_or(TankError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| TankError::MissingElement(CANVAS_ID.into()))?
            .dyn_into()
            .map_err(|_| TankError::NotCanvas(CANVAS_ID.into()))?;

        let (width, height, view) = measure(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let tank = Tank::new(seed, view, 0);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, view).await?;

        let hint = if settings.show_hint {
            Some(show_hint(&document, &canvas)?)
        } else {
            None
        };

        let app = Rc::new(RefCell::new(App {
            tank,
            settings,
            clock: FrameClock::new(0),
            render_state: Some(render_state),
            canvas: canvas.clone(),
            hint,
            frame_handle: None,
            frame_callback: None,
            listeners: Vec::new(),
            suspended: false,
            closed: false,
        }));

        setup_listeners(&app, &window, &canvas)?;
        start_frames(&app)?;
        setup_page_lifecycle(&app, &window)?;

        log::info!("Fish Tank running!");
        Ok(())
    }

    fn setup_listeners(
        app: &Rc<RefCell<App>>,
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
    ) -> Result<()> {
        let click = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    app.borrow_mut().click(mouse);
                }
            })
        };
        let click = Listener::attach(canvas, "click", click)?;

        let resize = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            })
        };
        let resize = Listener::attach(window, "resize", resize)?;

        app.borrow_mut().listeners.extend([click, resize]);
        Ok(())
    }

    fn start_frames(app: &Rc<RefCell<App>>) -> Result<()> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let frame_app = app.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let mut a = frame_app.borrow_mut();
            if a.closed || a.suspended {
                return;
            }
            a.frame(time);
            if let Some(cb) = next.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(handle) => a.frame_handle = Some(handle),
                    Err(e) => log::error!("Animation stopped: {}", e),
                }
            }
        }));

        let handle = match callback.borrow().as_ref() {
            Some(cb) => request_frame(cb)?,
            None => return Ok(()),
        };

        let mut a = app.borrow_mut();
        a.frame_handle = Some(handle);
        a.frame_callback = Some(callback);
        Ok(())
    }

    /// Suspend while in the back/forward cache, tear down when the page is
    /// really going away
    fn setup_page_lifecycle(app: &Rc<RefCell<App>>, window: &web_sys::Window) -> Result<()> {
        let persisted = |event: &web_sys::Event| {
            event
                .dyn_ref::<PageTransitionEvent>()
                .map(|e| e.persisted())
                .unwrap_or(false)
        };

        let on_hide = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if persisted(&event) {
                    a.suspend();
                } else {
                    a.teardown();
                }
            })
        };
        let on_hide = Listener::attach(window, "pagehide", on_hide)?;

        let on_show = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if persisted(&event) {
                    app.borrow_mut().resume();
                }
            })
        };
        let on_show = Listener::attach(window, "pageshow", on_show)?;

        app.borrow_mut().listeners.extend([on_hide, on_show]);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Fish Tank failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fish Tank (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_feeding();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Run a scripted feeding session and log what the fish did
#[cfg(not(target_arch = "wasm32"))]
fn headless_feeding() {
    use fish_tank::Settings;
    use fish_tank::platform;
    use fish_tank::renderer::scene;
    use fish_tank::sim::{Tank, Viewport};

    const SESSION_MS: u64 = 20_000;
    const FEED_EVERY_MS: u64 = 1_500;

    let started = platform::now_ms();
    let settings = Settings::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut tank = Tank::new(seed, Viewport::default(), 0);
    let mut feeds = 0usize;
    let mut chasing_peak = 0usize;

    for t in (0..=SESSION_MS).step_by(50) {
        tank.advance_to(t);

        if t > 0 && t % FEED_EVERY_MS == 0 {
            // Drop food just ahead of one fish, rotating through the school
            let school = tank.fish().len().max(1);
            if let Some(fish) = tank.fish().get(feeds % school) {
                let spot = fish.center() + fish.dir() * 20.0;
                tank.spawn_food(spot.x, spot.y);
                feeds += 1;
            }
        }

        let chasing = tank.fish().iter().filter(|f| f.target().is_some()).count();
        chasing_peak = chasing_peak.max(chasing);

        if t % 5_000 == 0 {
            log::info!(
                "t={:>5}ms food={} chasing={} vertices={}",
                t,
                tank.food().len(),
                chasing,
                scene::build(&tank, &settings).len()
            );
        }
    }

    tank.shutdown();
    log::info!(
        "Session done: {} feedings, peak {} fish chasing, {:.1}ms wall time",
        feeds,
        chasing_peak,
        platform::now_ms() - started
    );
    if tank.is_running() || tank.active_timers() > 0 {
        log::warn!("{} timers still active after shutdown", tank.active_timers());
    }
}

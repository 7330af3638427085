//! Jelly-scroll: momentum scroll simulation with a speed-driven skew effect.
//!
//! Native scrolling is suppressed; wheel and touch input feed a clamped
//! scroll offset, the container is tweened toward it every animation frame,
//! and the tracked sections are skewed in proportion to scroll speed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Event, TouchEvent, WheelEvent, Window};

mod config;
mod dom;
mod rate;
mod state;
mod tween;
mod wheel;

pub use config::{Config, Options};

use dom::{Page, clog};
use rate::{Debounce, Throttle};
use state::{InertiaDecay, ScrollState, TouchState};
use tween::{Tween, retarget_slot};

/// Container translation tween length.
const SCROLL_TWEEN_MS: f64 = 500.0;
/// Skew-toward-speed tween length.
const SKEW_TWEEN_MS: f64 = 1000.0;
/// Skew-back-to-neutral tween length, used once scrolling settles.
const SKEW_IDLE_TWEEN_MS: f64 = 400.0;
/// Inertia decay period, one tick per frame-ish.
const INERTIA_PERIOD_MS: i32 = 16;
/// Resize handling windows.
const RESIZE_DEBOUNCE_MS: f64 = 100.0;
const RESIZE_THROTTLE_MS: f64 = 100.0;

/// Everything the event handlers and the frame tick mutate. Owned behind a
/// single `Rc<RefCell<_>>`; handlers clone the Rc, never the state.
struct Controller {
    config: Config,
    page: Page,
    scroll: ScrollState,
    touch: TouchState,
    /// True from first input until the scroll tween completes.
    is_scrolling: bool,
    /// Parallel flag for an active touch gesture (including inertia).
    is_touch_move: bool,
    /// Frame timestamp of the last active skew computation.
    last_time: f64,
    scroll_tween: Option<Tween>,
    skew_tween: Option<Tween>,
    /// Last values written to the DOM; retarget sources for replace-in-place.
    rendered_scroll: f64,
    rendered_skew: f64,
    resize_debounce: Debounce,
    resize_throttle: Throttle,
    inertia: Option<InertiaDecay>,
    inertia_timer: Option<i32>,
    /// Kept alive while the interval runs; dropped from a safe context.
    inertia_cb: Option<Closure<dyn FnMut()>>,
}

impl Controller {
    fn new(config: Config, page: Page) -> Self {
        let scroll = ScrollState {
            spin_factor: config.scroll.spin_factor,
            ..Default::default()
        };
        let touch = TouchState {
            touch_factor: config.touch.touch_factor,
            friction_inertia: config.touch.friction_inertia,
            ..Default::default()
        };
        Self {
            config,
            page,
            scroll,
            touch,
            is_scrolling: false,
            is_touch_move: false,
            last_time: 0.0,
            scroll_tween: None,
            skew_tween: None,
            rendered_scroll: 0.0,
            rendered_skew: 0.0,
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE_MS),
            resize_throttle: Throttle::new(RESIZE_THROTTLE_MS),
            inertia: None,
            inertia_timer: None,
            inertia_cb: None,
        }
    }

    fn recompute_max(&mut self) {
        let content = self.page.content_height();
        let viewport = self.page.viewport_height();
        self.scroll.recompute_max(content, viewport);
    }

    /// Retarget the container translation toward the current offset.
    fn drive_scroll(&mut self, now_ms: f64) {
        retarget_slot(
            &mut self.scroll_tween,
            now_ms,
            self.rendered_scroll,
            self.scroll.curr,
            SCROLL_TWEEN_MS,
        );
    }

    fn cancel_inertia(&mut self) {
        if let Some(id) = self.inertia_timer.take() {
            self.page.window().clear_interval_with_handle(id);
        }
        self.inertia = None;
    }

    /// Per-frame driver. `ts` is the animation-frame timestamp.
    fn tick(&mut self, ts: f64) {
        // deferred resize work
        if self.resize_throttle.ready(ts) {
            self.recompute_max();
        }
        if self.resize_debounce.ready(ts) && self.scroll.reclamp() {
            self.drive_scroll(ts);
        }

        // speed -> skew, only while something is moving
        if self.is_scrolling || self.is_touch_move {
            let dt = ts - self.last_time;
            if dt > 0.0 {
                let speed =
                    state::skew::frame_speed(&self.scroll, dt, self.config.max_speed, self.is_touch_move);
                let target = state::skew::skew_target(speed, self.config.skew_factor);
                retarget_slot(&mut self.skew_tween, ts, self.rendered_skew, target, SKEW_TWEEN_MS);
            }
            self.last_time = ts;
        }

        if let Some(t) = self.scroll_tween {
            let v = t.sample(ts);
            self.rendered_scroll = v;
            self.page.apply_scroll(v);
            if t.is_done(ts) {
                self.scroll_tween = None;
                self.is_scrolling = false;
                // settle: ease the skew back to neutral
                retarget_slot(&mut self.skew_tween, ts, self.rendered_skew, 0.0, SKEW_IDLE_TWEEN_MS);
            }
        }

        if let Some(t) = self.skew_tween {
            let v = t.sample(ts);
            self.rendered_skew = v;
            self.page.apply_skew(v);
            if t.is_done(ts) {
                self.skew_tween = None;
            }
        }
    }
}

/// Live handle returned by [`init`]. Dropping it on the JS side leaves the
/// effect running for the page's lifetime; `destroy()` tears it down.
#[wasm_bindgen]
pub struct JellyScroll {
    inner: Rc<RefCell<Controller>>,
    stopped: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    window: Window,
    document: Document,
    wheel_cb: Closure<dyn FnMut(WheelEvent)>,
    touchstart_cb: Closure<dyn FnMut(TouchEvent)>,
    touchmove_cb: Closure<dyn FnMut(TouchEvent)>,
    touchend_cb: Closure<dyn FnMut(TouchEvent)>,
    resize_cb: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl JellyScroll {
    /// Stop the frame loop, drop all listeners and cancel a live inertia
    /// timer. Safe to call more than once.
    pub fn destroy(&self) {
        self.stopped.set(true);
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self
            .document
            .remove_event_listener_with_callback("wheel", self.wheel_cb.as_ref().unchecked_ref());
        let _ = self.window.remove_event_listener_with_callback(
            "touchstart",
            self.touchstart_cb.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "touchmove",
            self.touchmove_cb.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "touchend",
            self.touchend_cb.as_ref().unchecked_ref(),
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
        let mut c = self.inner.borrow_mut();
        c.cancel_inertia();
        c.inertia_cb = None;
    }
}

/// Initialize jelly-scroll with optional overrides (see [`Options`]).
/// Fails if the container selector matches nothing.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<JellyScroll, JsError> {
    console_error_panic_hook::set_once();

    let opts: Options = if options.is_undefined() || options.is_null() {
        Options::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("invalid options: {e}")))?
    };
    let config = Config::with_overrides(opts);

    let page = Page::attach(&config.selectors).map_err(|e| JsError::new(&e))?;
    let window = page.window().clone();
    let document = window
        .document()
        .ok_or_else(|| JsError::new("window has no document"))?;

    let mut controller = Controller::new(config, page);
    controller.recompute_max();
    clog(&format!("jelly-scroll: attached, max offset {}px", controller.scroll.max));

    let inner = Rc::new(RefCell::new(controller));
    let stopped = Rc::new(Cell::new(false));
    let raf_id = Rc::new(Cell::new(None::<i32>));

    // Wheel: suppress native scrolling (non-passive listener, otherwise the
    // preventDefault call is ignored) and feed the normalized spin.
    let wheel_cb = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let mut c = inner.borrow_mut();
            if !c.is_scrolling {
                c.is_scrolling = true;
            }
            let delta = wheel::normalize(&e);
            c.scroll.apply_spin(delta.spin_y);
            let now = c.page.now_ms();
            c.drive_scroll(now);
        }) as Box<dyn FnMut(_)>)
    };
    let wheel_opts = AddEventListenerOptions::new();
    wheel_opts.set_passive(false);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel_cb.as_ref().unchecked_ref(),
            &wheel_opts,
        )
        .map_err(|_| JsError::new("failed to attach wheel listener"))?;

    // Touch: a new gesture interrupts any running inertia.
    let touchstart_cb = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let Some(t0) = e.touches().item(0) else {
                return;
            };
            let mut c = inner.borrow_mut();
            c.cancel_inertia();
            c.inertia_cb = None;
            if !c.is_touch_move {
                c.is_touch_move = true;
            }
            c.touch.begin(t0.screen_y() as f64, js_sys::Date::now());
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("touchstart", touchstart_cb.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("failed to attach touchstart listener"))?;

    let touchmove_cb = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let Some(t0) = e.touches().item(0) else {
                return;
            };
            e.prevent_default();
            let mut c = inner.borrow_mut();
            let delta = c.touch.track(t0.screen_y() as f64);
            let dpr = c.page.device_pixel_ratio();
            let scroll_delta = c.touch.to_scroll_delta(delta, dpr);
            c.scroll.apply_delta(scroll_delta);
            let now = c.page.now_ms();
            c.drive_scroll(now);
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("touchmove", touchmove_cb.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("failed to attach touchmove listener"))?;

    // Touch release: either spin up the fixed-period inertia timer or clear
    // the touch flag right away.
    let touchend_cb = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |_e: TouchEvent| {
            let mut c = inner.borrow_mut();
            match c.touch.release(js_sys::Date::now()) {
                Some(decay) => {
                    c.inertia = Some(decay);
                    let tick_cb = {
                        let inner = inner.clone();
                        Closure::wrap(Box::new(move || {
                            let mut c = inner.borrow_mut();
                            match c.inertia.as_mut().and_then(InertiaDecay::tick) {
                                Some(step) => {
                                    let dpr = c.page.device_pixel_ratio();
                                    let scroll_delta = c.touch.to_scroll_delta(step, dpr);
                                    c.scroll.apply_delta(scroll_delta);
                                    let now = c.page.now_ms();
                                    c.drive_scroll(now);
                                }
                                None => {
                                    // decayed below threshold: cancel the
                                    // timer, the closure is dropped later
                                    c.cancel_inertia();
                                    c.is_touch_move = false;
                                }
                            }
                        }) as Box<dyn FnMut()>)
                    };
                    let win = c.page.window().clone();
                    match win.set_interval_with_callback_and_timeout_and_arguments_0(
                        tick_cb.as_ref().unchecked_ref(),
                        INERTIA_PERIOD_MS,
                    ) {
                        Ok(id) => {
                            c.inertia_timer = Some(id);
                            c.inertia_cb = Some(tick_cb);
                        }
                        Err(_) => {
                            c.inertia = None;
                            c.is_touch_move = false;
                        }
                    }
                }
                None => {
                    c.is_touch_move = false;
                }
            }
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("touchend", touchend_cb.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("failed to attach touchend listener"))?;

    // Resize: recompute the bound on the leading edge, collapse the burst,
    // and leave the debounced re-clamp to the frame tick.
    let resize_cb = {
        let inner = inner.clone();
        Closure::wrap(Box::new(move |_e: Event| {
            let mut c = inner.borrow_mut();
            let now = c.page.now_ms();
            if c.resize_throttle.record(now) {
                c.recompute_max();
            }
            c.resize_debounce.record(now);
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .map_err(|_| JsError::new("failed to attach resize listener"))?;

    // Frame loop, self-rescheduling until the stop flag is set.
    {
        let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
            Rc::new(RefCell::new(None));
        let closure_cell_clone = closure_cell.clone();
        let inner_loop = inner.clone();
        let stopped_loop = stopped.clone();
        let raf_id_loop = raf_id.clone();
        let window_loop = window.clone();
        *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            if stopped_loop.get() {
                return;
            }
            inner_loop.borrow_mut().tick(ts);
            if let Ok(id) = window_loop.request_animation_frame(
                closure_cell_clone
                    .borrow()
                    .as_ref()
                    .expect("frame closure present")
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_id_loop.set(Some(id));
            }
        }) as Box<dyn FnMut(f64)>));
        if let Ok(id) = window.request_animation_frame(
            closure_cell
                .borrow()
                .as_ref()
                .expect("frame closure present")
                .as_ref()
                .unchecked_ref(),
        ) {
            raf_id.set(Some(id));
        }
    }

    Ok(JellyScroll {
        inner,
        stopped,
        raf_id,
        window,
        document,
        wheel_cb,
        touchstart_cb,
        touchmove_cb,
        touchend_cb,
        resize_cb,
    })
}

//! Valentine Days entry point
//!
//! In the browser this wires the DOM to the stage and runs the frame loops.
//! Natively it plays every day headlessly and prints the resulting views.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, EventTarget, MouseEvent, TouchEvent};

    use valentine_days::background::Backdrop;
    use valentine_days::consts::*;
    use valentine_days::platform::web::{self, FrameLoop};
    use valentine_days::platform::{Bounds, angle_from_center, local_offset, percent_x};
    use valentine_days::renderer::{ScratchLayer, Surface, effects, scene};
    use valentine_days::route::Navigator;
    use valentine_days::sim::{ActiveScreen, Confetti, ScreenInput, Stage};
    use valentine_days::ui::{self, Transition, UiAction, View};
    use valentine_days::{Day, Route, Settings, Tuning};

    /// Moves between routes by editing `location.hash`
    struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn navigate(&mut self, route: &Route) {
            if let Some(w) = web_sys::window() {
                if w.location().set_hash(&route.path()).is_err() {
                    log::warn!("Could not navigate to {}", route);
                }
            }
        }

        fn replace(&mut self, route: &Route) {
            if let Some(w) = web_sys::window() {
                if w.location().replace(&route.path()).is_err() {
                    log::warn!("Could not redirect to {}", route);
                }
            }
        }
    }

    struct Surfaces {
        backdrop: Surface,
        stage: Surface,
        fx: Surface,
        scratch: ScratchLayer,
    }

    /// Page state shared by every handler
    struct App {
        route: Route,
        stage: Stage,
        confetti: Confetti,
        backdrop: Backdrop,
        transition: Transition,
        /// The page style already shows the settled transition
        page_settled: bool,
        settings: Settings,
        view: View,
        surfaces: Surfaces,
        /// Steps the mounted screen; stops itself once the screen goes idle
        screen_loop: Option<FrameLoop>,
        accumulator: f32,
        last_screen_time: f64,
        last_fx_time: f64,
        scratching: bool,
        seed: u64,
    }

    impl App {
        fn next_seed(&mut self) -> u64 {
            self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            self.seed
        }

        fn apply_settings(&mut self) {
            self.confetti
                .set_limits(self.settings.max_particles(), self.settings.burst_scale());
        }

        /// Feed one input to the mounted screen
        fn send(&mut self, input: ScreenInput) {
            let App {
                stage, confetti, ..
            } = self;
            stage.input(input, confetti);
        }

        /// Run simulation ticks for one display frame
        fn step_screen(&mut self, time: f64) -> bool {
            let dt = if self.last_screen_time > 0.0 {
                ((time - self.last_screen_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_screen_time = time;
            self.accumulator += dt.min(MAX_FRAME_DT);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let App {
                    stage, confetti, ..
                } = self;
                // Frame stamps share the event clock, so taps are scored in wall time
                stage.tick_at(SIM_DT, time, confetti);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            let busy = self.stage.screen().is_some_and(ActiveScreen::wants_frames);
            if !busy {
                self.accumulator = 0.0;
                self.last_screen_time = 0.0;
            }
            busy
        }

        /// Backdrop, confetti and the enter transition
        fn step_effects(&mut self, time: f64) {
            let dt = if self.last_fx_time > 0.0 {
                (((time - self.last_fx_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                SIM_DT
            };
            self.last_fx_time = time;

            self.backdrop.advance(dt, self.settings.animate_background());
            self.confetti.tick(dt);
            self.transition.advance(dt);
        }

        fn render(&mut self, time: f64) {
            let s = &mut self.surfaces;
            for surface in [&mut s.backdrop, &mut s.stage, &mut s.fx] {
                if let Err(e) = surface.fit() {
                    log::warn!("Resize failed: {:?}", e);
                }
            }

            effects::draw_backdrop(
                &s.backdrop,
                &self.backdrop,
                self.settings.quality.background_hearts(),
            );

            match self.stage.screen_mut() {
                Some(ActiveScreen::Scratch(card)) => {
                    s.stage.clear();
                    if let Err(e) = s.scratch.sync(card) {
                        log::warn!("Scratch layer failed: {:?}", e);
                    }
                }
                Some(screen) => scene::draw_screen(&s.stage, screen, time),
                None => s.stage.clear(),
            }

            s.fx.clear();
            effects::draw_confetti(&s.fx, &self.confetti);
        }

        /// Copy the view model into the DOM
        fn sync_dom(&mut self, doc: &Document) {
            self.view = ui::view(&self.route, self.stage.screen());
            let v = &self.view;

            set_optional(doc, "date-label", v.date_label.as_deref());
            web::set_visible(doc, "home-btn", v.show_home_button);
            web::set_text(doc, "title", &v.title);
            set_optional(doc, "heading", v.heading.as_deref());
            set_optional(doc, "message", Some(v.message.as_str()).filter(|m| !m.is_empty()));
            set_optional(doc, "detail", v.detail.as_deref());
            set_optional(doc, "hud", v.hud.as_deref());
            set_optional(doc, "notice", v.notice.as_deref());

            match &v.primary {
                Some(button) => {
                    web::set_visible(doc, "primary-btn", true);
                    web::set_text(doc, "primary-btn", &button.label);
                    if let Some(el) = doc.get_element_by_id("primary-btn") {
                        let _ = if button.enabled {
                            el.remove_attribute("disabled")
                        } else {
                            el.set_attribute("disabled", "")
                        };
                    }
                }
                None => web::set_visible(doc, "primary-btn", false),
            }

            web::set_visible(doc, "hold-btn", v.show_hold);
            web::set_visible(doc, "decline-btn", v.show_decline);
            if v.show_decline {
                web::set_style(
                    doc,
                    "decline-btn",
                    &format!(
                        "transform: translate({}px, {}px)",
                        v.decline_offset.x, v.decline_offset.y
                    ),
                );
            }

            web::set_visible(doc, "progress", v.progress.is_some());
            if let Some(p) = v.progress {
                web::set_style(doc, "progress-fill", &format!("width: {:.1}%", p * 100.0));
            }

            let day = self.stage.day();
            web::set_visible(doc, "stage", matches!(day, Some(Day::Two | Day::Three | Day::Four)));
            web::set_visible(doc, "scratch-card", day == Some(Day::Five));
            web::set_visible(
                doc,
                "scratch",
                matches!(self.stage.screen(), Some(ActiveScreen::Scratch(c)) if !c.is_terminal()),
            );

            // Written while the enter animation runs, then once more at rest
            let running = self.transition.is_running();
            if running || !self.page_settled {
                web::set_style(
                    doc,
                    "page",
                    &format!(
                        "opacity: {:.3}; transform: translateX({:.1}px)",
                        self.transition.opacity(),
                        self.transition.offset_x()
                    ),
                );
                self.page_settled = !running;
            }

            web::set_text(
                doc,
                "settings-label",
                &format!(
                    "Q: {} | M: motion {}",
                    self.settings.quality.as_str(),
                    if self.settings.reduced_motion { "reduced" } else { "full" }
                ),
            );
        }
    }

    fn set_optional(doc: &Document, id: &str, text: Option<&str>) {
        match text {
            Some(text) => {
                web::set_text(doc, id, text);
                web::set_visible(doc, id, true);
            }
            None => web::set_visible(doc, id, false),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Valentine Days starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let surfaces = Surfaces {
            backdrop: Surface::by_id("bg")?,
            stage: Surface::by_id("stage")?,
            fx: Surface::by_id("fx")?,
            scratch: ScratchLayer::new(
                document
                    .get_element_by_id("scratch")
                    .ok_or_else(|| JsValue::from_str("no #scratch"))?
                    .dyn_into()?,
            )?,
        };

        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load();
        let settings = Settings::load();

        let app = Rc::new(RefCell::new(App {
            route: Route::Home,
            stage: Stage::new(tuning),
            confetti: Confetti::new(seed ^ 0x5eed),
            backdrop: Backdrop::new(seed),
            transition: Transition::default(),
            page_settled: false,
            settings,
            view: View::default(),
            surfaces,
            screen_loop: None,
            accumulator: 0.0,
            last_screen_time: 0.0,
            last_fx_time: 0.0,
            scratching: false,
            seed,
        }));
        app.borrow_mut().apply_settings();

        log::info!("Initialized with seed: {}", seed);

        // Routing
        {
            let app = app.clone();
            on_event(&window, "hashchange", move |_| on_route(&app));
        }
        setup_buttons(&document, app.clone())?;
        setup_pointer_handlers(&document, app.clone())?;
        setup_keyboard(&window, app.clone());

        on_route(&app);
        request_animation_frame(app);

        log::info!("Valentine Days running!");
        Ok(())
    }

    /// Attach a listener for the page's lifetime
    fn on_event(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {}", name);
        }
        closure.forget();
    }

    fn element(doc: &Document, id: &str) -> Result<web_sys::Element, JsValue> {
        doc.get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{id}")))
    }

    /// Read the hash and mount whatever it names
    fn on_route(app: &Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let hash = window.location().hash().unwrap_or_default();
        let (route, redirect) = Route::resolve(&hash);
        if redirect {
            // The replaced hash fires hashchange again
            BrowserNavigator.replace(&route);
            return;
        }

        {
            let mut a = app.borrow_mut();
            if a.route == route && a.stage.screen().is_some() {
                return;
            }
            log::info!("Route {}", route);
            a.screen_loop = None;
            a.stage.unmount();
            a.accumulator = 0.0;
            a.last_screen_time = 0.0;
            a.scratching = false;
            a.transition.restart();

            if let Route::Day(day) = route {
                if day == Day::Five {
                    // The card must be laid out before its size is read
                    if let Some(doc) = web::document() {
                        web::set_visible(&doc, "scratch-card", true);
                        web::set_visible(&doc, "scratch", true);
                    }
                    a.surfaces.scratch.reset();
                    if let Err(e) = a.surfaces.scratch.cover() {
                        log::warn!("Scratch cover failed: {:?}", e);
                    }
                    let (w, h) = a.surfaces.scratch.size();
                    a.stage.set_card_size(w, h);
                }
                let seed = a.next_seed();
                a.stage.mount(day, seed);
            }
            a.route = route;
        }
        ensure_loop(app);
    }

    /// Start the per-screen loop if the mounted screen has work to do
    fn ensure_loop(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        let wants = a.stage.screen().is_some_and(ActiveScreen::wants_frames);
        let running = a.screen_loop.as_ref().is_some_and(FrameLoop::is_running);
        if !wants || running {
            return;
        }

        let weak = Rc::downgrade(app);
        let frame_loop = FrameLoop::start(move |time| {
            let Some(app) = weak.upgrade() else {
                return false;
            };
            let busy = app.borrow_mut().step_screen(time);
            busy
        });
        match frame_loop {
            Ok(l) => a.screen_loop = Some(l),
            Err(e) => log::error!("Could not start screen loop: {:?}", e),
        }
    }

    /// Send an input and wake the screen loop
    fn dispatch(app: &Rc<RefCell<App>>, input: ScreenInput) {
        app.borrow_mut().send(input);
        ensure_loop(app);
    }

    fn setup_buttons(doc: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Primary button follows whatever the view offers
        {
            let app = app.clone();
            on_event(&element(doc, "primary-btn")?, "click", move |event| {
                let action = app.borrow().view.primary.as_ref().map(|b| b.action);
                match action {
                    Some(UiAction::Open(day)) => BrowserNavigator.navigate(&Route::Day(day)),
                    Some(UiAction::Home) => BrowserNavigator.navigate(&Route::Home),
                    Some(UiAction::Start) => dispatch(&app, ScreenInput::Start),
                    Some(UiAction::Retry) => dispatch(&app, ScreenInput::Retry),
                    Some(UiAction::React) => dispatch(
                        &app,
                        ScreenInput::React {
                            at_ms: Some(event.time_stamp()),
                        },
                    ),
                    Some(UiAction::Accept) => dispatch(&app, ScreenInput::Accept),
                    Some(UiAction::Nothing) | None => {}
                }
            });
        }

        on_event(&element(doc, "home-btn")?, "click", |_| {
            BrowserNavigator.navigate(&Route::Home)
        });

        // Throttle
        let hold = element(doc, "hold-btn")?;
        for name in ["mousedown", "touchstart"] {
            let app = app.clone();
            on_event(&hold, name, move |event| {
                event.prevent_default();
                dispatch(&app, ScreenInput::Press);
            });
        }
        for name in ["mouseup", "mouseleave", "touchend"] {
            let app = app.clone();
            on_event(&hold, name, move |_| dispatch(&app, ScreenInput::Release));
        }

        // The decline button moves before it can be pressed
        let decline = element(doc, "decline-btn")?;
        for name in ["mouseenter", "touchstart", "click"] {
            let app = app.clone();
            on_event(&decline, name, move |event| {
                event.prevent_default();
                dispatch(&app, ScreenInput::Dodge);
            });
        }

        Ok(())
    }

    /// Client position of a mouse or first touch
    fn client_point(event: &Event) -> Option<Vec2> {
        if let Some(m) = event.dyn_ref::<MouseEvent>() {
            return Some(Vec2::new(m.client_x() as f32, m.client_y() as f32));
        }
        let t = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(Vec2::new(t.client_x() as f32, t.client_y() as f32))
    }

    fn setup_pointer_handlers(doc: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Aim the shield or slide the plate
        let stage = element(doc, "stage")?;
        for name in ["mousemove", "touchmove", "touchstart"] {
            let app = app.clone();
            let target = stage.clone();
            on_event(&stage, name, move |event| {
                let Some(point) = client_point(&event) else {
                    return;
                };
                if event.dyn_ref::<TouchEvent>().is_some() {
                    event.prevent_default();
                }
                let bounds = web::bounds_of(&target);
                let input = match app.borrow().stage.screen() {
                    Some(ActiveScreen::Shield(_)) => ScreenInput::Aim {
                        deg: angle_from_center(&bounds, point),
                    },
                    Some(ActiveScreen::Catch(c)) => ScreenInput::Slide {
                        percent: percent_x(&bounds, point.x, c.tuning().pointer_padding_px),
                    },
                    _ => return,
                };
                app.borrow_mut().send(input);
            });
        }

        // Scratch while the pointer is down
        let card = element(doc, "scratch")?;
        for name in ["mousedown", "touchstart"] {
            let app = app.clone();
            let target = card.clone();
            on_event(&card, name, move |event| {
                event.prevent_default();
                app.borrow_mut().scratching = true;
                scratch_at(&app, &web::bounds_of(&target), &event);
            });
        }
        for name in ["mousemove", "touchmove"] {
            let app = app.clone();
            let target = card.clone();
            on_event(&card, name, move |event| {
                if !app.borrow().scratching {
                    return;
                }
                event.prevent_default();
                scratch_at(&app, &web::bounds_of(&target), &event);
            });
        }
        let window: EventTarget = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .into();
        for name in ["mouseup", "touchend"] {
            let app = app.clone();
            on_event(&window, name, move |_| app.borrow_mut().scratching = false);
        }

        Ok(())
    }

    fn scratch_at(app: &Rc<RefCell<App>>, bounds: &Bounds, event: &Event) {
        if let Some(point) = client_point(event) {
            let local = local_offset(bounds, point);
            app.borrow_mut().send(ScreenInput::Scratch {
                x: local.x,
                y: local.y,
            });
        }
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        on_event(window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            let mut a = app.borrow_mut();
            match key.as_str() {
                "m" | "M" => a.settings.toggle_reduced_motion(),
                "q" | "Q" => a.settings.cycle_quality(),
                _ => return,
            }
            a.settings.save();
            a.apply_settings();
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.step_effects(time);
            a.render(time);
            if let Some(doc) = web::document() {
                a.sync_dom(&doc);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine Days (native) starting...");
    log::info!("The browser build is the real thing; this plays every day headlessly");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    headless::walkthrough(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use valentine_days::consts::SIM_DT;
    use valentine_days::route::{History, Navigator};
    use valentine_days::sim::{ActiveScreen, Burst, ReactionPhase, ScreenInput, Stage};
    use valentine_days::ui::{self, UiAction};
    use valentine_days::{Day, Route, Tuning, cartesian_to_polar};

    /// Ten simulated minutes per day at most
    const MAX_TICKS: u32 = 120 * 600;

    /// Play every day with a scripted player, following the continue buttons
    pub fn walkthrough(seed: u64) {
        let mut history = History::default();
        let mut stage = Stage::new(Tuning::load());
        let mut bursts: Vec<Burst> = Vec::new();

        history.navigate(&Route::Home);
        print_view(&history, &stage);

        for day in Day::ALL {
            history.navigate(&Route::Day(day));
            stage.mount(day, seed.wrapping_add(day.number() as u64));
            play(&mut stage, &mut bursts);
            print_view(&history, &stage);

            let route = history.current().cloned().unwrap_or(Route::Home);
            let view = ui::view(&route, stage.screen());
            match view.primary.map(|b| b.action) {
                Some(UiAction::Open(next)) => log::info!("Continue leads to day {}", next.number()),
                other => log::info!("Day {} ends with {:?}", day.number(), other),
            }
        }

        stage.unmount();
        println!(
            "{} bursts celebrated, {} tasks left running",
            bursts.len(),
            stage.active_tasks()
        );
    }

    fn print_view(history: &History, stage: &Stage) {
        let route = history.current().cloned().unwrap_or(Route::Home);
        let view = ui::view(&route, stage.screen());
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}\n{}", route, json),
            Err(e) => log::error!("Could not encode view: {}", e),
        }
    }

    /// Drive the mounted screen to the end of its game
    fn play(stage: &mut Stage, fx: &mut Vec<Burst>) {
        let day = stage.day();
        match day {
            Some(Day::Five) => {
                let (w, h) = match stage.screen() {
                    Some(ActiveScreen::Scratch(card)) => card.size(),
                    _ => return,
                };
                'rows: for y in (0..h).step_by(10) {
                    for x in (0..w).step_by(10) {
                        stage.input(
                            ScreenInput::Scratch {
                                x: x as f32,
                                y: y as f32,
                            },
                            fx,
                        );
                        if stage.screen().is_some_and(ActiveScreen::is_terminal) {
                            break 'rows;
                        }
                    }
                }
                return;
            }
            Some(Day::Six) => {
                for _ in 0..3 {
                    stage.input(ScreenInput::Dodge, fx);
                }
                stage.input(ScreenInput::Accept, fx);
            }
            Some(Day::Four) => stage.input(ScreenInput::Press, fx),
            Some(_) => stage.input(ScreenInput::Start, fx),
            None => return,
        }

        for _ in 0..MAX_TICKS {
            if let Some(input) = stage.screen().and_then(steer) {
                stage.input(input, fx);
            }
            stage.tick(SIM_DT, fx);
            if stage.active_tasks() == 0 {
                break;
            }
        }
    }

    /// What the scripted player does this tick
    fn steer(screen: &ActiveScreen) -> Option<ScreenInput> {
        match screen {
            ActiveScreen::Reaction(r) => {
                matches!(r.phase(), ReactionPhase::Ready { .. })
                    .then_some(ScreenInput::React { at_ms: None })
            }
            ActiveScreen::Shield(s) => {
                // Guard against whichever cloud is closest to the core
                let nearest = s
                    .enemies()
                    .iter()
                    .filter(|e| e.active)
                    .min_by(|a, b| a.pos.length().total_cmp(&b.pos.length()))?;
                let (_, deg) = cartesian_to_polar(nearest.pos);
                Some(ScreenInput::Aim { deg })
            }
            ActiveScreen::Catch(c) => {
                // Chase the lowest good item
                let target = c
                    .items()
                    .iter()
                    .filter(|i| i.active && i.score > 0)
                    .max_by(|a, b| a.y.total_cmp(&b.y))?;
                Some(ScreenInput::Slide { percent: target.x })
            }
            _ => None,
        }
    }
}

//! Valentine Card entry point
//!
//! Wires the browser DOM to the simulation: pointer and click events go
//! in, element positions come out, once per animation frame. Every timer
//! handle and listener is held in a guard so teardown cancels it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, EventTarget, HtmlElement, MouseEvent};

    use valentine_card::Settings;
    use valentine_card::sim::{CardPhase, CardState, TickInput, tick};

    /// A DOM event listener that detaches itself when dropped
    struct ListenerGuard {
        target: EventTarget,
        event: &'static str,
        callback: js_sys::Function,
        _closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl ListenerGuard {
        fn attach(
            target: &EventTarget,
            event: &'static str,
            closure: Closure<dyn FnMut(web_sys::Event)>,
        ) -> Self {
            let callback: js_sys::Function =
                closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
            if let Err(err) = target.add_event_listener_with_callback(event, &callback) {
                log::error!("failed to attach {} listener: {:?}", event, err);
            }
            Self {
                target: target.clone(),
                event,
                callback,
                _closure: closure,
            }
        }
    }

    impl Drop for ListenerGuard {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, &self.callback);
        }
    }

    /// Handle for the requestAnimationFrame loop; dropping it stops the
    /// loop and cancels any pending frame
    struct FrameLoop {
        running: Rc<Cell<bool>>,
        pending: Rc<Cell<Option<i32>>>,
    }

    impl FrameLoop {
        fn start(card: Rc<RefCell<Card>>) -> Self {
            let running = Rc::new(Cell::new(true));
            let pending = Rc::new(Cell::new(None));
            schedule_frame(card, running.clone(), pending.clone());
            Self { running, pending }
        }
    }

    impl Drop for FrameLoop {
        fn drop(&mut self) {
            self.running.set(false);
            if let Some(id) = self.pending.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    fn schedule_frame(
        card: Rc<RefCell<Card>>,
        running: Rc<Cell<bool>>,
        pending: Rc<Cell<Option<i32>>>,
    ) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once({
            let running = running.clone();
            let pending = pending.clone();
            move |time: f64| {
                pending.set(None);
                if !running.get() {
                    return;
                }
                card.borrow_mut().frame(time);
                schedule_frame(card, running, pending);
            }
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
        closure.forget();
    }

    /// Card instance: sim state plus the DOM nodes it has materialized
    struct Card {
        state: CardState,
        settings: Settings,
        input: TickInput,
        last_time: f64,
        particle_nodes: HashMap<u32, Element>,
        confetti_nodes: HashMap<u32, Element>,
    }

    impl Card {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: CardState::new(seed),
                settings,
                input: TickInput::default(),
                last_time: 0.0,
                particle_nodes: HashMap::new(),
                confetti_nodes: HashMap::new(),
            }
        }

        /// One animation frame: sample viewport, advance the sim, render
        fn frame(&mut self, time: f64) {
            // Clamp long frames (tab was hidden) so the sim doesn't lurch
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time).min(250.0)
            } else {
                16.0
            };
            self.last_time = time;

            let window = web_sys::window().expect("no window");
            self.input.viewport = viewport_size(&window);
            tick(&mut self.state, &self.input, dt_ms);

            if let Some(document) = window.document() {
                self.render(&document);
            }
        }

        fn render(&mut self, document: &Document) {
            set_hidden(document, "question-screen", self.state.phase != CardPhase::Question);
            set_hidden(
                document,
                "celebration-screen",
                self.state.phase != CardPhase::Celebration,
            );

            match self.state.phase {
                CardPhase::Question => self.render_question(document),
                CardPhase::Celebration => {
                    // The question view is gone; drop any nodes it left
                    if !self.particle_nodes.is_empty() {
                        for (_, node) in self.particle_nodes.drain() {
                            node.remove();
                        }
                    }
                    self.render_celebration(document);
                }
            }
        }

        fn render_question(&mut self, document: &Document) {
            let q = &self.state.question;

            if let Some(pos) = q.no_button_pos {
                if let Some(btn) = html_by_id(document, "no-button") {
                    set_px(&btn, "left", pos.x);
                    set_px(&btn, "top", pos.y);
                }
            }
            if let Some(label) = document.query_selector("#no-button .button-text").ok().flatten() {
                label.set_text_content(Some(q.refusal_phrase()));
            }
            if let Some(yes) = html_by_id(document, "yes-button") {
                let _ = yes
                    .style()
                    .set_property("transform", &format!("scale({})", q.yes_scale));
            }
            if self.settings.cursor_follower {
                if let Some(follower) = html_by_id(document, "cursor-follower") {
                    set_px(&follower, "left", q.pointer.x);
                    set_px(&follower, "top", q.pointer.y);
                }
            }

            if self.settings.effective_ambient() {
                sync_particles(document, &mut self.particle_nodes, q);
            }
        }

        fn render_celebration(&mut self, document: &Document) {
            let c = &self.state.celebration;

            if let Some(el) = document.get_element_by_id("response-text") {
                el.set_text_content(Some(c.revealed_text()));
            }
            if c.show_subtitle {
                if let Some(el) = document.get_element_by_id("subtitle-text") {
                    el.set_text_content(Some(valentine_card::sim::RESPONSE_SUBTITLE));
                }
            }
            set_hidden(document, "subtitle-text", !c.show_subtitle);

            if self.settings.effective_confetti() {
                sync_confetti(document, &mut self.confetti_nodes, c);
            }
        }
    }

    fn viewport_size(window: &web_sys::Window) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_px(el: &HtmlElement, prop: &str, value: f32) {
        let _ = el.style().set_property(prop, &format!("{}px", value));
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Center of an element's bounding box, in viewport coordinates
    fn element_center(el: &Element) -> Vec2 {
        let rect = el.get_bounding_client_rect();
        Vec2::new(
            (rect.left() + rect.width() / 2.0) as f32,
            (rect.top() + rect.height() / 2.0) as f32,
        )
    }

    fn sync_particles(
        document: &Document,
        nodes: &mut HashMap<u32, Element>,
        q: &valentine_card::sim::QuestionState,
    ) {
        let Some(layer) = document.get_element_by_id("particle-layer") else {
            return;
        };
        let mut live: HashSet<u32> = HashSet::with_capacity(q.particles.len());
        for p in q.particles.live() {
            live.insert(p.id);
            let node = nodes.entry(p.id).or_insert_with(|| {
                let el = document
                    .create_element("div")
                    .expect("document.createElement failed");
                el.set_class_name("floating-particle");
                el.set_text_content(Some(p.glyph));
                let _ = layer.append_child(&el);
                el
            });
            if let Some(html) = node.dyn_ref::<HtmlElement>() {
                set_px(html, "left", p.pos.x);
                set_px(html, "top", p.pos.y);
            }
        }
        nodes.retain(|id, el| {
            let keep = live.contains(id);
            if !keep {
                el.remove();
            }
            keep
        });
    }

    fn sync_confetti(
        document: &Document,
        nodes: &mut HashMap<u32, Element>,
        c: &valentine_card::sim::CelebrationState,
    ) {
        let Some(layer) = document.get_element_by_id("confetti-layer") else {
            return;
        };
        let mut live: HashSet<u32> = HashSet::with_capacity(c.confetti.len());
        for body in c.confetti.live() {
            live.insert(body.id);
            let node = nodes.entry(body.id).or_insert_with(|| {
                let el = document
                    .create_element("div")
                    .expect("document.createElement failed");
                el.set_class_name("confetti-piece");
                match body.glyph {
                    Some(glyph) => el.set_text_content(Some(glyph)),
                    None => {
                        if let Some(html) = el.dyn_ref::<HtmlElement>() {
                            let _ = html
                                .style()
                                .set_property("background-color", &body.color_css());
                        }
                    }
                }
                let _ = layer.append_child(&el);
                el
            });
            if let Some(html) = node.dyn_ref::<HtmlElement>() {
                set_px(html, "left", body.pos.x);
                set_px(html, "top", body.pos.y);
                let _ = html
                    .style()
                    .set_property("transform", &format!("rotate({}deg)", body.rotation));
            }
        }
        nodes.retain(|id, el| {
            let keep = live.contains(id);
            if !keep {
                el.remove();
            }
            keep
        });
    }

    fn setup_listeners(document: &Document, card: Rc<RefCell<Card>>) -> Vec<ListenerGuard> {
        let window = web_sys::window().expect("no window");
        let mut guards = Vec::new();

        // Pointer move: measure the live DOM, then let the sim decide
        {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let event: MouseEvent = event.unchecked_into();
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);

                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let (Some(button), Some(container)) = (
                    document.get_element_by_id("no-button"),
                    document.get_element_by_id("question-screen"),
                ) else {
                    return;
                };
                let rect = container.get_bounding_client_rect();
                let container_size = Vec2::new(rect.width() as f32, rect.height() as f32);

                card.borrow_mut()
                    .state
                    .pointer_moved(pointer, element_center(&button), container_size);
            });
            guards.push(ListenerGuard::attach(&window, "mousemove", closure));
        }

        // Clicks anywhere feed the triple-click gesture
        {
            let card = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut card = card.borrow_mut();
                let viewport = web_sys::window()
                    .map(|w| viewport_size(&w))
                    .unwrap_or(Vec2::ZERO);
                card.state.clicked(viewport);
            });
            guards.push(ListenerGuard::attach(&window, "click", closure));
        }

        // The Yes button
        if let Some(yes) = document.get_element_by_id("yes-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                card.borrow_mut().state.accept();
            });
            guards.push(ListenerGuard::attach(&yes, "click", closure));
        } else {
            log::warn!("no #yes-button element; the card cannot be answered");
        }

        guards
    }

    /// Everything that must be released on teardown
    struct App {
        _card: Rc<RefCell<Card>>,
        _listeners: Vec<ListenerGuard>,
        _frame_loop: FrameLoop,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Valentine card starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let mut settings = Settings::default();
        if let Ok(Some(query)) = window.match_media("(prefers-reduced-motion: reduce)") {
            settings.reduced_motion = query.matches();
        }

        let seed = js_sys::Date::now() as u64;
        let card = Rc::new(RefCell::new(Card::new(seed, settings)));
        log::info!("card initialized with seed {}", seed);

        let listeners = setup_listeners(&document, card.clone());
        let frame_loop = FrameLoop::start(card.clone());

        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                _card: card,
                _listeners: listeners,
                _frame_loop: frame_loop,
            });
        });

        log::info!("Valentine card running");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_card::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine card (native) starting...");
    log::info!("Native mode is headless - serve the web build for the real card");

    // Run a scripted session
    println!("\nRunning headless card demo...");
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use glam::Vec2;
    use valentine_card::sim::{CardPhase, CardState, TickInput, tick};

    let mut state = CardState::new(2026);
    let input = TickInput {
        viewport: Vec2::new(1280.0, 720.0),
    };
    let container = Vec2::new(1280.0, 720.0);

    // Chase the No button around for a while
    let mut center = Vec2::new(840.0, 430.0);
    for _ in 0..8 {
        tick(&mut state, &input, 200.0);
        state.pointer_moved(center + Vec2::new(20.0, 0.0), center, container);
        center = state.question.no_button_pos.expect("button should have fled");
    }
    assert_eq!(state.question.refusal_phrase(), "Porfa 🥺");
    log::info!(
        "chased to {:?}, yes scale {:.2}, {} live particles",
        center,
        state.question.yes_scale,
        state.question.particles.len()
    );

    state.accept();
    assert_eq!(state.phase, CardPhase::Celebration);

    // Let the celebration run, then fire the burst
    for _ in 0..300 {
        tick(&mut state, &input, 16.0);
    }
    for _ in 0..3 {
        state.clicked(input.viewport);
    }
    tick(&mut state, &input, 16.0);
    log::info!(
        "celebration: {} confetti live, headline \"{}\"",
        state.celebration.confetti.len(),
        state.celebration.revealed_text()
    );
    assert!(state.celebration.confetti.len() >= 100);

    println!("✓ Headless demo completed!");
}

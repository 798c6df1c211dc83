//! Birthday card entry point
//!
//! On wasm32 this wires the card state to the DOM of `index.html`; on
//! native targets it runs a deterministic smoke demo of the core logic.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Document, Element, HtmlAudioElement, HtmlInputElement, MouseEvent, ScrollBehavior,
        ScrollIntoViewOptions, ScrollToOptions, VisibilityState,
    };

    use birthday_card::card::{
        AudioSession, Feature, Gallery, InteractiveState, Notice, PlaybackError, Section, decor,
    };
    use birthday_card::consts::*;
    use birthday_card::content::CardContent;

    /// Everything the event handlers share
    struct App {
        content: CardContent,
        audio: AudioSession,
        games: InteractiveState,
        gallery: Gallery,
    }

    type Shared = Rc<RefCell<App>>;

    /// Events that count as an unlock gesture
    const GESTURE_EVENTS: [&str; 4] = ["click", "touchstart", "keydown", "mousemove"];

    /// Salt so décor placement does not replay the balloon stream
    const DECOR_SEED_SALT: u64 = 0x00DE_C0DE;

    /// Unlock listeners are kept alive here (not forgotten) so they can be
    /// removed again once playback has started.
    struct UnlockListeners {
        gesture: Closure<dyn FnMut(web_sys::Event)>,
        visibility: Closure<dyn FnMut(web_sys::Event)>,
    }

    type SharedListeners = Rc<RefCell<Option<UnlockListeners>>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("birthday card starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            set_hidden(&loading, true);
        }

        let content = CardContent::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("card initialized with seed: {seed}");

        let photo_count = content.photos.len();
        let app: Shared = Rc::new(RefCell::new(App {
            audio: AudioSession::new(),
            games: InteractiveState::new(seed),
            gallery: Gallery::new(photo_count),
            content,
        }));

        // Static copy and décor
        {
            let app_ref = app.borrow();
            set_text(
                &document,
                "landing-title",
                &format!("Happy Birthday {} 🎂💖", app_ref.content.name),
            );
            set_text(&document, "letter-body", &app_ref.content.letter);
        }
        scatter_decor(&document, seed);
        render_photo_grid(&document, &app);

        // Mini-games start with a fresh balloon batch and lit candles
        app.borrow_mut().games.generate_balloons();
        render_balloons(&document, &app);
        update_candles(&document, &app);
        update_feature_tabs(&document, &app);
        update_gallery_modal(&document, &app);

        setup_scroll_buttons(&document);
        setup_game_handlers(&document, &app);
        setup_gallery_handlers(&document, &app);
        setup_audio(&document, &app);

        log::info!("birthday card ready");
    }

    // === Small DOM helpers ===

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Run `f` once after `ms` milliseconds
    fn schedule_timeout(ms: f64, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::once_into_js(f);
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32);
    }

    // === Navigation ===

    /// Smooth-scroll to a section's top boundary; missing targets are no-ops
    fn scroll_to(section: Section) {
        let Some(document) = document() else { return };
        if let Some(el) = document.get_element_by_id(section.anchor()) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn scroll_to_top() {
        if let Some(window) = web_sys::window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    fn setup_scroll_buttons(document: &Document) {
        let Ok(buttons) = document.query_selector_all("[data-scroll-to]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(anchor) = button.get_attribute("data-scroll-to") else {
                continue;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                match Section::from_anchor(&anchor) {
                    Some(section) => scroll_to(section),
                    None if anchor == "top" => scroll_to_top(),
                    None => {}
                }
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // === Décor ===

    fn scatter_decor(document: &Document, seed: u64) {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(seed ^ DECOR_SEED_SALT);
        for (layer_id, hearts, sparkles) in [
            ("landing-decor", 8, 12),
            ("letter-decor", 6, 0),
            ("final-decor", 10, 8),
        ] {
            let Some(layer) = document.get_element_by_id(layer_id) else {
                continue;
            };
            for item in decor::floating_hearts(&mut rng, hearts) {
                append_decor(document, &layer, "heart", "💖", &item);
            }
            for item in decor::sparkles(&mut rng, sparkles) {
                append_decor(document, &layer, "sparkle", "✨", &item);
            }
        }
    }

    fn append_decor(
        document: &Document,
        layer: &Element,
        class: &str,
        glyph: &str,
        item: &decor::DecorItem,
    ) {
        if let Ok(el) = document.create_element("span") {
            let _ = el.set_attribute("class", class);
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left:{:.1}%;top:{:.1}%;font-size:{:.0}px;color:{};",
                    item.x, item.y, item.size, item.color
                ),
            );
            el.set_text_content(Some(glyph));
            let _ = layer.append_child(&el);
        }
    }

    // === Balloons, candles and confetti ===

    fn render_balloons(document: &Document, app: &Shared) {
        let Some(field) = document.get_element_by_id("balloon-field") else {
            return;
        };
        field.set_inner_html("");
        let app_ref = app.borrow();
        for balloon in app_ref.games.balloons() {
            if let Ok(el) = document.create_element("div") {
                let _ = el.set_attribute("class", "balloon");
                let _ = el.set_attribute("data-balloon-id", &balloon.id.to_string());
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.1}%;top:{:.1}%;width:{:.0}px;height:{:.0}px;background-color:{};",
                        balloon.x, balloon.y, balloon.size, balloon.size, balloon.color
                    ),
                );
                let _ = field.append_child(&el);
            }
        }
    }

    fn pop_balloon(app: &Shared, balloon_id: u32) {
        let now = js_sys::Date::now();
        let burst_id = app.borrow_mut().games.pop_balloon(balloon_id, now);
        let Some(burst_id) = burst_id else {
            return; // already popped
        };
        let Some(document) = document() else { return };
        if let Ok(Some(el)) =
            document.query_selector(&format!("[data-balloon-id='{balloon_id}']"))
        {
            el.remove();
        }
        spawn_burst_dom(&document, app, burst_id);
    }

    /// Paint one burst's particles and schedule its removal
    fn spawn_burst_dom(document: &Document, app: &Shared, burst_id: u32) {
        {
            let Some(layer) = document.get_element_by_id("confetti-layer") else {
                return;
            };
            let app_ref = app.borrow();
            let Some(burst) = app_ref.games.burst(burst_id) else {
                return;
            };
            for particle in &burst.particles {
                if let Ok(el) = document.create_element("div") {
                    let _ = el.set_attribute("class", "confetti");
                    let _ = el.set_attribute("data-burst-id", &burst_id.to_string());
                    let _ = el.set_attribute(
                        "style",
                        &format!(
                            "left:{:.1}%;top:{:.1}%;background-color:{};transform:rotate({:.0}deg);",
                            particle.x, particle.y, particle.color, particle.rotation
                        ),
                    );
                    let _ = layer.append_child(&el);
                }
            }
        }

        let app = app.clone();
        schedule_timeout(CONFETTI_TTL_MS, move || {
            expire_burst(&app, burst_id);
        });
    }

    /// Timer callback: drop one burst from state and from the DOM.
    /// Keyed by burst id, so it is harmless once the burst is gone.
    fn expire_burst(app: &Shared, burst_id: u32) {
        if !app.borrow_mut().games.expire_burst(burst_id) {
            return;
        }
        let Some(document) = document() else { return };
        if let Ok(nodes) = document.query_selector_all(&format!("[data-burst-id='{burst_id}']")) {
            for i in 0..nodes.length() {
                if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    el.remove();
                }
            }
        }
    }

    fn update_candles(document: &Document, app: &Shared) {
        let (lit, wish) = {
            let app_ref = app.borrow();
            (app_ref.games.candles_lit(), app_ref.games.wish_shown())
        };

        // One flag drives all five flames
        if let Ok(flames) = document.query_selector_all(".flame") {
            for i in 0..flames.length() {
                if let Some(el) = flames.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    set_hidden(&el, !lit);
                }
            }
        }

        if let Some(btn) = document.get_element_by_id("blow-btn") {
            if lit {
                let _ = btn.remove_attribute("disabled");
                btn.set_text_content(Some("Blow the Candles 🎂"));
            } else {
                let _ = btn.set_attribute("disabled", "");
                btn.set_text_content(Some("Candles Blown Out!"));
            }
        }
        if let Some(btn) = document.get_element_by_id("reset-candles") {
            set_hidden(&btn, lit);
        }
        if let Some(el) = document.get_element_by_id("wish-message") {
            set_hidden(&el, !wish);
        }
    }

    fn update_feature_tabs(document: &Document, app: &Shared) {
        let active = app.borrow().games.active();
        for (btn_id, panel_id, feature) in [
            ("tab-balloons", "panel-balloons", Feature::Balloons),
            ("tab-cake", "panel-cake", Feature::Cake),
        ] {
            let selected = active == feature;
            if let Some(btn) = document.get_element_by_id(btn_id) {
                let _ = btn.class_list().toggle_with_force("active", selected);
            }
            if let Some(panel) = document.get_element_by_id(panel_id) {
                set_hidden(&panel, !selected);
            }
        }
    }

    fn setup_game_handlers(document: &Document, app: &Shared) {
        // Balloon pops are delegated so regenerated balloons need no rewiring
        if let Some(field) = document.get_element_by_id("balloon-field") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target() else { return };
                let Ok(el) = target.dyn_into::<Element>() else { return };
                let Ok(Some(hit)) = el.closest("[data-balloon-id]") else {
                    return;
                };
                if let Some(id) = hit
                    .get_attribute("data-balloon-id")
                    .and_then(|v| v.parse().ok())
                {
                    pop_balloon(&app, id);
                }
            });
            let _ =
                field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-balloons") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().games.generate_balloons();
                if let Some(document) = document() {
                    render_balloons(&document, &app);
                }
                log::info!("balloons reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (btn_id, feature) in [("tab-balloons", Feature::Balloons), ("tab-cake", Feature::Cake)]
        {
            if let Some(btn) = document.get_element_by_id(btn_id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut().games.select(feature);
                    if let Some(document) = document() {
                        update_feature_tabs(&document, &app);
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("blow-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let now = js_sys::Date::now();
                let burst_id = app.borrow_mut().games.blow_candles(now);
                let Some(burst_id) = burst_id else {
                    return; // already blown out
                };
                if let Some(document) = document() {
                    update_candles(&document, &app);
                    spawn_burst_dom(&document, &app, burst_id);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-candles") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if app.borrow_mut().games.reset_candles() {
                    if let Some(document) = document() {
                        update_candles(&document, &app);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // === Photo gallery ===

    fn render_photo_grid(document: &Document, app: &Shared) {
        let Some(grid) = document.get_element_by_id("photo-grid") else {
            return;
        };
        grid.set_inner_html("");
        let app_ref = app.borrow();
        for (index, photo) in app_ref.content.photos.iter().enumerate() {
            if let Ok(item) = document.create_element("figure") {
                let _ = item.set_attribute("class", "photo-card");
                let _ = item.set_attribute("data-photo-index", &index.to_string());
                item.set_inner_html(&format!(
                    "<img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption>",
                    photo.src, photo.alt, photo.caption
                ));
                let _ = grid.append_child(&item);
            }
        }
    }

    fn update_gallery_modal(document: &Document, app: &Shared) {
        let Some(modal) = document.get_element_by_id("photo-modal") else {
            return;
        };
        let app_ref = app.borrow();
        match app_ref.gallery.selected() {
            Some(index) => {
                if let Some(photo) = app_ref.content.photos.get(index) {
                    if let Some(img) = document.get_element_by_id("modal-photo") {
                        let _ = img.set_attribute("src", &photo.src);
                        let _ = img.set_attribute("alt", &photo.alt);
                    }
                    set_text(document, "modal-caption", &photo.caption);
                    set_text(document, "modal-alt", &photo.alt);
                    set_text(
                        document,
                        "modal-counter",
                        &format!("{} of {}", index + 1, app_ref.content.photos.len()),
                    );
                }
                set_hidden(&modal, false);
            }
            None => set_hidden(&modal, true),
        }
    }

    fn setup_gallery_handlers(document: &Document, app: &Shared) {
        if let Some(grid) = document.get_element_by_id("photo-grid") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target() else { return };
                let Ok(el) = target.dyn_into::<Element>() else { return };
                let Ok(Some(hit)) = el.closest("[data-photo-index]") else {
                    return;
                };
                let Some(index) = hit
                    .get_attribute("data-photo-index")
                    .and_then(|v| v.parse().ok())
                else {
                    return;
                };
                if app.borrow_mut().gallery.open(index) {
                    if let Some(document) = document() {
                        update_gallery_modal(&document, &app);
                    }
                }
            });
            let _ =
                grid.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("modal-close") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().gallery.close();
                if let Some(document) = document() {
                    update_gallery_modal(&document, &app);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the backdrop (but not the box) also closes
        if let Some(modal) = document.get_element_by_id("photo-modal") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target() else { return };
                let Ok(el) = target.dyn_into::<Element>() else { return };
                if el.id() == "photo-modal" {
                    app.borrow_mut().gallery.close();
                    if let Some(document) = document() {
                        update_gallery_modal(&document, &app);
                    }
                }
            });
            let _ =
                modal.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (btn_id, forward) in [("modal-next", true), ("modal-prev", false)] {
            if let Some(btn) = document.get_element_by_id(btn_id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    {
                        let mut app_mut = app.borrow_mut();
                        if forward {
                            app_mut.gallery.next();
                        } else {
                            app_mut.gallery.prev();
                        }
                    }
                    if let Some(document) = document() {
                        update_gallery_modal(&document, &app);
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    // === Music ===

    /// Repaint every piece of DOM that reflects the audio session
    fn on_audio_changed(app: &Shared) {
        let Some(document) = document() else { return };
        let audio = app.borrow().audio.clone();

        if let Some(el) = document
            .get_element_by_id("music-audio")
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
        {
            el.set_volume(audio.effective_volume() as f64);
        }

        if let Some(btn) = document.get_element_by_id("music-fab") {
            btn.set_text_content(Some(if audio.is_playing() { "⏸" } else { "▶" }));
        }
        if let Some(btn) = document.get_element_by_id("music-panel-toggle") {
            btn.set_text_content(Some(if audio.is_playing() {
                "Pause Music"
            } else {
                "Play Music"
            }));
        }
        if let Some(btn) = document.get_element_by_id("music-mute") {
            btn.set_text_content(Some(if audio.is_muted() { "🔇" } else { "🔊" }));
        }
        if let Some(slider) = document
            .get_element_by_id("music-volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            slider.set_value(&format!("{:.1}", audio.volume()));
        }
        set_text(
            &document,
            "music-status",
            if audio.is_playing() { "Now Playing" } else { "Paused" },
        );
        if let Some(panel) = document.get_element_by_id("music-controls") {
            set_hidden(&panel, !audio.controls_open());
        }

        if let Some(el) = document.get_element_by_id("music-notice") {
            match audio.notice() {
                Some(notice) => {
                    let text = match notice {
                        Notice::Started => "Music Started! 🎵",
                        Notice::NeedsTap => "Click to play music 🎵",
                    };
                    el.set_text_content(Some(text));
                    set_hidden(&el, false);
                }
                None => set_hidden(&el, true),
            }
        }
    }

    fn schedule_notice_clear(app: Shared, seq: u32) {
        schedule_timeout(NOTICE_TTL_MS, move || {
            let cleared = app.borrow_mut().audio.clear_notice(seq);
            if cleared {
                on_audio_changed(&app);
            }
        });
    }

    /// Issue one play() attempt and route the promise outcome back into
    /// the session. A refusal arms the gesture-unlock listeners.
    fn attempt_play(app: Shared, audio_el: HtmlAudioElement, listeners: SharedListeners) {
        if !app.borrow().audio.begin_play() {
            return;
        }
        match audio_el.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    let seq = match JsFuture::from(promise).await {
                        Ok(_) => {
                            let seq = app.borrow_mut().audio.play_started();
                            detach_unlock_listeners(&listeners);
                            seq
                        }
                        Err(_) => {
                            let seq =
                                app.borrow_mut().audio.play_failed(PlaybackError::Blocked);
                            arm_unlock_listeners(&app, &audio_el, &listeners);
                            seq
                        }
                    };
                    on_audio_changed(&app);
                    schedule_notice_clear(app.clone(), seq);
                });
            }
            Err(_) => {
                let seq = app.borrow_mut().audio.play_failed(PlaybackError::MediaFailed);
                arm_unlock_listeners(&app, &audio_el, &listeners);
                on_audio_changed(&app);
                schedule_notice_clear(app, seq);
            }
        }
    }

    /// Manual play/pause control; `playing` is the single source of truth
    fn toggle_play(app: &Shared, audio_el: &HtmlAudioElement, listeners: &SharedListeners) {
        let playing = app.borrow().audio.is_playing();
        if playing {
            let _ = audio_el.pause();
            app.borrow_mut().audio.paused();
            on_audio_changed(app);
        } else {
            attempt_play(app.clone(), audio_el.clone(), listeners.clone());
        }
    }

    /// Register the one-shot unlock listeners after a failed attempt. The
    /// first successful play removes them all again.
    fn arm_unlock_listeners(
        app: &Shared,
        audio_el: &HtmlAudioElement,
        listeners: &SharedListeners,
    ) {
        if !app.borrow().audio.is_armed() || listeners.borrow().is_some() {
            return;
        }

        let gesture = {
            let app = app.clone();
            let audio_el = audio_el.clone();
            let listeners = listeners.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let retry = app.borrow().audio.gesture_should_retry();
                if retry {
                    attempt_play(app.clone(), audio_el.clone(), listeners.clone());
                }
            })
        };

        // Tab becoming visible again also counts as a resume opportunity
        let visibility = {
            let app = app.clone();
            let audio_el = audio_el.clone();
            let listeners = listeners.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = document() else { return };
                if document.visibility_state() != VisibilityState::Visible {
                    return;
                }
                let retry = app.borrow().audio.gesture_should_retry();
                if retry {
                    attempt_play(app.clone(), audio_el.clone(), listeners.clone());
                }
            })
        };

        let Some(window) = web_sys::window() else { return };
        for event in GESTURE_EVENTS {
            let _ =
                window.add_event_listener_with_callback(event, gesture.as_ref().unchecked_ref());
        }
        if let Some(document) = window.document() {
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                visibility.as_ref().unchecked_ref(),
            );
        }
        *listeners.borrow_mut() = Some(UnlockListeners { gesture, visibility });
        log::info!("autoplay blocked; waiting for a user gesture");
    }

    fn detach_unlock_listeners(listeners: &SharedListeners) {
        let Some(taken) = listeners.borrow_mut().take() else {
            return;
        };
        let Some(window) = web_sys::window() else { return };
        for event in GESTURE_EVENTS {
            let _ = window
                .remove_event_listener_with_callback(event, taken.gesture.as_ref().unchecked_ref());
        }
        if let Some(document) = window.document() {
            let _ = document.remove_event_listener_with_callback(
                "visibilitychange",
                taken.visibility.as_ref().unchecked_ref(),
            );
        }
        log::info!("music unlocked; gesture listeners removed");
    }

    fn setup_audio(document: &Document, app: &Shared) {
        let Some(audio_el) = document
            .get_element_by_id("music-audio")
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
        else {
            log::warn!("no audio element; music disabled");
            return;
        };

        {
            let app_ref = app.borrow();
            audio_el.set_src(&app_ref.content.music_src);
            audio_el.set_loop(true);
            audio_el.set_volume(app_ref.audio.effective_volume() as f64);
        }

        let listeners: SharedListeners = Rc::new(RefCell::new(None));

        // A missing or undecodable file gets the same gentle treatment as
        // blocked autoplay
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let seq = app.borrow_mut().audio.play_failed(PlaybackError::MediaFailed);
                on_audio_changed(&app);
                schedule_notice_clear(app.clone(), seq);
            });
            let _ = audio_el
                .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // `ended` should never fire on a looping track, but keep state honest
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().audio.ended();
                on_audio_changed(&app);
            });
            let _ = audio_el
                .add_event_listener_with_callback("ended", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Floating button opens the panel and toggles playback
        if let Some(btn) = document.get_element_by_id("music-fab") {
            let app = app.clone();
            let audio_el = audio_el.clone();
            let listeners = listeners.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().audio.toggle_controls();
                toggle_play(&app, &audio_el, &listeners);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("music-panel-toggle") {
            let app = app.clone();
            let audio_el = audio_el.clone();
            let listeners = listeners.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                toggle_play(&app, &audio_el, &listeners);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("music-mute") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().audio.toggle_mute();
                on_audio_changed(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = document.get_element_by_id("music-volume") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(target) = event.target() else { return };
                let Ok(input) = target.dyn_into::<HtmlInputElement>() else {
                    return;
                };
                if let Ok(volume) = input.value().parse::<f32>() {
                    app.borrow_mut().audio.set_volume(volume);
                    on_audio_changed(&app);
                }
            });
            let _ = slider
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        on_audio_changed(app);

        // Automatic attempt; a refusal arms the gesture listeners
        attempt_play(app.clone(), audio_el, listeners);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("birthday card (native) starting...");
    log::info!("the card itself is a web page - run with `trunk serve`");

    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use birthday_card::card::InteractiveState;
    use birthday_card::consts::{BLOW_BURST, CONFETTI_TTL_MS, POP_BURST};
    use birthday_card::content::CardContent;

    let content = CardContent::load();
    println!("\nCard for {} with {} photos", content.name, content.photos.len());

    let mut games = InteractiveState::new(20260806);
    games.generate_balloons();
    println!("{} balloons floated in", games.balloons().len());

    let first = games.balloons()[0].id;
    games.pop_balloon(first, 0.0).expect("balloon exists");
    games.blow_candles(100.0).expect("candles were lit");
    println!(
        "popped one balloon and blew the candles: {} confetti in the air",
        games.confetti_count()
    );
    assert_eq!(games.confetti_count(), POP_BURST + BLOW_BURST);

    games.expire_due(CONFETTI_TTL_MS);
    games.expire_due(100.0 + CONFETTI_TTL_MS);
    assert_eq!(games.confetti_count(), 0);
    println!("✓ confetti cleaned up on schedule");
}

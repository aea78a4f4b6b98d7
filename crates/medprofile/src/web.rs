//! Web entry point for the profile screen using ratzilla.
//!
//! The browser tab hosts the same [`App`] as the terminal build, backed by
//! LocalStorage through [`WebWorker`].

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Terminal;
use ratzilla::event::KeyEvent as RatzillaKeyEvent;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::AppConfig;
use crate::event::AppKeyEvent;
use crate::platform::{WebStore, WebWorker};
use crate::state::AppState;

/// Stop the browser from acting on keys the form uses (Tab, Ctrl+S).
fn setup_prevent_default() -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
        let key = event.key();
        let ctrl = event.ctrl_key() || event.meta_key();

        let should_prevent =
            matches!(key.as_str(), "Tab") || (ctrl && matches!(key.to_lowercase().as_str(), "s"));

        if should_prevent {
            event.prevent_default();
        }
    });

    document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

    // Listener lives for the page
    closure.forget();
    Ok(())
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    crate::init_logging_web();

    let user_id = AppConfig::default().resolve_user(None);
    tracing::info!(user = %user_id, "Medical profile web version starting");

    setup_prevent_default()?;

    let app = Rc::new(RefCell::new(App::new(
        AppState::new(&user_id),
        WebWorker::new(WebStore::new()),
    )));

    let backend = DomBackend::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let terminal: Terminal<DomBackend> =
        Terminal::new(backend).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let app_clone = Rc::clone(&app);
    terminal.on_key_event(move |key_event: RatzillaKeyEvent| {
        let mut app = app_clone.borrow_mut();
        if app.should_exit() {
            return;
        }
        let key: AppKeyEvent = (&key_event).into();
        app.handle_key(key);
        if app.should_exit() {
            // A page can't close itself; leaving just stops storage work
            tracing::info!("Leave requested");
            app.shutdown();
        }
    });

    terminal.draw_web(move |frame| {
        let mut app = app.borrow_mut();
        app.tick();
        app.draw(frame);
    });

    Ok(())
}

//! JS bindings for dock sessions. Sessions live in a handle table; every
//! call names its session by handle. Times are milliseconds since the
//! session was created, on whatever clock the caller uses.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use magdock_core::config::DockConfig;
use magdock_core::session::DockSession;
use magdock_core::views::render_dock;
use magdock_protocol::Viewport;
use wasm_bindgen::prelude::*;

static SESSIONS: Mutex<Vec<Option<DockSession>>> = Mutex::new(Vec::new());

fn sessions() -> MutexGuard<'static, Vec<Option<DockSession>>> {
    SESSIONS.lock().unwrap_or_else(|e| e.into_inner())
}

fn ms(now_ms: f64) -> Duration {
    Duration::from_secs_f64(now_ms.max(0.0) / 1000.0)
}

fn with_session<T>(
    handle: usize,
    f: impl FnOnce(&mut DockSession) -> Result<T, String>,
) -> Result<T, String> {
    let mut sessions = sessions();
    let session = sessions
        .get_mut(handle)
        .and_then(Option::as_mut)
        .ok_or_else(|| format!("invalid session handle {handle}"))?;
    f(session)
}

/// Store `value` in the first free slot, growing the table only when every
/// slot is taken.
fn insert_slot<T>(slots: &mut Vec<Option<T>>, value: T) -> usize {
    if let Some(free) = slots.iter().position(Option::is_none) {
        slots[free] = Some(value);
        free
    } else {
        slots.push(Some(value));
        slots.len() - 1
    }
}

fn create(config_json: &str) -> Result<usize, String> {
    let config = if config_json.trim().is_empty() {
        DockConfig::default()
    } else {
        DockConfig::from_json_str(config_json).map_err(|e| e.to_string())?
    };
    let session = DockSession::new(config).map_err(|e| e.to_string())?;
    Ok(insert_slot(&mut sessions(), session))
}

fn destroy(handle: usize) -> Result<(), String> {
    let mut sessions = sessions();
    let slot = sessions
        .get_mut(handle)
        .ok_or_else(|| format!("invalid session handle {handle}"))?;
    if let Some(mut session) = slot.take() {
        session.teardown();
    }
    Ok(())
}

fn render_json(handle: usize, width: f64, height: f64, now_ms: f64) -> Result<String, String> {
    with_session(handle, |s| {
        let commands = render_dock(&s.snapshot(ms(now_ms)), &Viewport::new(width, height));
        serde_json::to_string(&commands).map_err(|e| e.to_string())
    })
}

/// Create a dock from a JSON config (empty string for the stock dock).
/// Returns a handle for later calls.
#[wasm_bindgen]
pub fn create_session(config_json: &str) -> Result<usize, JsError> {
    create(config_json).map_err(|e| JsError::new(&e))
}

/// Tear a session down and free its slot. A later `create_session` may hand
/// the same handle out again.
#[wasm_bindgen]
pub fn destroy_session(handle: usize) -> Result<(), JsError> {
    destroy(handle).map_err(|e| JsError::new(&e))
}

/// Queue a pointer position measured from the container's left edge.
/// Pass `undefined` when the container could not be measured.
#[wasm_bindgen]
pub fn pointer_move(handle: usize, x: Option<f64>) -> Result<(), JsError> {
    with_session(handle, |s| {
        s.pointer_move(x);
        Ok(())
    })
    .map_err(|e| JsError::new(&e))
}

#[wasm_bindgen]
pub fn pointer_leave(handle: usize) -> Result<(), JsError> {
    with_session(handle, |s| {
        s.pointer_leave();
        Ok(())
    })
    .map_err(|e| JsError::new(&e))
}

#[wasm_bindgen]
pub fn click(handle: usize, index: usize, now_ms: f64) -> Result<(), JsError> {
    with_session(handle, |s| s.click(index, ms(now_ms)).map_err(|e| e.to_string()))
        .map_err(|e| JsError::new(&e))
}

/// Click whatever is drawn under container-relative `x`. Returns the
/// clicked index.
#[wasm_bindgen]
pub fn click_at(handle: usize, x: f64, now_ms: f64) -> Result<Option<usize>, JsError> {
    with_session(handle, |s| Ok(s.click_at(x, ms(now_ms)))).map_err(|e| JsError::new(&e))
}

/// Run one frame. Returns whether the dock needs repainting.
#[wasm_bindgen]
pub fn frame(handle: usize, now_ms: f64) -> Result<bool, JsError> {
    with_session(handle, |s| Ok(s.frame(ms(now_ms)))).map_err(|e| JsError::new(&e))
}

/// Whether the caller should keep requesting animation frames.
#[wasm_bindgen]
pub fn needs_frame(handle: usize) -> Result<bool, JsError> {
    with_session(handle, |s| Ok(s.needs_frame())).map_err(|e| JsError::new(&e))
}

/// Current dock state as JSON.
#[wasm_bindgen]
pub fn snapshot(handle: usize, now_ms: f64) -> Result<String, JsError> {
    with_session(handle, |s| {
        serde_json::to_string(&s.snapshot(ms(now_ms))).map_err(|e| e.to_string())
    })
    .map_err(|e| JsError::new(&e))
}

/// Render commands for the dock centered in a `width` x `height` viewport,
/// as JSON.
#[wasm_bindgen]
pub fn render(handle: usize, width: f64, height: f64, now_ms: f64) -> Result<String, JsError> {
    render_json(handle, width, height, now_ms).map_err(|e| JsError::new(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that create or destroy sessions share the global table.
    static TABLE: Mutex<()> = Mutex::new(());

    fn table() -> MutexGuard<'static, ()> {
        TABLE.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut slots: Vec<Option<&str>> = Vec::new();
        assert_eq!(insert_slot(&mut slots, "a"), 0);
        assert_eq!(insert_slot(&mut slots, "b"), 1);
        slots[0] = None;
        assert_eq!(insert_slot(&mut slots, "c"), 0);
        assert_eq!(insert_slot(&mut slots, "d"), 2);
        assert_eq!(slots, [Some("c"), Some("b"), Some("d")]);
    }

    #[test]
    fn destroyed_handle_is_handed_out_again() {
        let _table = table();
        let first = create("").unwrap_or_else(|e| panic!("{e}"));
        assert!(destroy(first).is_ok());
        let second = create("").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(second, first);
        assert_eq!(with_session(second, |s| Ok(s.is_torn_down())), Ok(false));
        assert!(destroy(second).is_ok());
    }

    #[test]
    fn session_lifecycle() {
        let _table = table();
        let handle = create("").unwrap_or_else(|e| panic!("{e}"));
        with_session(handle, |s| {
            s.pointer_move(Some(140.0));
            assert!(s.frame(ms(16.0)));
            assert_eq!(s.hovered(), Some(2));
            Ok(())
        })
        .unwrap_or_else(|e| panic!("{e}"));

        let json = render_json(handle, 800.0, 400.0, 16.0).unwrap_or_else(|e| panic!("{e}"));
        assert!(json.contains("DrawIcon"));

        assert!(destroy(handle).is_ok());
        assert!(with_session(handle, |_| Ok(())).is_err());
        // Destroying twice is harmless.
        assert!(destroy(handle).is_ok());
    }

    #[test]
    fn config_from_json() {
        let _table = table();
        let handle = create(r#"{"base_width": 48, "items": [{"label": "Only"}]}"#)
            .unwrap_or_else(|e| panic!("{e}"));
        let width = with_session(handle, |s| Ok(s.positions().container_width()))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(width, 48.0);
        assert!(create(r#"{"max_scale": 0.5}"#).is_err());
    }

    #[test]
    fn unknown_handle_is_an_error() {
        assert!(with_session(usize::MAX, |_| Ok(())).is_err());
        assert!(destroy(usize::MAX).is_err());
    }
}

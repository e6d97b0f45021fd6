use super::*;

/// Boots now, or on `DOMContentLoaded` when the page is still parsing.
pub(super) fn boot_when_ready() -> Result<(), DomError> {
    let page = document()?;
    if page.ready_state() != "loading" {
        return boot(&page);
    }
    let callback = Closure::once_into_js(|| {
        let result = document().and_then(|document| boot(&document));
        if let Err(error) = result {
            gloo_console::error!(format!("settings page: boot failed: {error}"));
        }
    });
    page
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|_| DomError::Operation("wait for DOMContentLoaded"))
}

/// Routes `tracing` events from the core crate to the browser console.
/// Later calls keep the subscriber that is already installed.
pub(super) fn install_tracing() {
    if tracing_wasm::try_set_as_global_default().is_err() {
        gloo_console::debug!("settings page: tracing subscriber already installed");
    }
}

pub(super) fn boot(document: &web_sys::Document) -> Result<(), DomError> {
    let loaded = load_config();
    CONFIG.with(|config| *config.borrow_mut() = loaded);

    let selector = config(|config| config.control_selector.clone());
    let controls = DomControls::scan(document, &selector)?;
    let tracker = DirtyTracker::capture(controls.states());
    if tracker.is_empty() {
        gloo_console::warn!(format!(
            "settings page: no controls match {selector:?}"
        ));
    } else {
        gloo_console::debug!(format!(
            "settings page: tracking {} controls",
            tracker.len()
        ));
    }
    FORM_STATE.with(|state| *state.borrow_mut() = SettingsFormState::new(tracker));
    TRACKED_CONTROLS.with(|slot| *slot.borrow_mut() = controls);

    install_change_tracking(document)?;

    if let Err(error) = install_image_preview(document) {
        gloo_console::warn!(format!("settings page: image preview disabled: {error}"));
    }
    let submit_id = config(|config| config.submit_button_id.clone());
    if document.get_element_by_id(&submit_id).is_none() {
        gloo_console::warn!(format!(
            "settings page: missing submit button #{submit_id}"
        ));
    }

    recompute_submit_enabled();
    Ok(())
}

/// Reads the optional config global, which may be a JSON string or a plain
/// object. Falls back to defaults when it is absent or invalid.
fn load_config() -> SettingsPageConfig {
    let Some(window) = web_sys::window() else {
        return SettingsPageConfig::default();
    };
    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) else {
        return SettingsPageConfig::default();
    };
    if value.is_undefined() || value.is_null() {
        return SettingsPageConfig::default();
    }

    let raw = match value.as_string() {
        Some(raw) => raw,
        None => match js_sys::JSON::stringify(&value) {
            Ok(raw) => String::from(raw),
            Err(_) => {
                gloo_console::warn!("settings page: config global is not serializable");
                return SettingsPageConfig::default();
            }
        },
    };

    SettingsPageConfig::from_json(&raw).unwrap_or_else(|error| {
        gloo_console::warn!(format!("settings page: using default config: {error}"));
        SettingsPageConfig::default()
    })
}

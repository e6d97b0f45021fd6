#[cfg(target_arch = "wasm32")]
pub use wasm::{
    delete_profile, init_settings_page, preview_image, settings_state_json, show_popup_elements,
    submit_form,
};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};

    use settings_page_core::{
        CLOSE_BUTTON_CLASS, CLOSE_GLYPH, CONFIG_GLOBAL, ClickTarget, ControlKey, ControlSource,
        ControlState, DirtyTracker, MODAL_CLASS, MODAL_CONTENT_CLASS, MODAL_DISPLAY,
        PopupContent, PopupId, PopupNode, PopupRegistry, PreviewGeneration, SettingsFormState,
        SettingsPageConfig, SubmitError, delete_profile_confirmation, encode_data_url,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement};

    mod dom;
    mod lifecycle;
    mod popup;
    mod preview;
    mod settings;

    use dom::*;
    use lifecycle::*;
    use popup::*;
    use preview::*;
    use settings::*;

    thread_local! {
        static CONFIG: RefCell<SettingsPageConfig> = RefCell::new(SettingsPageConfig::default());
        static FORM_STATE: RefCell<SettingsFormState> = RefCell::new(SettingsFormState::default());
        static TRACKED_CONTROLS: RefCell<DomControls> = RefCell::new(DomControls::default());
        static POPUPS: RefCell<PopupRegistry<MountedPopup>> = RefCell::new(PopupRegistry::default());
        static PREVIEW_GENERATION: Cell<PreviewGeneration> = Cell::new(PreviewGeneration::default());
        static DOCUMENT_CHANGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static IMAGE_PREVIEW_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        install_tracing();
        if let Err(error) = boot_when_ready() {
            gloo_console::error!(format!("settings page: boot failed: {error}"));
        }
    }

    /// Re-scans the page and resets change tracking, e.g. after the settings
    /// markup was replaced.
    #[wasm_bindgen]
    pub fn init_settings_page() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        install_tracing();
        boot(&document()?).map_err(JsValue::from)
    }

    /// Moves every changed control into a hidden form and posts it.
    #[wasm_bindgen]
    pub fn submit_form() {
        if let Err(error) = submit_changes() {
            gloo_console::warn!(format!("settings page: submit skipped: {error}"));
        }
    }

    #[wasm_bindgen]
    pub fn delete_profile() {
        if let Err(error) = confirm_delete_profile() {
            gloo_console::warn!(format!("settings page: delete confirmation failed: {error}"));
        }
    }

    /// Shows a popup holding the given elements. Non-element entries are
    /// skipped.
    #[wasm_bindgen(js_name = popup)]
    pub fn show_popup_elements(elements: js_sys::Array) {
        let elements: Vec<Element> = elements
            .iter()
            .filter_map(|value| match value.dyn_into::<Element>() {
                Ok(element) => Some(element),
                Err(_) => {
                    gloo_console::warn!("settings page: popup entry is not an element");
                    None
                }
            })
            .collect();
        if let Err(error) = show_popup(&elements) {
            gloo_console::warn!(format!("settings page: popup failed: {error}"));
        }
    }

    /// Shows `file` in the preview image. Resolves to `false` when a newer
    /// file was picked before this one finished loading.
    #[wasm_bindgen]
    pub async fn preview_image(file: web_sys::File) -> Result<bool, JsValue> {
        show_preview(file).await.map_err(JsValue::from)
    }

    #[wasm_bindgen]
    pub fn settings_state_json() -> String {
        let open_popups = POPUPS.with(|popups| popups.borrow().len());
        let snapshot = TRACKED_CONTROLS.with(|controls| {
            FORM_STATE.with(|state| state.borrow().snapshot(&*controls.borrow(), open_popups))
        });
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }
}

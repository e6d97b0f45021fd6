use std::collections::BTreeMap;

use super::*;

/// Tracked controls by key, in the order the initial scan found them.
#[derive(Default)]
pub(super) struct DomControls {
    elements: BTreeMap<ControlKey, Element>,
}

impl DomControls {
    pub(super) fn scan(document: &web_sys::Document, selector: &str) -> Result<Self, DomError> {
        let nodes = document
            .query_selector_all(selector)
            .map_err(|_| DomError::Operation("query tracked controls"))?;
        let mut elements = BTreeMap::new();
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .get(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let name = element.get_attribute("name").unwrap_or_default();
            let key = ControlKey::from_scan(index as usize, &element.id(), &name);
            elements.insert(key, element);
        }
        Ok(Self { elements })
    }

    pub(super) fn states(&self) -> Vec<(ControlKey, ControlState)> {
        self.elements
            .iter()
            .filter_map(|(key, element)| Some((key.clone(), read_control_state(element)?)))
            .collect()
    }

    /// Detaches the given controls from tracking, returning their elements.
    pub(super) fn take(&mut self, keys: &[ControlKey]) -> Vec<Element> {
        keys.iter()
            .filter_map(|key| self.elements.remove(key))
            .collect()
    }
}

impl ControlSource for DomControls {
    fn control_state(&self, key: &ControlKey) -> Option<ControlState> {
        self.elements.get(key).and_then(read_control_state)
    }
}

fn read_control_state(element: &Element) -> Option<ControlState> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(ControlState::new(input.value(), input.checked()));
    }
    if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(ControlState::text(select.value()));
    }
    None
}

/// Shared handler for document `input` and `change` events.
pub(super) fn recompute_submit_enabled() {
    let enabled = TRACKED_CONTROLS.with(|controls| {
        FORM_STATE.with(|state| state.borrow().submit_enabled(&*controls.borrow()))
    });
    let submit_id = config(|config| config.submit_button_id.clone());
    let Some(button) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(&submit_id))
    else {
        return;
    };
    let _ = button.toggle_attribute_with_force("disabled", !enabled);
}

pub(super) fn submit_changes() -> Result<(), DomError> {
    let document = document()?;
    let body = body(&document)?;
    let action = config(|config| config.settings_action.clone());

    let outgoing = TRACKED_CONTROLS.with(|controls| {
        FORM_STATE.with(|state| {
            state
                .borrow_mut()
                .prepare_submission(&*controls.borrow(), &action)
        })
    })?;

    let form = document
        .create_element("form")
        .map_err(|_| DomError::Operation("create outgoing form"))?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| DomError::Operation("create outgoing form"))?;
    form.set_method(outgoing.method.as_str());
    form.set_action(&outgoing.action);
    form.set_enctype(outgoing.enctype.as_str());
    if let Some(target) = config(|config| config.settings_target.clone()) {
        form.set_target(&target);
    }
    form.style()
        .set_property("display", "none")
        .map_err(|_| DomError::Operation("hide outgoing form"))?;

    let moved = TRACKED_CONTROLS.with(|controls| controls.borrow_mut().take(&outgoing.fields));
    for control in &moved {
        append(&form, control)?;
    }
    append(&body, &form)?;
    let submitted = form
        .submit()
        .map_err(|_| DomError::Operation("submit outgoing form"));
    recompute_submit_enabled();
    submitted
}

pub(super) fn install_change_tracking(document: &web_sys::Document) -> Result<(), DomError> {
    DOCUMENT_CHANGE_HANDLER.with(|slot| -> Result<(), DomError> {
        if slot.borrow().is_some() {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            recompute_submit_enabled();
        }));
        for event in ["input", "change"] {
            document
                .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                .map_err(|_| DomError::Operation("listen for control changes"))?;
        }
        *slot.borrow_mut() = Some(callback);
        Ok(())
    })
}

use super::*;

/// DOM handles of an open popup. Dropping it frees the listeners.
pub(super) struct MountedPopup {
    overlay: HtmlElement,
    // Only kept alive; the glyph leaves the page with the overlay.
    _close_click: Closure<dyn FnMut(web_sys::Event)>,
    window_click: Closure<dyn FnMut(web_sys::Event)>,
}

pub(super) fn show_popup(elements: &[Element]) -> Result<PopupId, DomError> {
    let document = document()?;
    let body = body(&document)?;

    let overlay = create_html_element(&document, "div")?;
    let content = create_html_element(&document, "div")?;
    let close = create_html_element(&document, "span")?;
    overlay.set_class_name(MODAL_CLASS);
    content.set_class_name(MODAL_CONTENT_CLASS);
    close.set_class_name(CLOSE_BUTTON_CLASS);
    close.set_text_content(Some(CLOSE_GLYPH));

    append(&content, &close)?;
    for element in elements {
        append(&content, element)?;
    }
    append(&overlay, &content)?;
    overlay
        .style()
        .set_property("display", MODAL_DISPLAY)
        .map_err(|_| DomError::Operation("show popup overlay"))?;

    let id = POPUPS.with(|popups| {
        popups
            .borrow_mut()
            .try_open_with(|id| mount_listeners(id, &overlay, &content, &close))
    })?;

    if let Err(error) = append(&body, &overlay) {
        dismiss_popup(id);
        return Err(error);
    }
    Ok(id)
}

pub(super) fn show_popup_content(content: &PopupContent) -> Result<PopupId, DomError> {
    let document = document()?;
    let elements = content
        .nodes
        .iter()
        .map(|node| render_popup_node(&document, node))
        .collect::<Result<Vec<_>, _>>()?;
    show_popup(&elements)
}

pub(super) fn confirm_delete_profile() -> Result<PopupId, DomError> {
    let href = config(|config| config.delete_account_href.clone());
    show_popup_content(&delete_profile_confirmation(&href))
}

/// Tears down one popup. Unknown or already dismissed ids are ignored.
pub(super) fn dismiss_popup(id: PopupId) {
    let Some(mounted) = POPUPS.with(|popups| popups.borrow_mut().dismiss(id)) else {
        return;
    };
    mounted.overlay.remove();
    if let Some(window) = web_sys::window() {
        let _ = window.remove_event_listener_with_callback(
            "click",
            mounted.window_click.as_ref().unchecked_ref(),
        );
    }
    // The dismissing closure is still on the stack; free it after this turn.
    spawn_local(async move {
        drop(mounted);
    });
}

fn mount_listeners(
    id: PopupId,
    overlay: &HtmlElement,
    content: &HtmlElement,
    close: &HtmlElement,
) -> Result<MountedPopup, DomError> {
    let close_click = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        handle_click(id, ClickTarget::CloseGlyph);
    }));
    close
        .add_event_listener_with_callback("click", close_click.as_ref().unchecked_ref())
        .map_err(|_| DomError::Operation("listen for close clicks"))?;

    let overlay_node = overlay.clone();
    let content_node = content.clone();
    let window_click = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
        handle_click(id, classify_click(&event, &overlay_node, &content_node));
    }));
    window()?
        .add_event_listener_with_callback("click", window_click.as_ref().unchecked_ref())
        .map_err(|_| DomError::Operation("listen for overlay clicks"))?;

    Ok(MountedPopup {
        overlay: overlay.clone(),
        _close_click: close_click,
        window_click,
    })
}

fn handle_click(id: PopupId, target: ClickTarget) {
    if target.dismisses() {
        dismiss_popup(id);
    }
}

fn classify_click(
    event: &web_sys::Event,
    overlay: &HtmlElement,
    content: &HtmlElement,
) -> ClickTarget {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
    else {
        return ClickTarget::Outside;
    };
    if overlay.is_same_node(Some(&target)) {
        ClickTarget::Overlay
    } else if content.contains(Some(&target)) {
        ClickTarget::Content
    } else {
        ClickTarget::Outside
    }
}

fn render_popup_node(document: &web_sys::Document, node: &PopupNode) -> Result<Element, DomError> {
    let element = document
        .create_element(&node.tag())
        .map_err(|_| DomError::Operation("create popup element"))?;
    element.set_text_content(Some(node.text()));
    if let PopupNode::Link { href, class, .. } = node {
        element
            .set_attribute("href", href)
            .map_err(|_| DomError::Operation("set popup link href"))?;
        if let Some(class) = class {
            element.set_class_name(class);
        }
    }
    Ok(element)
}

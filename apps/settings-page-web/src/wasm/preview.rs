use super::*;

pub(super) fn install_image_preview(document: &web_sys::Document) -> Result<(), DomError> {
    let input_id = config(|config| config.image_input_id.clone());
    let input: HtmlInputElement = element_by_id(document, &input_id, "an input")?;

    IMAGE_PREVIEW_HANDLER.with(|slot| -> Result<(), DomError> {
        if slot.borrow().is_some() {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            preview_selected_image(&event);
        }));
        input
            .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
            .map_err(|_| DomError::Operation("listen for image selection"))?;
        *slot.borrow_mut() = Some(callback);
        Ok(())
    })
}

/// Shows the first selected file in the preview image. Nothing happens when
/// the selection is empty.
fn preview_selected_image(event: &web_sys::Event) {
    let Some(file) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
    else {
        return;
    };
    spawn_local(async move {
        if let Err(error) = show_preview(file).await {
            gloo_console::warn!(format!("settings page: image preview failed: {error}"));
        }
    });
}

/// Returns `false` without touching the preview when another file was picked
/// while this one was being read.
pub(super) async fn show_preview(file: web_sys::File) -> Result<bool, DomError> {
    let ticket = PREVIEW_GENERATION.with(|generation| {
        let mut next = generation.get();
        let ticket = next.begin();
        generation.set(next);
        ticket
    });
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| DomError::FileRead)?;
    if !PREVIEW_GENERATION.with(|generation| generation.get().is_current(ticket)) {
        return Ok(false);
    }
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let url = encode_data_url(&file.type_(), &bytes);

    let preview_id = config(|config| config.preview_image_id.clone());
    let image: HtmlImageElement = element_by_id(&document()?, &preview_id, "an image")?;
    image.set_src(&url);
    Ok(true)
}

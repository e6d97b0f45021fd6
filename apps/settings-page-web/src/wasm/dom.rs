use super::*;

#[derive(Debug, thiserror::Error)]
pub(super) enum DomError {
    #[error("window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("document body is unavailable")]
    NoBody,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element #{id} is not {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("failed to {0}")]
    Operation(&'static str),
    #[error("failed to read selected file")]
    FileRead,
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

pub(super) fn window() -> Result<web_sys::Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub(super) fn document() -> Result<web_sys::Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub(super) fn body(document: &web_sys::Document) -> Result<HtmlElement, DomError> {
    document.body().ok_or(DomError::NoBody)
}

pub(super) fn create_html_element(
    document: &web_sys::Document,
    tag: &str,
) -> Result<HtmlElement, DomError> {
    document
        .create_element(tag)
        .map_err(|_| DomError::Operation("create element"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::Operation("create html element"))
}

pub(super) fn append(parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), DomError> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|_| DomError::Operation("append child"))
}

pub(super) fn element_by_id<T: JsCast>(
    document: &web_sys::Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElement {
            id: id.to_string(),
            expected,
        })
}

pub(super) fn config<T>(read: impl FnOnce(&SettingsPageConfig) -> T) -> T {
    CONFIG.with(|config| read(&config.borrow()))
}

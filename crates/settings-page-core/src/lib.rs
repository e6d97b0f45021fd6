//! DOM-free logic behind the settings page: change tracking, submission
//! planning, popup content, and image preview encoding.

pub mod config;
pub mod control;
pub mod popup;
pub mod preview;
pub mod submission;
pub mod tracker;

pub use config::{CONFIG_GLOBAL, ConfigError, SettingsPageConfig};
pub use control::{ControlKey, ControlState};
pub use popup::{
    CLOSE_BUTTON_CLASS, CLOSE_GLYPH, ClickTarget, MODAL_CLASS, MODAL_CONTENT_CLASS,
    MODAL_DISPLAY, PopupContent, PopupId, PopupNode, PopupRegistry,
    delete_profile_confirmation,
};
pub use preview::{DATA_URL_PREFIX, PreviewGeneration, PreviewTicket, encode_data_url};
pub use submission::{
    FormEnctype, FormMethod, OutgoingForm, SettingsFormState, SettingsSnapshot, SubmitError,
};
pub use tracker::{ControlSource, DirtyTracker};

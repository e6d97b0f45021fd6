use std::collections::BTreeMap;

pub const MODAL_CLASS: &str = "modal";
pub const MODAL_CONTENT_CLASS: &str = "modal-content";
pub const CLOSE_BUTTON_CLASS: &str = "close-button";
pub const CLOSE_GLYPH: &str = "\u{00d7}";
pub const MODAL_DISPLAY: &str = "flex";
pub const DANGER_BUTTON_CLASS: &str = "danger-button";

/// One element of popup content, rendered in order after the close glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupNode {
    Heading { level: u8, text: String },
    Paragraph(String),
    Link {
        href: String,
        label: String,
        class: Option<String>,
    },
}

impl PopupNode {
    pub fn tag(&self) -> String {
        match self {
            Self::Heading { level, .. } => format!("h{}", (*level).clamp(1, 6)),
            Self::Paragraph(_) => "p".to_string(),
            Self::Link { .. } => "a".to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Heading { text, .. } | Self::Paragraph(text) => text,
            Self::Link { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupContent {
    pub nodes: Vec<PopupNode>,
}

impl PopupContent {
    pub fn new(nodes: Vec<PopupNode>) -> Self {
        Self { nodes }
    }
}

pub fn delete_profile_confirmation(delete_account_href: &str) -> PopupContent {
    PopupContent::new(vec![
        PopupNode::Heading {
            level: 3,
            text: "Confirm deleting profile".to_string(),
        },
        PopupNode::Paragraph(
            "You are about to delete your profile, this change will be irreversible!".to_string(),
        ),
        PopupNode::Link {
            href: delete_account_href.to_string(),
            label: "Delete Profile".to_string(),
            class: Some(DANGER_BUTTON_CLASS.to_string()),
        },
    ])
}

/// Where a click landed relative to an open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay background itself.
    Overlay,
    CloseGlyph,
    /// The content panel or anything inside it.
    Content,
    /// Somewhere else on the page.
    Outside,
}

impl ClickTarget {
    pub fn dismisses(self) -> bool {
        matches!(self, Self::Overlay | Self::CloseGlyph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PopupId(u64);

/// Open popups keyed by id. Each entry owns whatever the caller needs to
/// tear the popup down.
#[derive(Debug)]
pub struct PopupRegistry<T> {
    next_id: u64,
    open: BTreeMap<PopupId, T>,
}

impl<T> Default for PopupRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            open: BTreeMap::new(),
        }
    }
}

impl<T> PopupRegistry<T> {
    pub fn open(&mut self, popup: T) -> PopupId {
        match self.try_open_with(|_| Ok::<_, std::convert::Infallible>(popup)) {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }

    /// Opens a popup whose payload needs its own id, e.g. listeners that
    /// dismiss it. The id is only consumed when `build` succeeds.
    pub fn try_open_with<E>(
        &mut self,
        build: impl FnOnce(PopupId) -> Result<T, E>,
    ) -> Result<PopupId, E> {
        let id = PopupId(self.next_id);
        let popup = build(id)?;
        self.next_id += 1;
        self.open.insert(id, popup);
        tracing::debug!(popup = id.0, open = self.open.len(), "popup opened");
        Ok(id)
    }

    /// Removes exactly the given popup. A second call for the same id is a
    /// no-op returning `None`.
    pub fn dismiss(&mut self, id: PopupId) -> Option<T> {
        let popup = self.open.remove(&id)?;
        tracing::debug!(popup = id.0, open = self.open.len(), "popup dismissed");
        Some(popup)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

//! Transient success/error notice.
//!
//! At most one banner exists. Showing a new one replaces the current one of
//! either kind. Dismissal is keyed by id so the timer of a replaced banner
//! never removes its successor.

/// Banner severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success-message",
            BannerKind::Error => "error-message",
        }
    }
}

/// Form the banner is appended to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAnchor {
    Upload,
    Generate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub anchor: FormAnchor,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct BannerState {
    current: Option<Banner>,
    next_id: u64,
}

impl BannerState {
    /// Replace any visible banner and return the new banner's id.
    pub fn show(&mut self, kind: BannerKind, anchor: FormAnchor, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Banner {
            id,
            kind,
            anchor,
            text: text.into(),
        });
        id
    }

    /// Remove banner `id` if it is still the visible one.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|banner| banner.id == id) {
            self.current = None;
        }
    }

    pub(crate) fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// The banner, if it belongs to `anchor`.
    pub fn at(&self, anchor: FormAnchor) -> Option<&Banner> {
        self.current().filter(|banner| banner.anchor == anchor)
    }
}

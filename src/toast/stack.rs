use serde::{Deserialize, Serialize};

pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// Contextual colour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    Primary,
    Secondary,
    Light,
    Dark,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Primary => "primary",
            Severity::Secondary => "secondary",
            Severity::Light => "light",
            Severity::Dark => "dark",
        }
    }

    pub fn toast_class(self) -> String {
        format!(
            "toast align-items-center text-bg-{} border-0 show",
            self.as_str()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Toasts currently on screen, in the order they were shown.
///
/// The container comes into existence with the first toast and stays after
/// the last one is gone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastStack {
    container: Option<Vec<Toast>>,
    next_id: u64,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast, creating the container on first use. Returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.container.get_or_insert_with(Vec::new).push(Toast {
            id,
            message: message.into(),
            severity,
        });
        id
    }

    /// Remove a toast. Removing one that is already gone does nothing.
    pub fn remove(&mut self, id: u64) -> bool {
        let Some(toasts) = self.container.as_mut() else {
            return false;
        };
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }

    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn toasts(&self) -> &[Toast] {
        self.container.as_deref().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts().is_empty()
    }
}

//! Text overlay the host page mirrors into its DOM info panel.
//!
//! Rust owns the content; TypeScript polls `revision` and re-renders the
//! panel element only when it changes.

use serde::Serialize;

/// Content of the info panel plus its visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    pub basic_info: String,
    pub interesting_fact: String,
    /// Bumped on every change so the host can skip redundant DOM writes.
    pub revision: u32,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel content and make it visible.
    pub fn show(
        &mut self,
        title: impl Into<String>,
        basic_info: impl Into<String>,
        interesting_fact: impl Into<String>,
    ) {
        self.title = title.into();
        self.basic_info = basic_info.into();
        self.interesting_fact = interesting_fact.into();
        self.visible = true;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Serialize for the host.
    pub fn to_json(&self) -> String {
        // A struct of strings and scalars cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

use serde::{Deserialize, Serialize};

/// A single pre-authored asset the matcher can hand back to the viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Stable identifier, unique across the catalog.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Free-text paragraph used to build the semantic representation.
    pub description: String,
    /// Locator of the renderable asset. Opaque to the engine.
    pub url: String,
    /// Lowercase keywords in priority order. Never empty once inside a catalog.
    pub tags: Vec<String>,
}

impl AssetDescriptor {
    /// Text embedded for this entry on the semantic path: name, description and tags
    /// joined by single spaces.
    pub fn composite_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len() + self.description.len() + self.tags.len() * 12 + 2,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.description);
        text.push(' ');
        text.push_str(&self.tags.join(" "));
        text
    }
}

//! Routing of free-text requests made once an itinerary exists.

const EDIT_KEYWORDS: &[&str] = &["edit", "change", "modify"];
const SUGGEST_KEYWORDS: &[&str] = &["suggest", "more location", "additional place"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestIntent {
    Edit,
    Suggest,
    /// Anything else is answered as plain conversation
    Chat,
}

impl RequestIntent {
    /// Edit keywords win over suggestion keywords.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if EDIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            RequestIntent::Edit
        } else if SUGGEST_KEYWORDS.iter().any(|k| lower.contains(k)) {
            RequestIntent::Suggest
        } else {
            RequestIntent::Chat
        }
    }
}

use super::line::{Anchor, Color, EntityIndex};

/// A text label attached to the scene, one per structure pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub index: Option<EntityIndex>,
    pub text: String,
    pub anchors: Vec<Anchor>,
    pub color: Color,
}

impl Label {
    pub fn new(text: &str, anchors: Vec<Anchor>) -> Self {
        Self {
            index: None,
            text: text.to_string(),
            anchors,
            color: Color::default(),
        }
    }
}

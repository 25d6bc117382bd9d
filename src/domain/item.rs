// ============================================================
// Layer 3 - Item
// ============================================================
// The unit a renderer consumes: one line of a two-level list.
// Top items are questions (or copy labels in an answer key),
// sub items are answers (or correct options).

use std::path::{Path, PathBuf};

use super::answer::{is_no_image, no_image};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLevel {
    Top,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub level: ItemLevel,
    pub text:  String,
    /// "." when there is no image, never absent
    pub image: PathBuf,
}

impl Item {
    pub fn new(level: ItemLevel, text: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self {
            level,
            text:  text.into(),
            image: image.into(),
        }
    }

    pub fn top(text: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self::new(ItemLevel::Top, text, image)
    }

    pub fn sub(text: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self::new(ItemLevel::Sub, text, image)
    }

    /// An item without image
    pub fn text_only(level: ItemLevel, text: impl Into<String>) -> Self {
        Self::new(level, text, no_image())
    }

    pub fn image(&self) -> Option<&Path> {
        if is_no_image(&self.image) {
            None
        } else {
            Some(&self.image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_has_sentinel_image() {
        let item = Item::text_only(ItemLevel::Sub, "A");
        assert_eq!(item.image, PathBuf::from("."));
        assert_eq!(item.image(), None);
    }

    #[test]
    fn test_image_is_exposed() {
        let item = Item::top("q", "pics/q.png");
        assert_eq!(item.level, ItemLevel::Top);
        assert_eq!(item.image(), Some(Path::new("pics/q.png")));
    }
}

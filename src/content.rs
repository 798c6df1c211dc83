//! Static card content
//!
//! Everything personal (the name, the photos, the letter, the music track)
//! lives in one embedded JSON document so the card can be re-dedicated
//! without touching code. A malformed document logs a warning and falls
//! back to compiled-in defaults.

use serde::Deserialize;

const CONTENT_JSON: &str = include_str!("../assets/content.json");

/// A gallery photo reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    pub id: u32,
    pub src: String,
    pub caption: String,
    pub alt: String,
}

/// The whole card's static content
#[derive(Debug, Clone, Deserialize)]
pub struct CardContent {
    /// Recipient name shown in the landing heading
    pub name: String,
    /// Looping background track
    pub music_src: String,
    /// Ordered photo list consumed read-only by the gallery
    pub photos: Vec<Photo>,
    /// Preformatted letter text, rendered verbatim with line breaks kept
    pub letter: String,
}

impl CardContent {
    /// Parse the embedded document, falling back to defaults on error
    pub fn load() -> Self {
        match serde_json::from_str(CONTENT_JSON) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("embedded content is invalid ({err}); using defaults");
                Self::fallback()
            }
        }
    }

    fn fallback() -> Self {
        Self {
            name: "[Her Name]".to_string(),
            music_src: "/music/happy-birthday.mp3".to_string(),
            photos: vec![Photo {
                id: 1,
                src: "/photos/photo1.jpg".to_string(),
                caption: "Beautiful memories".to_string(),
                alt: "A favorite photo".to_string(),
            }],
            letter: "Happy birthday!\n\nThis card is still waiting for its letter.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_content_parses() {
        let content: CardContent = serde_json::from_str(CONTENT_JSON).expect("embedded JSON");
        assert!(!content.name.is_empty());
        assert!(!content.photos.is_empty());
        assert!(content.letter.contains('\n'));
    }

    #[test]
    fn test_load_never_panics() {
        let content = CardContent::load();
        assert!(!content.music_src.is_empty());
    }
}

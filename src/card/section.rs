//! Scroll-target table for the page sections

/// The card's sections, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Landing,
    Gallery,
    Letter,
    Interactive,
    Final,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Landing,
        Section::Gallery,
        Section::Letter,
        Section::Interactive,
        Section::Final,
    ];

    /// DOM anchor id of the section's top boundary
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Landing => "landing",
            Section::Gallery => "gallery",
            Section::Letter => "letter",
            Section::Interactive => "interactive",
            Section::Final => "final",
        }
    }

    /// Reverse lookup used by `data-scroll-to` buttons
    pub fn from_anchor(anchor: &str) -> Option<Section> {
        Section::ALL.iter().copied().find(|s| s.anchor() == anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_roundtrip() {
        for section in Section::ALL {
            assert_eq!(Section::from_anchor(section.anchor()), Some(section));
        }
    }

    #[test]
    fn test_unknown_anchor() {
        assert_eq!(Section::from_anchor("guestbook"), None);
    }
}

//! Song field selection for library search.

use bitflags::bitflags;

use crate::model::{Song, contains_ignore_case};

bitflags! {
    /// Which song fields a search query is matched against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SearchFields: u8 {
        const TITLE = 0b001;
        const ARTIST = 0b010;
        const GENRE = 0b100;
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::TITLE
    }
}

impl SearchFields {
    /// Case-insensitive substring match against any selected field.
    pub fn matches(self, song: &Song, query: &str) -> bool {
        (self.contains(Self::TITLE) && contains_ignore_case(&song.title, query))
            || (self.contains(Self::ARTIST) && contains_ignore_case(&song.artist, query))
            || (self.contains(Self::GENRE) && contains_ignore_case(&song.genre, query))
    }
}

//! Language catalog
//!
//! The catalog is the fixed list of languages the menu can switch to. A
//! row's index is its position on screen; its id is the console's system
//! parameter value and is what gets persisted and written to the registry.

/// Console system-parameter language ids
pub mod lang {
    pub const JAPANESE: i32 = 0;
    pub const ENGLISH_US: i32 = 1;
    pub const FRENCH: i32 = 2;
    pub const SPANISH: i32 = 3;
    pub const GERMAN: i32 = 4;
    pub const ITALIAN: i32 = 5;
    pub const DUTCH: i32 = 6;
    pub const PORTUGUESE_PT: i32 = 7;
    pub const RUSSIAN: i32 = 8;
    pub const KOREAN: i32 = 9;
    pub const CHINESE_T: i32 = 10;
    pub const CHINESE_S: i32 = 11;
    pub const FINNISH: i32 = 12;
    pub const SWEDISH: i32 = 13;
    pub const DANISH: i32 = 14;
    pub const NORWEGIAN: i32 = 15;
    pub const POLISH: i32 = 16;
    pub const PORTUGUESE_BR: i32 = 17;
    pub const ENGLISH_GB: i32 = 18;
    pub const TURKISH: i32 = 19;
}

/// A single selectable language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub id: i32,
    pub name: &'static str,
}

const fn language(id: i32, name: &'static str) -> Language {
    Language { id, name }
}

/// Built-in console languages, in menu order
pub static LANGUAGES: &[Language] = &[
    language(lang::ENGLISH_GB, "English (UK)"),
    language(lang::ENGLISH_US, "English (US)"),
    language(lang::GERMAN, "Deutsch"),
    language(lang::FRENCH, "Français"),
    language(lang::SPANISH, "Español"),
    language(lang::ITALIAN, "Italiano"),
    language(lang::DUTCH, "Nederlands"),
    language(lang::PORTUGUESE_PT, "Português (PT)"),
    language(lang::PORTUGUESE_BR, "Português (BR)"),
    language(lang::RUSSIAN, "Русский"),
    language(lang::TURKISH, "Türkçe"),
    language(lang::POLISH, "Polski"),
    language(lang::FINNISH, "Suomi"),
    language(lang::SWEDISH, "Svenska"),
    language(lang::DANISH, "Dansk"),
    language(lang::NORWEGIAN, "Norsk"),
    language(lang::JAPANESE, "日本語"),
    language(lang::KOREAN, "한국어"),
    language(lang::CHINESE_S, "简体中文"),
    language(lang::CHINESE_T, "繁體中文"),
];

/// Ordered, immutable list of languages
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [Language],
}

impl Catalog {
    pub const fn new(entries: &'static [Language]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Language> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.entries.iter()
    }

    /// Catalog index of the first entry with this id
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.entries.iter().position(|lang| lang.id == id)
    }

    pub fn name_of(&self, id: i32) -> Option<&'static str> {
        self.entries.iter().find(|lang| lang.id == id).map(|lang| lang.name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(LANGUAGES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.get(0).map(|l| l.id), Some(lang::ENGLISH_GB));
        assert_eq!(catalog.get(2).map(|l| l.name), Some("Deutsch"));
        assert_eq!(catalog.get(19).map(|l| l.id), Some(lang::CHINESE_T));
        assert!(catalog.get(20).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::default();
        for (i, lang) in catalog.iter().enumerate() {
            assert_eq!(catalog.index_of(lang.id), Some(i), "{}", lang.name);
        }
    }

    #[test]
    fn test_lookup_unknown_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.index_of(99), None);
        assert_eq!(catalog.name_of(99), None);
        assert_eq!(catalog.name_of(lang::JAPANESE), Some("日本語"));
    }
}

//! UI strings
//!
//! Two fixed tables, picked once from the system language at startup.

use crate::catalog::lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub hint: &'static str,
    pub confirm_reboot: &'static str,
    pub current: &'static str,
    pub set_failed: &'static str,
    pub reboot_failed: &'static str,
}

pub const ENGLISH: Labels = Labels {
    title: "QuickLang - Select language",
    hint: "X:apply  O:exit  ▲/▼:move  ◀/▶:jump fav  △:toggle fav",
    confirm_reboot: "Language set. X = Reboot, O = Cancel",
    current: "(current)",
    set_failed: "Could not set language",
    reboot_failed: "Reboot failed",
};

pub const GERMAN: Labels = Labels {
    title: "QuickLang - Sprache wählen",
    hint: "X:anwenden  O:beenden  ▲/▼:bewegen  ◀/▶:Favorit  △:Favorit an/aus",
    confirm_reboot: "Sprache gesetzt. X = Neustart, O = Abbrechen",
    current: "(aktuell)",
    set_failed: "Sprache konnte nicht gesetzt werden",
    reboot_failed: "Neustart fehlgeschlagen",
};

impl Labels {
    pub fn for_language(id: i32) -> &'static Labels {
        match id {
            lang::GERMAN => &GERMAN,
            _ => &ENGLISH,
        }
    }
}

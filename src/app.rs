//! Menu state machine
//!
//! `App` owns everything the menu shows and reacts to one batch of newly
//! pressed buttons at a time, or to held-button samples via `handle_held`.
//! Rendering reads it through the accessors below.

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::favorites::{Favorites, FavoritesStore};
use crate::input::{Button, ButtonSet, EdgeDetector};
use crate::labels::Labels;
use crate::navigator::{Move, Navigation};
use crate::platform::{Platform, DEFAULT_LANGUAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    /// Language written; waiting for reboot or cancel
    ConfirmReboot,
}

/// Whether the main loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App<P: Platform> {
    catalog: Catalog,
    store: FavoritesStore,
    favorites: Favorites,
    nav: Navigation,
    screen: Screen,
    platform: P,
    current: i32,
    labels: &'static Labels,
    status: Option<&'static str>,
    edge: EdgeDetector,
}

impl<P: Platform> App<P> {
    pub fn new(catalog: Catalog, store: FavoritesStore, window: usize, platform: P) -> Self {
        let favorites = store.load();
        let current = platform.current_language().unwrap_or_else(|e| {
            warn!("Could not read system language: {}", e);
            DEFAULT_LANGUAGE
        });
        info!(
            "Menu ready: {} languages, {} favorites, current language {}",
            catalog.len(),
            favorites.len(),
            current
        );

        Self {
            catalog,
            store,
            favorites,
            nav: Navigation::new(window),
            screen: Screen::List,
            platform,
            current,
            labels: Labels::for_language(current),
            status: None,
            edge: EdgeDetector::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn current_language(&self) -> i32 {
        self.current
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Feed one sample of held buttons
    pub fn handle_held(&mut self, held: ButtonSet) -> Flow {
        let pressed = self.edge.pressed(held);
        self.handle_pressed(pressed)
    }

    /// Handle newly pressed buttons in handling order. Stops early when a
    /// button exits or switches screens.
    pub fn handle_pressed(&mut self, pressed: ButtonSet) -> Flow {
        let screen = self.screen;
        for button in pressed.iter() {
            let flow = match screen {
                Screen::List => self.handle_list(button),
                Screen::ConfirmReboot => self.handle_confirm(button),
            };
            if flow == Flow::Exit {
                return Flow::Exit;
            }
            if self.screen != screen {
                break;
            }
        }
        Flow::Continue
    }

    fn handle_list(&mut self, button: Button) -> Flow {
        let mv = match button {
            Button::Down => Move::Down,
            Button::Up => Move::Up,
            Button::Right => Move::NextFavorite,
            Button::Left => Move::PreviousFavorite,
            Button::Triangle => {
                self.nav
                    .toggle_favorite(&self.catalog, &self.store, &mut self.favorites);
                return Flow::Continue;
            }
            Button::Cross => {
                self.apply_selection();
                return Flow::Continue;
            }
            Button::Circle => return Flow::Exit,
        };
        self.nav = self.nav.apply(mv, &self.catalog, &self.favorites);
        Flow::Continue
    }

    fn apply_selection(&mut self) {
        let Some(lang) = self.catalog.get(self.nav.selected()) else {
            return;
        };
        match self.platform.set_language(lang.id) {
            Ok(()) => {
                info!("Language set to {} ({})", lang.name, lang.id);
                self.status = None;
                self.screen = Screen::ConfirmReboot;
            }
            Err(e) => {
                warn!("Failed to set language {}: {}", lang.id, e);
                self.status = Some(self.labels.set_failed);
            }
        }
    }

    fn handle_confirm(&mut self, button: Button) -> Flow {
        match button {
            Button::Cross => match self.platform.request_reboot() {
                // Only reached when the reboot is simulated
                Ok(()) => Flow::Exit,
                Err(e) => {
                    warn!("Reboot request failed: {}", e);
                    self.status = Some(self.labels.reboot_failed);
                    self.screen = Screen::List;
                    Flow::Continue
                }
            },
            Button::Circle => {
                self.screen = Screen::List;
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }
}

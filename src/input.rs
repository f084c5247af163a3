//! Buttons and edge-triggered sampling
//!
//! The console reports which buttons are held on every poll; the menu only
//! reacts to buttons that went down since the previous poll.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Apply
    Cross,
    /// Exit / cancel
    Circle,
    /// Toggle favorite
    Triangle,
}

impl Button {
    /// Order in which simultaneous presses are handled
    pub const HANDLING_ORDER: [Button; 7] = [
        Button::Down,
        Button::Up,
        Button::Right,
        Button::Left,
        Button::Cross,
        Button::Triangle,
        Button::Circle,
    ];

    fn bit(self) -> u8 {
        match self {
            Button::Up => 1 << 0,
            Button::Down => 1 << 1,
            Button::Left => 1 << 2,
            Button::Right => 1 << 3,
            Button::Cross => 1 << 4,
            Button::Circle => 1 << 5,
            Button::Triangle => 1 << 6,
        }
    }

    /// Terminal key bindings
    pub fn from_key(code: KeyCode) -> Option<Button> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Button::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Button::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(Button::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Button::Right),
            KeyCode::Enter | KeyCode::Char('x') => Some(Button::Cross),
            KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => Some(Button::Circle),
            KeyCode::Char('t') | KeyCode::Char('f') | KeyCode::Char(' ') => {
                Some(Button::Triangle)
            }
            _ => None,
        }
    }
}

/// Set of buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Buttons in `self` that are not in `other`
    pub fn without(self, other: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 & !other.0)
    }

    /// Contained buttons in handling order
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::HANDLING_ORDER
            .into_iter()
            .filter(move |&button| self.contains(button))
    }

    /// Buttons pressed by a batch of terminal key events. Each press event
    /// is a fresh press, so the result is already edge-triggered.
    pub fn from_key_presses<I: IntoIterator<Item = KeyEvent>>(events: I) -> ButtonSet {
        events
            .into_iter()
            .filter(|key| key.kind == KeyEventKind::Press)
            .filter_map(|key| Button::from_key(key.code))
            .collect()
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = ButtonSet::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// Turns held-button samples into newly pressed buttons
#[derive(Debug, Default)]
pub struct EdgeDetector {
    previous: ButtonSet,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&mut self, held: ButtonSet) -> ButtonSet {
        let pressed = held.without(self.previous);
        self.previous = held;
        pressed
    }
}

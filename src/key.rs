//! Type-safe key bindings for the components in this crate.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the short help text shown to users. Components expose their
//! bindings through a [`KeyMap`] so an application can render contextual help.
//!
//! ```rust
//! use bubbletea_expandable::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let toggle = Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
//!     .with_help("enter", "expand/collapse");
//! let refresh = Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+r", "reload");
//!
//! struct Keys {
//!     toggle: Binding,
//!     refresh: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.toggle]
//!     }
//!
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.toggle, &self.refresh]]
//!     }
//! }
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Human readable key label, e.g. `"↑/k"`.
    pub key: String,
    /// What the binding does, e.g. `"up"`.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given keys.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// The key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true if the key message triggers this binding.
    ///
    /// Shift is ignored for character keys because terminals already report
    /// the shifted character (`G` rather than shift+`g`).
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys.iter().any(|press| {
            if press.code != msg.key {
                return false;
            }
            let held = match msg.key {
                KeyCode::Char(_) => msg.modifiers.difference(KeyModifiers::SHIFT),
                _ => msg.modifiers,
            };
            held == press.modifiers
        })
    }
}

/// Components that expose their key bindings for help rendering.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

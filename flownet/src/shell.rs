//! Collaborators supplied by the window shell. Each call blocks until the
//! user answers; "cancelled" is a regular answer, not an error.

use std::path::PathBuf;

pub trait ConfirmPrompt {
    fn confirm(&mut self, description: &str) -> bool;
}

pub trait EdgeValueDialog {
    /// Shows the current values; `None` when the user cancels.
    fn request(&mut self, flow: &str, capacity: &str) -> Option<(String, String)>;
}

pub trait FileChooser {
    fn choose_open(&mut self) -> Option<PathBuf>;
}

pub trait Notifier {
    fn warn(&mut self, title: &str, message: &str);
}

impl<F: FnMut(&str) -> bool> ConfirmPrompt for F {
    fn confirm(&mut self, description: &str) -> bool {
        self(description)
    }
}

impl<F: FnMut(&str, &str) -> Option<(String, String)>> EdgeValueDialog for F {
    fn request(&mut self, flow: &str, capacity: &str) -> Option<(String, String)> {
        self(flow, capacity)
    }
}

impl<F: FnMut() -> Option<PathBuf>> FileChooser for F {
    fn choose_open(&mut self) -> Option<PathBuf> {
        self()
    }
}

/// Keeps every warning; useful for shells that render messages later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectingNotifier {
    pub messages: Vec<(String, String)>,
}

impl Notifier for CollectingNotifier {
    fn warn(&mut self, title: &str, message: &str) {
        self.messages.push((title.to_string(), message.to_string()));
    }
}

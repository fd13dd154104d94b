//!

use std::cell::RefCell;
use std::rc::Rc;

/// The last text cut from a line, ready to be pasted back.
///
/// Clones share one store: editors built with clones of the same
/// `Clipboard` cut and paste to and from the same place.
#[derive(Clone, Default, Debug)]
pub struct Clipboard(Rc<RefCell<Option<String>>>);

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = Some(text.into());
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

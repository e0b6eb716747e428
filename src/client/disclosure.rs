/// Open/closed flag behind drawers, dialogs and confirmation prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disclosure {
    is_open: bool,
}

impl Disclosure {
    pub fn new(initial: bool) -> Self {
        Self { is_open: initial }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

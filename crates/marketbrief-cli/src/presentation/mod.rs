pub mod formatters;
pub mod views;

/// Console display switches shared by all views.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub enable_color: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { enable_color: false }
    }
}

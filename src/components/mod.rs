mod board_canvas;
mod markdown;
mod sidebar;
mod toolbar;

pub use board_canvas::BoardCanvas;
pub use sidebar::Sidebar;
pub use toolbar::Toolbar;

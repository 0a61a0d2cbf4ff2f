pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod manifest;
pub mod scroll;
pub mod simulate;
pub mod surface;
pub mod theme;
pub mod themes;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use manifest::{BuiltPage, Manifest};
pub use surface::TerminalSurface;
pub use theme::Theme;
pub use themes::load_theme;

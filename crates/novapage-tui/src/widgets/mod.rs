mod header;
mod page_view;
mod popup;
mod status_bar;
mod toasts;

pub use header::HeaderWidget;
pub use page_view::PageViewWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use toasts::ToastWidget;

pub(crate) use popup::truncate_str;

pub mod config;
pub mod counter;
pub mod cursor;
pub mod document;
pub mod easing;
pub mod error;
pub mod form;
pub mod lazy;
pub mod nav;
pub mod page;
pub mod particles;
pub mod preloader;
pub mod reveal;
pub mod smooth_scroll;
pub mod surface;
pub mod timer;
pub mod toast;
pub mod typing;
pub mod viewport;

pub use config::{PageConfig, ScrollConfig};
pub use document::{Document, ElementDecl};
pub use easing::Easing;
pub use error::{Error, Result};
pub use form::{ContactForm, FormError, FormTransport, HttpTransport};
pub use page::{Page, PageTask};
pub use surface::{Bounds, Content, ElementId, Surface, Viewport};
pub use timer::{Millis, Timers};

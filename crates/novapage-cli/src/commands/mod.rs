pub mod preview;
pub mod simulate;
pub mod submit;

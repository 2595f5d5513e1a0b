pub mod colors;
pub mod styles;

pub use colors::TabPalette;

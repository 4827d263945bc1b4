pub mod decode;
pub mod font;

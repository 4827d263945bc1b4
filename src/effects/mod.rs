pub mod display;
pub mod fade;

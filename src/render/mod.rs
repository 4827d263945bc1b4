pub mod canvas;
pub(crate) mod composite;

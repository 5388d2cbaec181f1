mod base_component;

pub use base_component::*;

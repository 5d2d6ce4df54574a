pub mod defaults;
pub mod simulate;

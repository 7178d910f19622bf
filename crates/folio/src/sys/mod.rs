pub mod relay;
pub mod runtime;

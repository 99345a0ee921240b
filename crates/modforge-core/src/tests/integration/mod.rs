pub mod common;
pub mod discovery;
pub mod lifecycle;
pub mod providers;

pub mod cache;
pub mod dict;
pub mod frequency;
pub mod loader;
pub mod matcher;
pub mod settings;

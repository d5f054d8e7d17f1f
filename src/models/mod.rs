pub mod mapping;
pub mod stream;

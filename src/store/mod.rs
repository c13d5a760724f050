pub mod lock;
pub mod project;
pub mod text;
pub mod validate;

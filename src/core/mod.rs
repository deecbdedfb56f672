pub mod creator;
pub mod document;
pub mod session;
pub mod settings;
pub mod store;

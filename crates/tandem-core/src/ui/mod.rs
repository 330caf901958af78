//! Terminal feedback components

pub mod spinner;

pub use spinner::Spinner;

//! CLI library for testing purposes

pub mod check;
pub mod edit;
pub mod stats;
pub mod validation;
pub mod view;

pub use xliffcodec::Document;

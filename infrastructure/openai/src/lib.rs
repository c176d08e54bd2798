pub mod client;
pub mod language_model;

//! Index persistence.

pub mod file;

pub use file::{IndexStore, OnUnsorted, StoreConfig, load, save};

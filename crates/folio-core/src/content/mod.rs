//! Category content: deterministic items and their grid layout

pub mod catalog;
pub mod grid;

pub use catalog::{Catalog, Category};
pub use grid::{CellRect, ContentItem, GridLayout, ItemGenerator, Items, SourceTemplate};

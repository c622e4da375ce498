//! # Etiqueta - Sticker Label Composition Library
//!
//! Etiqueta turns tabular part/assembly data into fixed-size printable
//! labels with a QR payload, free-text fields, and an optional logo.
//! It provides:
//!
//! - **Schema resolution**: flexible column-name matching onto canonical
//!   label fields
//! - **Layout composition**: deterministic cell grids for a fixed physical
//!   label area, with measured row heights
//! - **Image fitting**: aspect-preserving sizing of logos and QR rasters
//! - **Preview rendering**: grayscale PNG pages via bitmap fonts
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::label::Composer;
//! use etiqueta::layout::LayoutConfig;
//! use etiqueta::render::{LabelRenderer, QrRaster, SpleenMetrics};
//! use etiqueta::source::MemoryTable;
//!
//! // Column names are matched loosely: "Assy Name" binds the assembly
//! // field, "PART" the part number, and so on.
//! let table = MemoryTable::new(
//!     ["Assy Name", "PART", "DESC"],
//!     vec![vec!["Engine", "P001", "Block"]],
//! );
//!
//! let composer = Composer::new(LayoutConfig::sticker_10x15(), SpleenMetrics)?;
//! let records = composer.compose_dataset(&table, Some(&QrRaster::default()))?;
//!
//! let renderer = LabelRenderer::new(LayoutConfig::sticker_10x15());
//! let png = renderer.render_png(&records[0])?;
//! assert!(!png.is_empty());
//! # Ok::<(), etiqueta::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Canonical fields and column resolution |
//! | [`layout`] | Geometry: config, measurement, fitting, composition |
//! | [`label`] | Per-dataset pipeline producing `LabelRecord`s |
//! | [`source`] | Tabular source contract and adapters |
//! | [`render`] | Preview rendering backend |
//! | [`error`] | Error types |
//!
//! The composition engine is pure and single-pass: schema resolution runs
//! once per dataset, every row composes independently (in parallel), and
//! output order always equals input order.

pub mod error;
pub mod label;
pub mod layout;
pub mod render;
pub mod schema;
pub mod source;

// Re-exports for convenience
pub use error::EtiquetaError;
pub use label::{Composer, LabelRecord};
pub use layout::LayoutConfig;

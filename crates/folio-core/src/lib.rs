//! Folio Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Folio layout
//! engine and its exporters. It includes:
//!
//! - **Geometry**: Page-space geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke and text styles, raster images and the [`draw::Document`]
//!   draw-operation model ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;

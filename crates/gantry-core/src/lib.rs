//! Gantry Core Types and Definitions
//!
//! This crate provides the foundational types for the gantry SysML diagram
//! converter. It includes:
//!
//! - **Identifiers**: String-interned qualified paths ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Edge styles, text metrics and boundary math ([`draw`] module)
//! - **Model**: The semantic element/relation model ([`model`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;

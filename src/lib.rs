//! Paramref Core Library
//!
//! This library loads declarative parameter-description tables for a
//! resource-inventory HTTP API (resource providers, resource classes,
//! inventories, allocation ratios), resolves their base-plus-override merge
//! directives into concrete descriptors, and renders the result into
//! documentation table rows.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generate;
pub mod render;
pub mod table;

pub use crate::{
    config::Config,
    descriptor::{ParamLocation, ParamType, ParameterDescriptor, RawNode},
    error::{Error, Result},
    generate::generate,
    render::{render_rows, RenderFormat, RenderOptions, RowContext},
    table::{ParameterTable, ResolvedTable},
};

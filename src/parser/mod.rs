//! Parsing for descriptor file formats.
//!
//! This module reads deck descriptors from YAML or lenient JSON files and
//! hands validated models to the builder.

pub mod descriptor;

pub use descriptor::{load_descriptor, parse_json_descriptor, parse_yaml_descriptor};

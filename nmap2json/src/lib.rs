//! Nmap XML scan report conversion.
//!
//! This library parses Nmap XML reports into a typed scan record and
//! serializes that record to JSON. The record types describe their own field
//! structure through `record-mapping-core`, so a search-engine index mapping
//! can be derived from the type alone, without inspecting scan data.
//!
//! # Architecture
//!
//! - [`xml`] — Minimal generic XML element tree and parser
//! - [`model`] — Typed scan record (`NmapRun` and nested structs)
//! - [`parser`] — Element tree to scan record loader
//! - `describe` — Field descriptors for mapping derivation, kept in
//!   lockstep with the serde attributes on the model
//!
//! # Examples
//!
//! ```ignore
//! use nmap2json::parser::parse_scan_file;
//! use record_mapping_core::derive_mapping;
//!
//! let scan = parse_scan_file("scan.xml".as_ref())?;
//! let json = serde_json::to_string_pretty(&scan)?;
//!
//! let mapping = derive_mapping::<nmap2json::model::NmapRun>()?;
//! println!("{}", mapping.to_json_pretty()?);
//! ```

mod describe;
pub mod model;
pub mod parser;
pub mod xml;

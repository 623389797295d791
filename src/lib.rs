//! # StadiumHQ
//!
//! A guide to London football stadiums built on Wikipedia's public APIs.
//!
//! ## Features
//!
//! - **Merged Summaries**: Combines the REST summary and the query API into one `SubjectSummary`
//! - **Never Fails**: Lookups degrade to a "not found" record instead of erroring
//! - **Static Maps**: Map image URLs for stadiums with coordinates, keyed from config

pub mod config;
pub mod maps;
pub mod stadiums;
pub mod subject;
pub mod wikipedia;

pub use config::Config;
pub use maps::StaticMap;
pub use stadiums::Catalogue;
pub use subject::{Coordinates, SubjectSummary};
pub use wikipedia::WikiClient;

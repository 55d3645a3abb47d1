//! campdir - a directory-style REST API for bootcamps and their courses
//!
//! CRUD over an in-process document store, query-string filtering and
//! pagination, geospatial radius search, and photo upload.

pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod logger;
pub mod model;
pub mod query;
pub mod seed;
pub mod store;
pub mod upload;

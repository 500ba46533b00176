//! Backend API: the portal's only source of data.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every record the portal shows is owned by the external tournament
//! backend. `client` is the shared HTTP wrapper (bearer token, JSON and
//! multipart bodies), `normalize` holds the defensive JSON readers,
//! `models` decodes loosely-shaped payloads into view records and
//! `endpoints` names each REST call the pages make.

pub mod client;
pub mod endpoints;
pub mod models;
pub mod normalize;

pub use client::{ApiError, ApiRequest, Backend, BackendClient, UploadFile, UploadForm};

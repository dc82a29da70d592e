//! HTTP handlers for the person resource and the API document.

pub mod docs;
pub mod people;

//! Infrastructure layer providing external integrations.
//!
//! This module contains the HTTP client for the specification generation endpoint.

pub mod clients;

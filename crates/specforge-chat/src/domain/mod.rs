//! Core domain logic for the chat pipeline.
//!
//! This module contains the data models and the services that tokenize message
//! content, summarize sessions, and drive request/response exchanges, independent
//! of any terminal or network implementation details.

pub mod models;
pub mod services;

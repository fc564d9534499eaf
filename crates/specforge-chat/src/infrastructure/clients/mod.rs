mod spec_api;

pub use spec_api::*;

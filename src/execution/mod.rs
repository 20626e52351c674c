//! Execution layer
//!
//! - `http`: reqwest client construction, header building and interceptor hooks
//! - `executors`: the GET executor and the body decode/parse stages

pub mod executors;
pub mod http;

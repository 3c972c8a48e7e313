//! Library side of the `resp-chart` binary: configuration loading, logging
//! setup and the per-request chart pipeline.

#![allow(missing_docs)]

pub mod config;
pub mod logging;
pub mod pipeline;

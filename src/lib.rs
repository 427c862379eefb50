#![allow(async_fn_in_trait)]
pub mod acquisitions;
pub mod calendar;
pub mod catalog;
pub mod config;
mod error;
pub mod evalscript;
pub mod granule;
pub mod orbit;

pub use error::MosaicError;

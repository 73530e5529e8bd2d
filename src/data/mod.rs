//! Attribute sources and the transfer format.

pub mod attributes;
pub mod transfer;

//! LocalEats library exports for testing

pub mod core;
pub mod data;
pub mod storage;
pub mod tui;

#[cfg(test)]
pub mod test_support;

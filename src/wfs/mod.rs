pub mod client;
pub mod error;
pub mod extractor;
pub mod pagination;

#[cfg(test)]
pub(crate) mod fixtures;

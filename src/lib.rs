//! folio: content aggregation and page materialization for a blog + portfolio
//! site, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

#[cfg(test)]
mod test_support;

//! Marshalling API Integration Tests
//!
//! Tests for strata-client: REST flattening, batch properties, hydration,
//! cycle safety, vectors, and round-trip properties.

mod fixtures;

mod batch;
mod cycles;
mod flatten;
mod hydration;
mod roundtrip;
mod vectors;

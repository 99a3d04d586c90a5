//! Tests for the session issuer

#[cfg(test)]
mod service_tests;

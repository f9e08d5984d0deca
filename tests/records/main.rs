//! Integration tests for the record service: queries, create and ingest.

mod query;

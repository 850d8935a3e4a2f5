//! HTTP-level integration tests driving the router against the in-memory store.

mod document_test;
mod folder_test;
mod helpers;

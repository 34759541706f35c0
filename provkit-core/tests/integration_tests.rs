//! Integration tests for `provkit` core library

mod integration;

//! Integration tests for loading JSON files declared in configuration

mod plain_builder;
mod reload_on_change;
mod test_utils;

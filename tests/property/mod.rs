//! Property-based tests for file list binding and registration

mod registration_order;

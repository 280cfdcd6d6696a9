//! Integration tests for the notification bus.

mod bus_test;
mod helpers;
mod inbox_test;

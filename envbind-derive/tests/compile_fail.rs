//! Compile-fail tests to verify error messages
//!
//! These tests ensure that invalid tag attributes produce clear,
//! helpful error messages instead of confusing expansion errors.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}

pub mod locator_tests;

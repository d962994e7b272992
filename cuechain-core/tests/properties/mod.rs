//! Property test modules

mod clipboard_tests;
mod drag_drop_tests;
mod group_tests;
mod selection_tests;
mod strategies;
mod tree_tests;

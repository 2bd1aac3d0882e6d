#[path = "../common/mod.rs"]
mod common;

mod test_comparison_service;
mod test_session_service;

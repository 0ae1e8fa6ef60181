//! Request-scoped network operations behind the HTTP layer

pub mod interfaces;
pub mod url_analyzer;

pub use interfaces::InterfaceEnumerator;
pub use speed_test::SpeedTester;
pub use url_analyzer::UrlAnalyzer;

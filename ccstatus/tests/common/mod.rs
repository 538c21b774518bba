pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use assertions::{assert_contains, assert_json_file, assert_not_contains};
pub use fixtures::TestHome;
pub use logging::init_test_logging;

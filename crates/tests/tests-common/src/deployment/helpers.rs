use std::path::PathBuf;

/// The directory holding the static test configuration, relative to the project root.
pub const STATIC_CONFIGURATION_PATH: &str = "static/";

/// Find the project root via the crate root provided by `cargo test`,
/// and get a path relative to it.
/// This depends on the convention that this crate lives in `/crates/tests/tests-common`
/// and will break in the unlikely case that we change this
pub fn get_path_from_project_root(deployment_path: &str) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../");
    d.push(deployment_path);
    d
}

/// Route `log` output through `env_logger`, once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

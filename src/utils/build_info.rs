//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `quiz-battle <version> (<date> <commit>)`, shown by `--version`.
pub fn version_string() -> String {
    format!(
        "quiz-battle {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

use serde::Serialize;

/// Build metadata baked in at compile time by `build.rs`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub version: &'static str,
    pub rust_version: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        build_profile: option_env!("BUILD_PROFILE").unwrap_or("unknown"),
        build_features: option_env!("BUILD_FEATURES").unwrap_or("none"),
        version: option_env!("REPO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
        rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} build, features: {}, {})",
            self.version, self.build_profile, self.build_features, self.rust_version
        )
    }
}

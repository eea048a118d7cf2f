//! core::target
//!
//! Platform and architecture identification for delegate binaries.
//!
//! # Design
//!
//! Release assets are published under Node-ecosystem identifiers rather
//! than Rust's: `darwin` instead of `macos`, `x64` instead of `x86_64`,
//! `arm64` instead of `aarch64`. [`Target::host`] performs that mapping.
//! Identifiers with no known mapping pass through unchanged, so an
//! unfamiliar platform degrades to a recognizable asset name instead of
//! an error.
//!
//! Two file naming conventions coexist and share one rendering function:
//!
//! - qualified: `<name>-<platform>-<arch>` - release assets and bundled
//!   binaries, where one directory holds builds for many targets
//! - plain: `<name>` - installed executables and local build artifacts,
//!   which are target-specific by location
//!
//! Both carry an `.exe` suffix exactly when the platform is `windows`.
//!
//! # Example
//!
//! ```
//! use stagehand::core::target::{binary_file_name, Target};
//!
//! let target = Target::new("darwin", "arm64");
//! assert_eq!(binary_file_name("commit_message", &target, true),
//!            "commit_message-darwin-arm64");
//! assert_eq!(binary_file_name("commit_message", &target, false),
//!            "commit_message");
//! ```

/// A platform/architecture pair in release-asset vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Normalized platform identifier (`darwin`, `linux`, `windows`, ...).
    pub platform: String,
    /// Normalized architecture identifier (`x64`, `arm64`, ...).
    pub arch: String,
}

impl Target {
    /// Create a target from already-normalized identifiers.
    pub fn new(platform: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
        }
    }

    /// Identify the target this binary was compiled for.
    pub fn host() -> Self {
        Self {
            platform: map_platform(std::env::consts::OS),
            arch: map_arch(std::env::consts::ARCH),
        }
    }

    /// Whether this target uses Windows executable naming.
    pub fn is_windows(&self) -> bool {
        self.platform == "windows"
    }
}

/// Map a Rust platform identifier to release-asset vocabulary.
fn map_platform(os: &str) -> String {
    match os {
        "macos" => "darwin".to_string(),
        other => other.to_string(),
    }
}

/// Map a Rust architecture identifier to release-asset vocabulary.
fn map_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "x64".to_string(),
        "aarch64" => "arm64".to_string(),
        other => other.to_string(),
    }
}

/// Render the file name for a binary on a target.
///
/// `qualified` selects between the two naming conventions. The `.exe`
/// suffix is appended exactly when the platform is `windows`, in both.
pub fn binary_file_name(name: &str, target: &Target, qualified: bool) -> String {
    let base = if qualified {
        format!("{}-{}-{}", name, target.platform, target.arch)
    } else {
        name.to_string()
    };

    if target.is_windows() {
        format!("{}.exe", base)
    } else {
        base
    }
}

/// A logical binary resolved against a target.
///
/// Pairs a delegate name with the target it is named for, so callers get
/// both conventions from one value:
///
/// - [`local_name`] - the installed executable / build artifact file name
/// - [`asset_name`] - the release asset / bundled binary file name
///
/// [`local_name`]: BinaryDescriptor::local_name
/// [`asset_name`]: BinaryDescriptor::asset_name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDescriptor {
    name: String,
    target: Target,
}

impl BinaryDescriptor {
    /// Create a descriptor for an explicit target.
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Create a descriptor for the host target.
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(name, Target::host())
    }

    /// The logical binary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target this descriptor resolves against.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// File name for installed executables and build artifacts.
    pub fn local_name(&self) -> String {
        binary_file_name(&self.name, &self.target, false)
    }

    /// File name for release assets and bundled binaries.
    pub fn asset_name(&self) -> String {
        binary_file_name(&self.name, &self.target, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_mapping() {
        assert_eq!(map_platform("macos"), "darwin");
        assert_eq!(map_platform("linux"), "linux");
        assert_eq!(map_platform("windows"), "windows");
    }

    #[test]
    fn arch_mapping() {
        assert_eq!(map_arch("x86_64"), "x64");
        assert_eq!(map_arch("aarch64"), "arm64");
    }

    #[test]
    fn unrecognized_identifiers_pass_through() {
        assert_eq!(map_platform("freebsd"), "freebsd");
        assert_eq!(map_arch("riscv64"), "riscv64");
    }

    #[test]
    fn qualified_name_embeds_platform_and_arch() {
        let target = Target::new("darwin", "arm64");
        assert_eq!(
            binary_file_name("commit_message", &target, true),
            "commit_message-darwin-arm64"
        );
    }

    #[test]
    fn plain_name_omits_target() {
        let target = Target::new("linux", "x64");
        assert_eq!(
            binary_file_name("pull_requests", &target, false),
            "pull_requests"
        );
    }

    #[test]
    fn windows_gets_exe_in_both_conventions() {
        let target = Target::new("windows", "x64");
        assert_eq!(
            binary_file_name("commit_message", &target, true),
            "commit_message-windows-x64.exe"
        );
        assert_eq!(
            binary_file_name("commit_message", &target, false),
            "commit_message.exe"
        );
    }

    #[test]
    fn non_windows_never_gets_exe() {
        for platform in ["darwin", "linux", "freebsd"] {
            let target = Target::new(platform, "x64");
            let name = binary_file_name("tool", &target, true);
            assert!(!name.ends_with(".exe"), "unexpected .exe in {}", name);
        }
    }

    #[test]
    fn host_target_is_populated() {
        let target = Target::host();
        assert!(!target.platform.is_empty());
        assert!(!target.arch.is_empty());
        // The Rust spellings never leak through.
        assert_ne!(target.platform, "macos");
        assert_ne!(target.arch, "x86_64");
        assert_ne!(target.arch, "aarch64");
    }

    #[test]
    fn descriptor_names() {
        let descriptor = BinaryDescriptor::new("commit_message", Target::new("linux", "arm64"));
        assert_eq!(descriptor.name(), "commit_message");
        assert_eq!(descriptor.local_name(), "commit_message");
        assert_eq!(descriptor.asset_name(), "commit_message-linux-arm64");
    }

    #[test]
    fn descriptor_windows_names() {
        let descriptor = BinaryDescriptor::new("pull_requests", Target::new("windows", "arm64"));
        assert_eq!(descriptor.local_name(), "pull_requests.exe");
        assert_eq!(descriptor.asset_name(), "pull_requests-windows-arm64.exe");
    }

    #[test]
    fn host_descriptor_uses_host_target() {
        let descriptor = BinaryDescriptor::host("commit_message");
        assert_eq!(descriptor.target(), &Target::host());
    }
}

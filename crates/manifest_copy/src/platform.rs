//! Long-path capability policy.

use std::path::Path;

/// Legacy Windows `MAX_PATH` destination limit.
pub const N_LEN_PATH_WINDOWS_MAX: usize = 260;

/// Capability query: does this system accept long absolute destination paths?
///
/// Implementations answer for the system as a whole, not per path; the
/// per-path decision lives in [`is_path_length_safe`].
pub trait LongPathPolicy {
    /// `true` when destination paths of any length are accepted.
    fn is_long_path_enabled(&self) -> bool;
}

/// Policy backed by the running platform.
///
/// Platforms without a path-length restriction always report enabled. On
/// Windows the `LongPathsEnabled` registry value decides; a missing value or
/// unreadable key counts as disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLongPathPolicy;

impl LongPathPolicy for SystemLongPathPolicy {
    #[cfg(windows)]
    fn is_long_path_enabled(&self) -> bool {
        _read_registry_long_paths()
    }

    #[cfg(not(windows))]
    fn is_long_path_enabled(&self) -> bool {
        true
    }
}

#[cfg(windows)]
fn _read_registry_long_paths() -> bool {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let key_filesystem = match RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey("SYSTEM\\CurrentControlSet\\Control\\FileSystem")
    {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Failed to open FileSystem registry key ({e}); treating long paths as disabled");
            return false;
        }
    };
    // Value absent means the feature was never enabled.
    let n_long_paths: u32 = key_filesystem.get_value("LongPathsEnabled").unwrap_or(0);
    n_long_paths != 0
}

/// Decide whether the absolute destination path `path_dst_abs` is safe to
/// write on this system.
///
/// Advisory classification only: callers use it to bucket a file before
/// attempting the copy; the copy primitive itself is never wrapped by this
/// check.
pub fn is_path_length_safe<L>(path_dst_abs: &Path, policy_long_path: &L) -> bool
where
    L: LongPathPolicy,
{
    policy_long_path.is_long_path_enabled()
        || path_dst_abs.to_string_lossy().chars().count() < N_LEN_PATH_WINDOWS_MAX
}

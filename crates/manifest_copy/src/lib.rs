//! `manifest_copy` v1:
//! CSV-manifest driven file copy engine.
//!
//! Architecture:
//! - `extract`  : manifest column extraction and ordered dedup
//! - `platform` : long-path capability policy
//! - `copy`     : per-file dispatch and run orchestration
//! - `spec`     : options/outcomes/errors
//! - `report`   : run-time report model
//! - `util`     : shared helper functions

pub mod copy;
pub mod extract;
pub mod platform;
pub mod report;
pub mod spec;
mod util;

pub use copy::{copy_manifest, copy_manifest_with_policy};
pub use extract::extract_filenames;
pub use platform::{
    LongPathPolicy, N_LEN_PATH_WINDOWS_MAX, SystemLongPathPolicy, is_path_length_safe,
};
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{
    CopyManifestError, EnumCopyOutcome, SpecFileOutcome, SpecManifestCopyOptions,
};

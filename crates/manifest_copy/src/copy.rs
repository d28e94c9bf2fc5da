//! Manifest-driven copy dispatch and run orchestration.

use std::path::Path;

use crate::extract::extract_filenames;
use crate::platform::{LongPathPolicy, SystemLongPathPolicy, is_path_length_safe};
use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{CopyManifestError, EnumCopyOutcome, SpecManifestCopyOptions};
use crate::util::{absolutize_path, copy_file_with_metadata};

/// Copy the files named by the CSV manifest `path_manifest` from
/// `dir_source` into `dir_destination`.
///
/// Behavior is controlled by [`SpecManifestCopyOptions`], including:
/// - the manifest column to read,
/// - skip-vs-overwrite policy for existing destination files,
/// - quiet mode (suppresses per-file stdout lines),
/// - dry-run (classify and count, mutate nothing).
///
/// This function performs:
/// 1. Existence validation of the manifest, source, and destination paths.
/// 2. Column extraction with first-occurrence-order dedup.
/// 3. Sequential per-file dispatch into exactly one outcome bucket.
///
/// Returns [`ReportCopy`] when the run completes. Returns
/// [`CopyManifestError`] for validation/extraction failures and for
/// unclassified copy-primitive failures, which terminate the remaining run.
pub fn copy_manifest<P, Q, R>(
    path_manifest: P,
    dir_source: Q,
    dir_destination: R,
    spec_mc_options: SpecManifestCopyOptions,
) -> Result<ReportCopy, CopyManifestError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    copy_manifest_with_policy(
        path_manifest,
        dir_source,
        dir_destination,
        spec_mc_options,
        &SystemLongPathPolicy,
    )
}

/// Same as [`copy_manifest`], with an injected [`LongPathPolicy`].
pub fn copy_manifest_with_policy<P, Q, R, L>(
    path_manifest: P,
    dir_source: Q,
    dir_destination: R,
    spec_mc_options: SpecManifestCopyOptions,
    policy_long_path: &L,
) -> Result<ReportCopy, CopyManifestError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
    L: LongPathPolicy,
{
    let path_manifest = path_manifest.as_ref();
    let path_dir_src = dir_source.as_ref();
    let path_dir_dst = dir_destination.as_ref();

    for path_required in [path_manifest, path_dir_src, path_dir_dst] {
        if !path_required.exists() {
            return Err(CopyManifestError::MissingPath(path_required.to_path_buf()));
        }
    }

    let l_names = extract_filenames(path_manifest, &spec_mc_options.c_column)?;
    tracing::debug!(
        "Manifest {} yielded {} unique filenames",
        path_manifest.display(),
        l_names.len()
    );

    let mut builder_cp_report = ReportCopyBuilder::default();
    for c_name in &l_names {
        dispatch_file_entry(
            c_name,
            path_dir_src,
            path_dir_dst,
            &spec_mc_options,
            policy_long_path,
            &mut builder_cp_report,
        )?;
    }
    Ok(builder_cp_report.build())
}

fn dispatch_file_entry<L: LongPathPolicy>(
    c_name: &str,
    path_dir_src: &Path,
    path_dir_dst: &Path,
    spec_mc_options: &SpecManifestCopyOptions,
    policy_long_path: &L,
    builder_cp_report: &mut ReportCopyBuilder,
) -> Result<(), CopyManifestError> {
    let path_file_dst = path_dir_dst.join(c_name);

    // Destination conflict wins before the source is even inspected.
    if !spec_mc_options.if_overwrite && path_file_dst.exists() {
        if !spec_mc_options.if_quiet {
            println!("Skipping \"{c_name}\"");
        }
        builder_cp_report.add_outcome(c_name, EnumCopyOutcome::AlreadyExists);
        return Ok(());
    }

    let path_file_src = path_dir_src.join(c_name);
    let b_src_exists = path_file_src.exists();

    if b_src_exists && is_path_length_safe(&absolutize_path(&path_file_dst), policy_long_path) {
        if !spec_mc_options.if_quiet {
            println!("Copying \"{c_name}\"...");
        }
        if !spec_mc_options.if_dry_run {
            copy_file_with_metadata(&path_file_src, &path_file_dst).map_err(|e| {
                CopyManifestError::CopyFailed {
                    path: path_file_dst.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        builder_cp_report.add_outcome(c_name, EnumCopyOutcome::Copied);
        return Ok(());
    }

    if b_src_exists {
        if !spec_mc_options.if_quiet {
            println!("Path length too long, skipping: \"{c_name}\"");
        }
        builder_cp_report.add_outcome(c_name, EnumCopyOutcome::PathTooLong);
        return Ok(());
    }

    if !spec_mc_options.if_quiet {
        println!("File \"{c_name}\" does not exist");
    }
    builder_cp_report.add_outcome(c_name, EnumCopyOutcome::NotFound);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{copy_manifest, copy_manifest_with_policy};
    use crate::platform::LongPathPolicy;
    use crate::spec::{CopyManifestError, EnumCopyOutcome, SpecManifestCopyOptions};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("manifest_copy_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    struct PolicyDisabled;

    impl LongPathPolicy for PolicyDisabled {
        fn is_long_path_enabled(&self) -> bool {
            false
        }
    }

    fn quiet_options() -> SpecManifestCopyOptions {
        SpecManifestCopyOptions {
            if_quiet: true,
            ..SpecManifestCopyOptions::default()
        }
    }

    fn setup_run(tmp: &TestDir, raw_manifest: &str) -> (PathBuf, PathBuf, PathBuf) {
        let path_manifest = tmp.path().join("manifest.csv");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write_text(&path_manifest, raw_manifest);
        std::fs::create_dir_all(&src).expect("create src");
        std::fs::create_dir_all(&dst).expect("create dst");
        (path_manifest, src, dst)
    }

    #[test]
    fn copy_manifest_smoke_basic() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\nb.txt\na.txt\n");
        write_text(&src.join("a.txt"), "a");
        write_text(&src.join("b.txt"), "b");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        assert_eq!(report.cnt_copied, 2);
        assert_eq!(report.total(), 2);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].name_file, "a.txt");
        assert_eq!(report.entries[1].name_file, "b.txt");
        assert!(dst.join("a.txt").exists());
        assert!(dst.join("b.txt").exists());
    }

    #[test]
    fn copy_manifest_skips_existing_destination_without_overwrite() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\nb.txt\n");
        write_text(&src.join("a.txt"), "new");
        write_text(&src.join("b.txt"), "b");
        write_text(&dst.join("a.txt"), "old");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        assert_eq!(report.cnt_copied, 1);
        assert_eq!(report.cnt_already_exist, 1);
        assert_eq!(report.entries[0].outcome, EnumCopyOutcome::AlreadyExists);
        assert_eq!(
            std::fs::read_to_string(dst.join("a.txt")).expect("read dst"),
            "old"
        );
        assert!(dst.join("b.txt").exists());
    }

    #[test]
    fn copy_manifest_skip_wins_even_when_source_is_missing() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\nghost.txt\n");
        write_text(&dst.join("ghost.txt"), "old");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        assert_eq!(report.cnt_already_exist, 1);
        assert_eq!(report.cnt_not_found, 0);
    }

    #[test]
    fn copy_manifest_overwrite_replaces_existing_destination() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\n");
        write_text(&src.join("a.txt"), "new");
        write_text(&dst.join("a.txt"), "old");

        let spec_mc_options = SpecManifestCopyOptions {
            if_overwrite: true,
            ..quiet_options()
        };
        let report =
            copy_manifest(&path_manifest, &src, &dst, spec_mc_options).expect("copy manifest");

        assert_eq!(report.cnt_copied, 1);
        assert_eq!(report.cnt_already_exist, 0);
        assert_eq!(
            std::fs::read_to_string(dst.join("a.txt")).expect("read dst"),
            "new"
        );
    }

    #[test]
    fn copy_manifest_classifies_missing_source() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\nc.txt\n");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        assert_eq!(report.cnt_not_found, 1);
        assert_eq!(report.entries[0].outcome, EnumCopyOutcome::NotFound);
        assert!(!dst.join("c.txt").exists());
    }

    #[test]
    fn copy_manifest_dry_run_counts_without_writing() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\nb.txt\n");
        write_text(&src.join("a.txt"), "a");
        write_text(&src.join("b.txt"), "b");

        let spec_mc_options = SpecManifestCopyOptions {
            if_dry_run: true,
            ..quiet_options()
        };
        let report =
            copy_manifest(&path_manifest, &src, &dst, spec_mc_options).expect("copy manifest");

        assert_eq!(report.cnt_copied, 2);
        assert!(!dst.join("a.txt").exists());
        assert!(!dst.join("b.txt").exists());
    }

    #[test]
    fn copy_manifest_disabled_policy_classifies_long_destination() {
        let tmp = TestDir::new();
        let path_manifest = tmp.path().join("manifest.csv");
        let src = tmp.path().join("src");
        let dst = tmp
            .path()
            .join("d".repeat(100))
            .join("e".repeat(100))
            .join("f".repeat(100));
        write_text(&path_manifest, "filename\na.txt\n");
        std::fs::create_dir_all(&src).expect("create src");
        std::fs::create_dir_all(&dst).expect("create dst");
        write_text(&src.join("a.txt"), "a");

        let report = copy_manifest_with_policy(
            &path_manifest,
            &src,
            &dst,
            quiet_options(),
            &PolicyDisabled,
        )
        .expect("copy manifest");

        assert_eq!(report.cnt_path_error, 1);
        assert_eq!(report.cnt_copied, 0);
        assert_eq!(report.entries[0].outcome, EnumCopyOutcome::PathTooLong);
        assert!(!dst.join("a.txt").exists());
    }

    #[test]
    fn copy_manifest_disabled_policy_accepts_short_destination() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\n");
        write_text(&src.join("a.txt"), "a");

        let report = copy_manifest_with_policy(
            &path_manifest,
            &src,
            &dst,
            quiet_options(),
            &PolicyDisabled,
        )
        .expect("copy manifest");

        assert_eq!(report.cnt_copied, 1);
        assert!(dst.join("a.txt").exists());
    }

    #[test]
    fn copy_manifest_missing_inputs_rejected() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename\na.txt\n");

        let err = copy_manifest(
            tmp.path().join("absent.csv"),
            &src,
            &dst,
            quiet_options(),
        )
        .expect_err("must fail");
        assert!(matches!(err, CopyManifestError::MissingPath(_)));

        let err = copy_manifest(
            &path_manifest,
            &src,
            tmp.path().join("absent_dst"),
            quiet_options(),
        )
        .expect_err("must fail");
        assert!(matches!(err, CopyManifestError::MissingPath(_)));
    }

    #[test]
    fn copy_manifest_missing_column_fails_before_any_copy() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "name\na.txt\n");
        write_text(&src.join("a.txt"), "a");

        let err =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect_err("must fail");

        assert!(matches!(err, CopyManifestError::ColumnNotFound(_)));
        assert!(!dst.join("a.txt").exists());
    }

    #[test]
    fn copy_manifest_every_name_lands_in_exactly_one_bucket() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) =
            setup_run(&tmp, "filename\na.txt\nmissing.txt\nheld.txt\na.txt\n");
        write_text(&src.join("a.txt"), "a");
        write_text(&src.join("held.txt"), "new");
        write_text(&dst.join("held.txt"), "old");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.total(), 3);
        assert_eq!(report.cnt_copied, 1);
        assert_eq!(report.cnt_not_found, 1);
        assert_eq!(report.cnt_already_exist, 1);
    }

    #[test]
    fn copy_manifest_empty_cell_is_a_literal_filename() {
        let tmp = TestDir::new();
        let (path_manifest, src, dst) = setup_run(&tmp, "filename,size\n,10\n");

        let report =
            copy_manifest(&path_manifest, &src, &dst, quiet_options()).expect("copy manifest");

        // Joining "" resolves to the destination directory itself, which
        // exists, so the empty name classifies as already-exists.
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].name_file, "");
        assert_eq!(report.entries[0].outcome, EnumCopyOutcome::AlreadyExists);
    }
}

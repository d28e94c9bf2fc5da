//! Copy report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::{EnumCopyOutcome, SpecFileOutcome};

/// Aggregate counters and per-file outcomes for one `copy_manifest` run.
///
/// Invariant: the four counters sum to `entries.len()` — every unique
/// filename lands in exactly one bucket.
#[derive(Debug, Default, Clone)]
pub struct ReportCopy {
    /// Number of files copied (dry-run counts as copied).
    pub cnt_copied: u64,
    /// Number of files absent from the source directory.
    pub cnt_not_found: u64,
    /// Number of files skipped because the destination already exists.
    pub cnt_already_exist: u64,
    /// Number of files rejected by the long-path policy.
    pub cnt_path_error: u64,
    /// Per-file outcomes in processing order.
    pub entries: Vec<SpecFileOutcome>,
}

impl ReportCopy {
    /// Number of unique filenames processed.
    pub fn total(&self) -> u64 {
        self.cnt_copied + self.cnt_not_found + self.cnt_already_exist + self.cnt_path_error
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_not_found".to_string(), self.cnt_not_found);
        dict_counts.insert("cnt_already_exist".to_string(), self.cnt_already_exist);
        dict_counts.insert("cnt_path_error".to_string(), self.cnt_path_error);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} copied={} not_found={} already_exist={} path_error={}",
            self.cnt_copied, self.cnt_not_found, self.cnt_already_exist, self.cnt_path_error
        )
    }

    /// Multi-line end-of-run summary block.
    ///
    /// The copied count is always present; the other categories appear only
    /// when nonzero.
    pub fn format_summary(&self) -> String {
        let mut txt_summary = String::new();
        txt_summary.push_str("Operation complete\n");
        txt_summary.push_str(&format!("{} files copied\n", self.cnt_copied));
        if self.cnt_not_found > 0 {
            txt_summary.push_str(&format!("{} files not found in source\n", self.cnt_not_found));
        }
        if self.cnt_already_exist > 0 {
            txt_summary.push_str(&format!(
                "{} files already exist in destination\n",
                self.cnt_already_exist
            ));
        }
        if self.cnt_path_error > 0 {
            txt_summary.push_str(&format!(
                "{} files have path lengths that are too long for the destination\n",
                self.cnt_path_error
            ));
        }
        txt_summary
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for dispatch outcomes.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    /// See [`ReportCopy::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportCopy::cnt_not_found`].
    pub cnt_not_found: u64,
    /// See [`ReportCopy::cnt_already_exist`].
    pub cnt_already_exist: u64,
    /// See [`ReportCopy::cnt_path_error`].
    pub cnt_path_error: u64,
    /// See [`ReportCopy::entries`].
    pub entries: Vec<SpecFileOutcome>,
}

impl ReportCopyBuilder {
    /// Record one classified filename, bumping the matching counter.
    pub fn add_outcome(&mut self, name_file: &str, outcome: EnumCopyOutcome) {
        match outcome {
            EnumCopyOutcome::Copied => self.cnt_copied += 1,
            EnumCopyOutcome::NotFound => self.cnt_not_found += 1,
            EnumCopyOutcome::AlreadyExists => self.cnt_already_exist += 1,
            EnumCopyOutcome::PathTooLong => self.cnt_path_error += 1,
        }
        self.entries.push(SpecFileOutcome {
            name_file: name_file.to_string(),
            outcome,
        });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            cnt_copied: self.cnt_copied,
            cnt_not_found: self.cnt_not_found,
            cnt_already_exist: self.cnt_already_exist,
            cnt_path_error: self.cnt_path_error,
            entries: self.entries,
        }
    }
}

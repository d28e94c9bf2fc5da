//! Manifest extraction: one named CSV column to ordered unique filenames.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::spec::CopyManifestError;

/// Read the CSV manifest at `path_manifest` and extract the values of
/// `c_column`, deduplicated with first-occurrence order preserved.
///
/// The first CSV row is the header. `c_column` must appear in it, otherwise
/// [`CopyManifestError::ColumnNotFound`] is returned before any row is read.
/// A present-but-empty cell is a literal (empty) filename value, not an
/// error.
pub fn extract_filenames(
    path_manifest: &Path,
    c_column: &str,
) -> Result<Vec<String>, CopyManifestError> {
    let file_manifest = fs::File::open(path_manifest).map_err(|e| CopyManifestError::CsvRead {
        path: path_manifest.to_path_buf(),
        message: e.to_string(),
    })?;
    _extract_from_reader(file_manifest, path_manifest, c_column)
}

fn _extract_from_reader<R: Read>(
    reader_raw: R,
    path_manifest: &Path,
    c_column: &str,
) -> Result<Vec<String>, CopyManifestError> {
    let mut reader_csv = csv::Reader::from_reader(reader_raw);

    let headers = reader_csv.headers().map_err(|e| CopyManifestError::CsvRead {
        path: path_manifest.to_path_buf(),
        message: e.to_string(),
    })?;
    let Some(n_idx_column) = headers.iter().position(|name_header| name_header == c_column)
    else {
        return Err(CopyManifestError::ColumnNotFound(c_column.to_string()));
    };

    let mut l_names: Vec<String> = Vec::new();
    let mut set_seen: HashSet<String> = HashSet::new();
    for record_res in reader_csv.records() {
        let record = record_res.map_err(|e| CopyManifestError::CsvRead {
            path: path_manifest.to_path_buf(),
            message: e.to_string(),
        })?;
        let c_name = record.get(n_idx_column).unwrap_or("").to_string();
        if set_seen.insert(c_name.clone()) {
            l_names.push(c_name);
        }
    }
    Ok(l_names)
}

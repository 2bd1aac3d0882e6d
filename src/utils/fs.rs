use std::path::PathBuf;

/// clap value parser for paths that must point at an existing file.
pub fn validate_file(path: &str) -> Result<PathBuf, String> {
    let pb = PathBuf::from(path);
    if pb.is_file() {
        Ok(pb)
    } else {
        Err(format!("{} is not a valid file", path))
    }
}

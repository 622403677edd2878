use std::fs;
use std::path::Path;

use log::debug;

use super::SourceError;
use crate::schema::{FieldSpec, parse_schema};

/// Load one schema file. Fields are tagged with the path as given.
pub fn load_schema_file(path: &Path) -> Result<Vec<FieldSpec>, SourceError> {
    let text = fs::read_to_string(path).map_err(|err| SourceError::io(path, err))?;
    let fields = parse_schema(&text, &path.display().to_string());
    debug!("{}: {} fields", path.display(), fields.len());
    Ok(fields)
}

/// Load schema files in order and concatenate their fields.
pub fn load_schema_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FieldSpec>, SourceError> {
    let mut fields = Vec::new();
    for path in paths {
        fields.extend(load_schema_file(path.as_ref())?);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_concatenated_in_order() {
        let dir = std::env::temp_dir().join(format!("hdec_schema_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let first = dir.join("first.def");
        let second = dir.join("second.def");
        fs::write(&first, "a: 8\nb: 8\n").unwrap();
        fs::write(&second, "# trailer\nc: 4\n").unwrap();

        let fields = load_schema_files(&[&second, &first]).unwrap();
        let _ = fs::remove_dir_all(&dir);

        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(fields[0].source, second.display().to_string());
        assert_eq!(fields[1].source, first.display().to_string());
    }

    #[test]
    fn missing_schema_is_io_error() {
        let err = load_schema_files(&["/nonexistent/hdec/schema.def"]).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hdec_core::InputEncoding;
use hdec_core::decode::{RunError, decode_files};
use hdec_core::render::{TextOutput, render_fatal};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some((input, encoding)) = find_input(&path) else {
            continue;
        };
        let schemas = schema_files(&path)?;
        regenerate_one(&input, encoding, &schemas, &path.join("expected.txt"))?;
    }

    Ok(())
}

fn find_input(dir: &Path) -> Option<(PathBuf, InputEncoding)> {
    [
        ("input.hex", InputEncoding::Hex),
        ("input.bin", InputEncoding::Bin),
        ("input.raw", InputEncoding::Raw),
    ]
    .into_iter()
    .map(|(name, encoding)| (dir.join(name), encoding))
    .find(|(path, _)| path.exists())
}

fn schema_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut schemas = Vec::new();
    let entries =
        fs::read_dir(dir).map_err(|err| format!("failed to read {}: {}", dir.display(), err))?;
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read entry: {}", err))?
            .path();
        if path.extension().is_some_and(|ext| ext == "def") {
            schemas.push(path);
        }
    }
    schemas.sort();
    Ok(schemas)
}

fn regenerate_one(
    input: &Path,
    encoding: InputEncoding,
    schemas: &[PathBuf],
    output: &Path,
) -> Result<(), String> {
    let mut out = TextOutput::new(Vec::new());
    let result = decode_files(input, encoding, schemas, &mut out);
    let bytes = out
        .finish()
        .map_err(|err| format!("failed to render {}: {}", input.display(), err))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    match result {
        Ok(_) => {}
        Err(RunError::Decode(err)) => {
            text.push_str(&format!("error: {}\n", render_fatal(&err)));
        }
        Err(err) => return Err(format!("decode failed for {}: {}", input.display(), err)),
    }
    fs::write(output, text).map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

//! Dataset files
//!
//! Two formats carry the same [`Dataset`] value:
//!
//! - JSON (`.json`): `{"words": ["the", ...], "vectors": [[0.418, ...], ...]}`
//! - bincode (`.bin`): compact binary produced by [`write_bincode`]
//!
//! The format is picked from the file extension.

use crate::error::LoadError;
use crate::store::{Dataset, VectorStore};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Bincode,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DatasetFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("bin") || ext.eq_ignore_ascii_case("bincode") => {
                Ok(DatasetFormat::Bincode)
            }
            _ => Err(LoadError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Reads a dataset definition without validating it.
///
/// `name` replaces any name stored in the file.
pub fn read_dataset(name: &str, path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let format = DatasetFormat::from_path(path)?;

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let reader = BufReader::new(file);

    let mut dataset: Dataset = match format {
        DatasetFormat::Json => serde_json::from_reader(reader)?,
        DatasetFormat::Bincode => bincode::deserialize_from(reader)?,
    };
    dataset.name = name.to_string();

    Ok(dataset)
}

/// Reads and validates a dataset file into a store.
///
/// # Examples
///
/// ```no_run
/// use wordsim::loader::load_dataset_file;
///
/// let store = load_dataset_file("twitter", "data/word_vectors.json").unwrap();
/// println!("{} words, {} dimensions", store.size(), store.dimensionality());
/// ```
pub fn load_dataset_file(name: &str, path: impl AsRef<Path>) -> Result<VectorStore, LoadError> {
    let path = path.as_ref();
    let dataset = read_dataset(name, path)?;
    let store = VectorStore::load(dataset)?;

    info!(
        dataset = name,
        path = %path.display(),
        words = store.size(),
        dimensions = store.dimensionality(),
        "dataset loaded"
    );

    Ok(store)
}

/// Writes a dataset in the binary format.
pub fn write_bincode(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| io_error(path, source))?;

    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, dataset)?;

    Ok(())
}

/// Converts any supported dataset file into the binary format.
///
/// The input is validated first so a broken table is never written.
pub fn compile(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let input = input.as_ref();
    let name = dataset_name(input);
    let dataset = read_dataset(&name, input)?;
    VectorStore::load(dataset.clone())?;
    write_bincode(&dataset, output.as_ref())?;

    info!(
        input = %input.display(),
        output = %output.as_ref().display(),
        words = dataset.words.len(),
        "dataset compiled"
    );

    Ok(dataset)
}

/// Dataset name derived from a file path: the file stem.
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io { path: PathBuf::from(path), source }
}

//! Tesseract dataset files
//!
//! The vertex array and edge cycle can be supplied as a RON asset instead
//! of the built-in unit hypercube. Files are validated on load.

use std::fs;
use std::path::Path;

use tessera_math::{Tesseract4D, TesseractData};

use crate::error::EngineError;

/// Load and validate a dataset from a RON file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Tesseract4D, EngineError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let tesseract = parse_dataset(&contents)?;
    log::info!("Loaded tesseract dataset from {}", path.as_ref().display());
    Ok(tesseract)
}

/// Parse and validate a dataset from RON text
pub fn parse_dataset(contents: &str) -> Result<Tesseract4D, EngineError> {
    let data: TesseractData = ron::from_str(contents)?;
    Ok(Tesseract4D::from_data(&data)?)
}

/// Write a dataset as pretty RON
pub fn save_dataset<P: AsRef<Path>>(tesseract: &Tesseract4D, path: P) -> Result<(), EngineError> {
    let pretty = ron::ser::PrettyConfig::new()
        .struct_names(true)
        .enumerate_arrays(false);
    let contents = ron::ser::to_string_pretty(&tesseract.to_data(), pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

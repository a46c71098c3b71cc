pub mod panels;
pub mod plot;
pub mod table;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sa3_radar::data::filter::ScoreRange;
use sa3_radar::data::model::ScoreColumn;
use sa3_radar::export::{CSV_FILE_NAME, PDF_FILE_NAME};

/// User input gathered while drawing a frame, applied once drawing is done.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetRange(ScoreColumn, ScoreRange),
    ResetFilters,
    Toggle(String),
    ClearSelection,
    Save(Download),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Csv,
    Pdf,
}

impl Download {
    pub fn button_label(self) -> &'static str {
        match self {
            Download::Csv => "Download Selected Data as CSV",
            Download::Pdf => "Download Radar Chart as PDF",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Download::Csv => CSV_FILE_NAME,
            Download::Pdf => PDF_FILE_NAME,
        }
    }

    fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Download::Csv => ("CSV", &["csv"]),
            Download::Pdf => ("PDF", &["pdf"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Save dialog
// ---------------------------------------------------------------------------

/// Ask for a destination and write the encoded bytes there.
/// `Ok(None)` when the user cancels the dialog.
pub fn save_download(kind: Download, bytes: Result<Vec<u8>>) -> Result<Option<PathBuf>> {
    let bytes = bytes.with_context(|| format!("encoding {}", kind.file_name()))?;
    let (name, extensions) = kind.filter();

    let Some(path) = rfd::FileDialog::new()
        .set_title(kind.button_label())
        .set_file_name(kind.file_name())
        .add_filter(name, extensions)
        .save_file()
    else {
        return Ok(None);
    };

    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing required 'line1' value")]
    MissingLine1 { row: usize },
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BadgeError>;

/// One badge's worth of text, from one CSV data row.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeRecord {
    pub line1: String,
    pub line2: Option<String>,
    pub line3: Option<String>,
}

impl BadgeRecord {
    /// Present text lines with their zero-based line index. Absent
    /// optional lines are simply skipped.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        [
            Some(self.line1.as_str()),
            self.line2.as_deref(),
            self.line3.as_deref(),
        ]
        .into_iter()
        .enumerate()
        .filter_map(|(i, text)| text.map(|t| (i, t)))
    }
}

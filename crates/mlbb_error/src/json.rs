//! Bundled JSON document errors.

/// A JSON document shipped with the crate failed to parse.
///
/// # Examples
///
/// ```
/// use mlbb_error::JsonError;
///
/// let err = JsonError::new("matchups.json", "expected `,` at line 3 column 5");
/// assert_eq!(err.document, "matchups.json");
/// assert!(format!("{}", err).contains("matchups.json"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} in {} at line {} in {}", message, document, line, file)]
pub struct JsonError {
    /// Name of the document that failed to parse
    pub document: String,
    /// Parser message
    pub message: String,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for `document` at the current location.
    #[track_caller]
    pub fn new(document: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            document: document.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

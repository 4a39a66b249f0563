use std::fmt;

/// the closed set of failure modes the engine can produce.
///
/// every variant here has a fixed meaning load-bearing enough that
/// callers (the CLI, the preview summariser, tests) match on it by name
/// rather than by parsing `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownError,
    UnknownFunction,
    MismatchedArgumentType,
    IndexOutOfBounds,
    OutputFileWriteFailed,
    DivisionByZero,
    LogOfNonPositive,
    InvalidPowerOperation,
    VectorSizeMismatch,
    EmptyVectorOperation,
    ConditionNotBoolean,
    LogicalOperatorRequiresBoolean,
    InvalidSamplerParameters,
    CsvFileNotFound,
    CsvColumnNotFound,
    CsvRowIndexOutOfBounds,
    CsvConversionError,
    RecipeFileNotFound,
    RecipeParseError,
    RecipeConfigError,
    IncorrectArgumentCount,
}

/// an engine failure: a [`ErrorKind`], a human message, and the
/// originating recipe step's 1-based line number, when known.
///
/// `line` starts `None` at the point a function raises the error and is
/// filled in exactly once, by the step that owns the call -- nested
/// calls get their own line, not the outer step's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub kind: ErrorKind,
    pub message: String,
    pub line: Option<i64>,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: Option<i64>) -> Self {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }

    /// wrap this error as having bubbled up through a call to `name` at
    /// `line`, prefixing the message but preserving `kind` and the
    /// innermost line already recorded.
    pub fn in_function(self, name: &str, line: Option<i64>) -> Self {
        self.wrap("In function", name, line)
    }

    pub fn in_nested_function(self, name: &str, line: Option<i64>) -> Self {
        self.wrap("In nested function", name, line)
    }

    fn wrap(self, label: &str, name: &str, line: Option<i64>) -> Self {
        let prefix = match line {
            Some(l) => format!("L{l}: {label} '{name}': "),
            None => format!("{label} '{name}': "),
        };
        Self {
            kind: self.kind,
            message: format!("{prefix}{}", self.message),
            line: self.line.or(line),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;

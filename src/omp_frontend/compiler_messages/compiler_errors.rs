use crate::omp_frontend::compiler_warnings::CompilerWarning;
use crate::omp_frontend::source_location::TextLocation;
use std::collections::HashMap;
use std::path::PathBuf;

// The final set of errors and warnings emitted while lowering
#[derive(Debug, Default)]
pub struct CompilerMessages {
    pub errors: Vec<CompilerError>,
    pub warnings: Vec<CompilerWarning>,
}

impl CompilerMessages {
    pub fn from_error(error: CompilerError, warnings: Vec<CompilerWarning>) -> Self {
        CompilerMessages {
            errors: vec![error],
            warnings,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ErrorMetaDataKey {
    VariableName,
    ClauseName,
    CompilationStage,

    // Optional suggestion
    PrimarySuggestion,
}

#[derive(Debug, Clone)]
pub struct CompilerError {
    pub msg: String,

    // Location of the offending clause item.
    // Errors that are not tied to a clause item (config, files) use the default location.
    pub location: TextLocation,
    pub error_type: ErrorType,

    // Present only for errors that came from reading a file
    pub file_path: Option<PathBuf>,

    pub metadata: HashMap<ErrorMetaDataKey, String>,
}

impl CompilerError {
    pub fn new(msg: impl Into<String>, location: TextLocation, error_type: ErrorType) -> Self {
        CompilerError {
            msg: msg.into(),
            location,
            error_type,
            file_path: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: PathBuf) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// Create a compiler error (internal bug, not user's fault)
    pub fn compiler_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, TextLocation::default(), ErrorType::Compiler)
    }

    /// Create a file system error for a path that could not be read
    pub fn file_error(path: &std::path::Path, msg: impl Into<String>) -> Self {
        CompilerError::new(msg, TextLocation::default(), ErrorType::File)
            .with_file_path(path.to_path_buf())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// A clause item could not be turned into an operand or capture pair
    Lowering,
    Config,
    File,
    Fixture,
    Compiler,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::Lowering => "Lowering Error",
        ErrorType::Config => "Malformed Config",
        ErrorType::File => "File Error",
        ErrorType::Fixture => "Malformed Fixture",
        ErrorType::Compiler => "Compiler Bug",
    }
}

/// Returns a new CompilerError for clause items that can't be lowered.
///
/// Usage:
/// `return_lowering_error!("Unresolved object", location, {
///     VariableName => name,
///     CompilationStage => "OpenMP object list",
/// })`;
#[macro_export]
macro_rules! return_lowering_error {
    ($msg:expr, $location:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError {
            msg: $msg.into(),
            location: $location,
            error_type: $crate::omp_frontend::compiler_errors::ErrorType::Lowering,
            file_path: None,
            metadata: {
                let mut map = std::collections::HashMap::new();
                $(
                    map.insert(
                        $crate::omp_frontend::compiler_errors::ErrorMetaDataKey::$key,
                        String::from($value),
                    );
                )*
                map
            },
        })
    };
}

/// Returns a new CompilerError for a malformed config file.
///
/// Usage: `return_config_error!("message")`;
#[macro_export]
macro_rules! return_config_error {
    ($msg:expr) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::new(
            $msg,
            $crate::omp_frontend::source_location::TextLocation::default(),
            $crate::omp_frontend::compiler_errors::ErrorType::Config,
        ))
    };
}

/// Returns a new CompilerError for a file that can't be read.
///
/// Usage: `return_file_error!(path, "message")`;
#[macro_export]
macro_rules! return_file_error {
    ($path:expr, $msg:expr) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::file_error(
            $path, $msg,
        ))
    };
}

/// Returns a new CompilerError for fixture files that describe an impossible program.
///
/// Usage: `return_fixture_error!("Unknown scope '{}'", name)`;
#[macro_export]
macro_rules! return_fixture_error {
    ($fmt:expr, $($arg:expr),+ $(,)?) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::new(
            format!($fmt, $($arg),+),
            $crate::omp_frontend::source_location::TextLocation::default(),
            $crate::omp_frontend::compiler_errors::ErrorType::Fixture,
        ))
    };
    ($msg:expr) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::new(
            $msg,
            $crate::omp_frontend::source_location::TextLocation::default(),
            $crate::omp_frontend::compiler_errors::ErrorType::Fixture,
        ))
    };
}

/// Returns a new CompilerError for internal compiler bugs.
///
/// Compiler errors indicate bugs in the lowering itself, not user code issues.
#[macro_export]
macro_rules! return_compiler_error {
    ($fmt:expr, $($arg:expr),+ $(,)?) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::compiler_error(
            format!($fmt, $($arg),+),
        ))
    };
    ($msg:expr) => {
        return Err($crate::omp_frontend::compiler_errors::CompilerError::compiler_error($msg))
    };
}

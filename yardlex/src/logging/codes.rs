//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification
//! functions. Each error enum in the crate maps its variants onto one of
//! the constants below through an `error_code()` method.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Line source error codes
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E006");
    pub const IO_ERROR: Code = Code::new("E007");
}

/// Rule construction error codes
pub mod rules {
    use super::Code;

    pub const EMPTY_PATTERN: Code = Code::new("E010");
    pub const INVALID_PATTERN: Code = Code::new("E011");
    pub const MISSING_LOCATOR: Code = Code::new("E012");
    pub const INVALID_CATALOG: Code = Code::new("E013");
}

/// Tokenizer error codes
pub mod tokenizer {
    use super::Code;

    pub const UNEXPECTED_INPUT: Code = Code::new("E020");
    pub const DANGLING_TOKEN: Code = Code::new("E021");
    pub const TOO_MANY_TOKENS: Code = Code::new("E022");
    pub const LINE_TOO_LONG: Code = Code::new("E023");
    pub const TOKEN_TOO_LARGE: Code = Code::new("E024");
}

/// Shunting-yard reducer error codes
pub mod reducer {
    use super::Code;

    pub const MISSING_OPENING_FOR_DELIMITER: Code = Code::new("E040");
    pub const MISSING_OPENING: Code = Code::new("E041");
    pub const MISMATCHED_BRACKETS: Code = Code::new("E042");
    pub const MISSING_CLOSING: Code = Code::new("E043");
    pub const UNEXPECTED_CLOSING: Code = Code::new("E044");
    pub const STACK_OVERFLOW: Code = Code::new("E045");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const SOURCE_LOADED: Code = Code::new("I005");
    pub const RULES_COMPILED: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const REDUCTION_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

/// code, category, severity, recoverable, requires_halt, description, action
const REGISTRY_ROWS: &[Row] = &[
    (
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    (
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Initialization failure",
        "Check configuration and environment variables",
    ),
    (
        "E005",
        "Source",
        Severity::Medium,
        false,
        true,
        "Source file not found",
        "Check the path and ensure the file exists",
    ),
    (
        "E006",
        "Source",
        Severity::Medium,
        false,
        true,
        "Source file exceeds maximum size limit",
        "Split the input or raise the compile-time limit",
    ),
    (
        "E007",
        "Source",
        Severity::High,
        false,
        true,
        "I/O error while reading source lines",
        "Check file permissions and encoding (UTF-8 required)",
    ),
    (
        "E010",
        "Rules",
        Severity::High,
        false,
        true,
        "Rule pattern is empty",
        "Provide a non-empty pattern for every configured rule mode",
    ),
    (
        "E011",
        "Rules",
        Severity::High,
        false,
        true,
        "Rule pattern is not a valid regular expression",
        "Fix the pattern syntax",
    ),
    (
        "E012",
        "Rules",
        Severity::High,
        false,
        true,
        "Rule is missing a required locator or mode",
        "Configure either an entire pattern or both start and stop",
    ),
    (
        "E013",
        "Rules",
        Severity::High,
        false,
        true,
        "Rule catalog is malformed",
        "Check the catalog TOML against the documented schema",
    ),
    (
        "E020",
        "Tokenizer",
        Severity::Medium,
        false,
        true,
        "No rule matches the input at this position",
        "Add a rule for this lexeme or fix the input",
    ),
    (
        "E021",
        "Tokenizer",
        Severity::Medium,
        false,
        true,
        "Multi-line token was opened but never closed",
        "Add the closing delimiter",
    ),
    (
        "E022",
        "Tokenizer",
        Severity::High,
        false,
        true,
        "Token count exceeds the configured limit",
        "Split the input",
    ),
    (
        "E023",
        "Tokenizer",
        Severity::High,
        false,
        true,
        "Source line exceeds the configured length limit",
        "Reflow the input",
    ),
    (
        "E024",
        "Tokenizer",
        Severity::High,
        false,
        true,
        "Multi-line token exceeds the configured size limit",
        "Check for a missing closing delimiter",
    ),
    (
        "E040",
        "Reducer",
        Severity::Medium,
        false,
        true,
        "Delimiter outside of any bracket group",
        "Wrap the argument list in brackets",
    ),
    (
        "E041",
        "Reducer",
        Severity::Medium,
        false,
        true,
        "Closing bracket without opening bracket",
        "Remove the bracket or add its opening partner",
    ),
    (
        "E042",
        "Reducer",
        Severity::Medium,
        false,
        true,
        "Closing bracket does not pair with the opening bracket",
        "Use the matching bracket character",
    ),
    (
        "E043",
        "Reducer",
        Severity::Medium,
        false,
        true,
        "Opening bracket never closed",
        "Add the closing bracket",
    ),
    (
        "E044",
        "Reducer",
        Severity::High,
        false,
        true,
        "Closing bracket left on the operator stack",
        "File a bug report; this indicates an internal fault",
    ),
    (
        "E045",
        "Reducer",
        Severity::High,
        false,
        true,
        "Operator stack exceeds the configured depth limit",
        "Reduce expression nesting",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

/// Look up complete metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity for error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

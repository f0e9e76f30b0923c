pub mod compile_time {
    pub mod tokenizer {
        /// Maximum length in bytes of a single source line
        /// SECURITY: Bounds the work a single regex probe may do
        pub const MAX_LINE_LENGTH: usize = 64 * 1024;

        /// Maximum number of tokens produced by one tokenization
        /// SECURITY: Prevents token explosion and unbounded context growth
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum size in bytes of a multi-line token's accumulated text
        /// SECURITY: Stops an unterminated block from swallowing the input
        pub const MAX_MULTILINE_TOKEN_SIZE: usize = 1_048_576;
    }

    pub mod reducer {
        /// Maximum depth of the operator/function/bracket stack
        /// SECURITY: Prevents memory exhaustion on pathological nesting
        pub const MAX_STACK_DEPTH: usize = 10_000;
    }

    pub mod rules {
        /// Maximum compiled size of one rule pattern (bytes)
        /// RESOURCE: Passed to the regex builder as its size limit
        pub const MAX_PATTERN_SIZE: usize = 1 << 20;

        /// Maximum number of rules in a catalog file
        /// RESOURCE: Keeps best-match probing linear in something small
        pub const MAX_CATALOG_RULES: usize = 1_000;
    }

    pub mod source {
        /// Maximum size of a source file read from disk (10MB)
        /// SECURITY: Prevents DoS via huge inputs
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Maximum size of a rule catalog or runtime config file (1MB)
        pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
    }

    pub mod logging {
        /// Maximum events retained by an in-memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4096;
    }
}

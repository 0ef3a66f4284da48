pub mod compile_time {
    pub mod expression {
        /// Maximum accepted expression length in bytes (64KB)
        /// SECURITY: Bounds the cost of the full-match grammar check
        pub const MAX_EXPRESSION_LENGTH: usize = 64 * 1024;

        /// Maximum function calls following the sentinel
        /// SECURITY: Prevents fragment explosion from repeated calls
        pub const MAX_FUNCTION_CALLS: usize = 64;

        /// Maximum nesting depth the balanced argument scanner will track
        pub const MAX_ARGUMENT_DEPTH: usize = 32;
    }

    pub mod form {
        /// Maximum literal entries in an allowed-values list
        /// RESOURCE: Keeps validation and serialization bounded
        pub const MAX_ALLOWED_VALUES: usize = 1_000;

        /// Maximum regex pattern length accepted for compilation
        /// SECURITY: Limits compile cost of user-supplied patterns
        pub const MAX_REGEX_LENGTH: usize = 4_096;

        /// Compiled size limit handed to the regex builder (1MB)
        pub const REGEX_SIZE_LIMIT: usize = 1024 * 1024;
    }

    pub mod logging {
        /// Log buffer size for the memory logger
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum characters of an expression echoed into log context
        pub const MAX_LOGGED_EXPRESSION_LENGTH: usize = 256;
    }
}

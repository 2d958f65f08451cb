//! Config for the command-line tool behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`]. Command-line flags are applied on
//! top of the environment.
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration values. All
//! values are optional, and case-insensitive. Set the value to `"true"` to enable a flag.
//!
//! - `SRCOMP_VERBOSE`: Print progress details and debug logs to stderr (default: `false`)
//! - `SRCOMP_LOG`: Write logs to a timestamped file in the current directory (default: `false`)

/// Configuration for tool behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Only warnings are reported on stderr.
    /// - Logging to file is disabled.
    pub fn new() -> Self {
        Self {
            verbose: false,
            log: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `SRCOMP_VERBOSE`: if set to `"true"`, enables verbose output (default: `false`)
    /// - `SRCOMP_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    ///
    /// Any other value (including unset) will result in using the default value for each field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("SRCOMP_VERBOSE", false),
            log: get_env_flag("SRCOMP_LOG", false),
        }
    }

    /// Enable or disable verbose mode.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn log(&self) -> bool {
        self.log
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

//! CLI Exit Code Registry
//!
//! Single source of truth for `navrecon` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | Usage error (bad arguments)                     |
//! | 3    | Rules file unreadable, malformed or invalid     |
//! | 4    | Period file unreadable or missing a column      |
//! | 5    | Report could not be written                     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Rules file could not be read, parsed, or failed validation.
pub const EXIT_INVALID_RULES: u8 = 3;

/// Latest period file missing or unreadable, or a required column is absent.
pub const EXIT_INPUT: u8 = 4;

/// Output directory or report file could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Human-readable name for an exit code (used in `--help` footers and tests).
pub fn exit_code_name(code: u8) -> &'static str {
    match code {
        EXIT_SUCCESS => "success",
        EXIT_ERROR => "error",
        EXIT_USAGE => "usage",
        EXIT_INVALID_RULES => "invalid_rules",
        EXIT_INPUT => "input_error",
        EXIT_OUTPUT => "output_error",
        _ => "unknown",
    }
}

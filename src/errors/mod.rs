//! Error types for the scanner.
//!
//! Two tiers are modelled by a single [`errors::Error`]:
//!
//! - Lexical errors (bad symbols, malformed character constants, number
//!   overflow). The scanner has already skipped the offending text, so the
//!   caller may keep requesting tokens.
//! - Fatal errors, raised when the byte source fails. Scanning cannot go on.

pub mod errors;

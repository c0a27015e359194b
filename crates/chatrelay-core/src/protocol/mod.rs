//! Protocol modules (inbound grammar + outbound notices).
//!
//! The wire format is plain UTF-8 text with colon-delimited prefixes:
//! - Inbound: `register:<name>`, `private:<target>:<body>`, or free text.
//! - Outbound: relayed client text, or one of the fixed notices.
//!
//! There is no framing, versioning, or escaping. Parsing is total: every
//! input maps to some `Command`, so hostile traffic cannot fail the router.

pub mod command;
pub mod notice;

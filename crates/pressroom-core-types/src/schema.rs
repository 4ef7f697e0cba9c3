//! Canonical schema constants for structured logging
//!
//! `tracing` macros take field names as identifiers, so emitters spell these
//! keys literally. Readers of captured or exported events look fields up by
//! these constants.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Publish pipeline identifiers
pub const FIELD_SLUG: &str = "slug";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_BUMP: &str = "bump";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

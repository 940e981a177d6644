//! Input Validation Module
//!
//! Boundary validation for every request the API accepts.
//!
//! # Overview
//!
//! 1. **Extractors** - `ValidatedJson<T>`, `ValidatedForm<T>`,
//!    `ValidatedQuery<T>` and `ValidatedPath<T>`
//! 2. **Fields** - lenient reader that builds records field by field so
//!    missing or mistyped fields are reported next to constraint failures
//! 3. **Validators** - reusable constraint checks (length, numeric bounds,
//!    email and URL syntax)
//! 4. **Sanitizers** - whitespace normalization run before validation
//! 5. **Requests** - `Validatable` impls for the shared record types
//!
//! # Validation Error Response
//!
//! When validation fails, a 422 Unprocessable Entity is returned listing
//! every violated field:
//!
//! ```json
//! {
//!   "error": "ValidationError",
//!   "message": "Validation failed for 2 fields",
//!   "errors": [
//!     {"field": "age", "message": "must be greater than 0"},
//!     {"field": "password", "message": "must be at least 8 characters"}
//!   ],
//!   "code": 422,
//!   "timestamp": "2026-02-20T10:30:00Z",
//!   "correlation_id": "uuid-here"
//! }
//! ```

pub mod extractors;
pub mod fields;
pub mod requests;
pub mod sanitizers;
pub mod validators;

pub use extractors::{
    FieldError, Validatable, ValidatedForm, ValidatedJson, ValidatedPath, ValidatedQuery,
    ValidationBuilder, ValidationError,
};
pub use fields::FieldReader;

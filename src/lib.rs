//! RFC 4122 globally unique identifiers.
//!
//! Provides a 16-byte [`Guid`] value type with secure random version 4
//! generation, canonical-string parsing and validation, and grouped
//! hexadecimal formatting in either case:
//!
//! ```rust
//! use guid::Guid;
//!
//! let id = Guid::generate();
//! assert!(id.is_conformant());
//!
//! let parsed: Guid = "0e545c9c-6942-4988-fab0-645274cfaded".parse()?;
//! assert_eq!(format!("{parsed:X}"), "0E545C9C-6942-4988-FAB0-645274CFADED");
//! # Ok::<(), guid::Error>(())
//! ```
//!
//! Only the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form is
//! accepted on input; braced, dash-less and URN renditions are not.

pub mod error;
pub mod guid;
mod hex;

pub use error::Error;
pub use guid::Guid;

pub type Result<T> = std::result::Result<T, crate::Error>;

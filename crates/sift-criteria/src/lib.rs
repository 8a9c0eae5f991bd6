//! Criteria - Key/value store for search parameters.
//!
//! A search request arrives as a loosely typed bag of parameters: text typed
//! into a search box, flags, page sizes, ordering. This crate holds them in a
//! [`Criteria`] store that merges table-derived defaults with caller
//! overrides:
//!
//! - `set` writes always win
//! - `set_default` writes only fill gaps
//! - `get` never fails, it falls back to the value the caller supplies
//!
//! Values are kept as [`Value`]s exactly as supplied. Coercion happens on
//! read, through [`Value::to_bool`], [`Value::to_int`] and
//! [`Value::to_text`], all of which are total.
//!
//! # Quick Start
//!
//! ```rust
//! use sift_criteria::{Criteria, Value};
//!
//! let defaults = Criteria::from([
//!     ("start", Value::from(0)),
//!     ("limit", Value::from(0)),
//!     ("stype", Value::from("contains")),
//! ]);
//! let overrides = Criteria::from_json(r#"{"title": "foo", "limit": "10"}"#).unwrap();
//!
//! let criteria = Criteria::with_defaults(defaults, overrides);
//!
//! assert_eq!(criteria.get("limit", 0).to_int(), 10);
//! assert_eq!(criteria.get("stype", "").to_text(), "contains");
//! assert!(!criteria.has("published"));
//! ```

mod criteria;
mod value;

pub use criteria::Criteria;
pub use value::{Number, Value};

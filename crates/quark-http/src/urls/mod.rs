//! Convention-based URL routing.
//!
//! - [`kind`]: the scalar kinds a path variable may have (`{i}`, `{f}`, `{s}`)
//! - [`compiler`]: procedure name + parameter kinds -> path pattern + typed slots
//! - [`classifier`]: which wildcard kinds a concrete segment is compatible with
//! - [`table`]: per-service trie of patterns with a verb-keyed leaf layer
//! - [`dispatcher`]: the backtracking search used at request time
//!
//! # Examples
//!
//! ```
//! use http::Method;
//! use quark_http::urls::compiler::compile;
//! use quark_http::urls::kind::ParamKind;
//! use quark_http::urls::table::RouteTable;
//!
//! let by_id = compile("Vehicle_id", &[ParamKind::Integer]).unwrap();
//! let by_vin = compile("Vehicle_vin", &[ParamKind::String]).unwrap();
//!
//! let mut table = RouteTable::new();
//! table.register(&by_id.path, Some(&Method::GET), 0);
//! table.register(&by_vin.path, Some(&Method::GET), 1);
//!
//! assert_eq!(table.route(&["vehicle", "42"], &Method::GET), Some(0));
//! assert_eq!(table.route(&["vehicle", "WVW1"], &Method::GET), Some(1));
//! ```

pub mod classifier;
pub mod compiler;
pub mod dispatcher;
pub mod kind;
pub mod table;

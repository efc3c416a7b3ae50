//! Derive argument metadata and command trees from static declarations.
//!
//! Two read-only queries are exposed:
//!
//! - [`metadata`] / [`metadata_for_fields`]: the flat, ordered list of
//!   [`PropertyMetadata`](command_info_core::PropertyMetadata) for one
//!   argument-bearing type, recursing through option groups.
//! - [`command_info`] / [`command_info_for`]: the
//!   [`CommandInfo`](command_info_core::CommandInfo) tree rooted at the last
//!   command of a command stack.
//!
//! Both are pure functions of the declarations: calling them twice on the
//! same types yields deep-equal results, and walking unrelated types from
//! several threads needs no synchronization.
//!
//! # Example
//!
//! ```
//! use command_info_core::ArgumentKind;
//! use command_info_metadata::command_info_for;
//! use command_info_parser::*;
//!
//! struct Build;
//!
//! impl ParsableArguments for Build {
//!     fn fields() -> Vec<FieldDecl> {
//!         vec![
//!             FieldDecl::leaf("release", ArgumentDecl::flag().help("Optimise")),
//!             FieldDecl::leaf("target", ArgumentDecl::argument::<String>()),
//!         ]
//!     }
//! }
//!
//! impl ParsableCommand for Build {}
//!
//! let info = command_info_for::<Build>();
//! assert_eq!(info.command_name, "build");
//! assert_eq!(info.arguments[0].id, ".release");
//! assert_eq!(info.arguments[0].kind, ArgumentKind::Flag);
//! assert_eq!(info.arguments[1].kind, ArgumentKind::Positional);
//! ```

mod builder;
mod walker;

pub use builder::{command_info, command_info_for};
pub use walker::{argument_kind, initial_value, metadata, metadata_for_fields, property_metadata};

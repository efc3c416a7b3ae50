//! Core metadata types for declaratively defined command hierarchies.
//!
//! This crate defines the snapshot types produced when a command declaration
//! is walked:
//!
//! - [`PropertyMetadata`]: one resolved, displayable argument (names, help
//!   text, classification, parsing strategy, initial value).
//! - [`ArgumentNameInfo`]: one declared name form (`--long`, `-s`,
//!   `-single-dash-long`).
//! - [`ArgumentKind`]: flag / option / positional classification.
//! - [`ParsingStrategy`]: how an argument consumes tokens during parsing.
//! - [`CommandInfo`]: one node of the command tree, with nested
//!   sub-commands and the command's own arguments.
//! - [`MetadataPackage`]: a versioned bundle of command trees for export.
//!
//! Validation ([`validate_command_info`], [`validate_package`]) catches
//! structural problems such as duplicate argument names or clashing
//! sub-command names in a produced tree.
//!
//! # Example
//!
//! ```
//! use command_info_core::*;
//!
//! let verbose = PropertyMetadata::new(".verbose", ArgumentKind::Flag)
//!     .with_names(vec![ArgumentNameInfo::short('v'), ArgumentNameInfo::long("verbose")])
//!     .with_abstract("Show extra output");
//!
//! let mut info = CommandInfo::new("tool");
//! info.arguments.push(verbose);
//!
//! assert_eq!(info.find_argument(".verbose").unwrap().kind, ArgumentKind::Flag);
//! assert!(validate_command_info(&info).is_empty());
//! ```

mod package;
mod types;
mod validate;

pub use package::MetadataPackage;
pub use types::*;
pub use validate::{ValidationError, validate_command_info, validate_package};

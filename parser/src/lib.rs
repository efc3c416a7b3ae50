//! Static argument declaration model.
//!
//! This crate is the argument-definition layer the metadata walker reads
//! from. It offers exactly three read-only capabilities per declared field:
//!
//! - enumerate the field's contributed definitions
//!   ([`ArgumentDecl::argument_set`]),
//! - read each definition's static attributes (names, positional or named,
//!   update arity, help, [`ParsingStrategy`]),
//! - evaluate a definition's defaulting logic against empty input
//!   ([`ArgumentDefinition::apply_initial`]).
//!
//! Types register their fields explicitly through [`ParsableArguments`] and
//! [`ParsableCommand`]; no runtime reflection is involved.
//!
//! # Example
//!
//! ```
//! use command_info_parser::*;
//!
//! struct Serve;
//!
//! impl ParsableArguments for Serve {
//!     fn fields() -> Vec<FieldDecl> {
//!         vec![
//!             FieldDecl::leaf("port", ArgumentDecl::option::<u16>().default_value(8080)),
//!             FieldDecl::leaf("root", ArgumentDecl::argument::<String>()),
//!         ]
//!     }
//! }
//!
//! impl ParsableCommand for Serve {
//!     fn configuration() -> CommandConfiguration {
//!         CommandConfiguration::new().with_abstract("Serve files")
//!     }
//! }
//!
//! let descriptor = CommandDescriptor::of::<Serve>();
//! assert_eq!(descriptor.command_name(), "serve");
//! assert_eq!(descriptor.fields().len(), 2);
//! ```

mod command;
mod declaration;
mod definition;
mod error;
mod key;
mod name;

pub use command::{CommandConfiguration, CommandDescriptor, ParsableCommand};
pub use command_info_core::ParsingStrategy;
pub use declaration::{
    ArgumentDecl, FieldDecl, FieldShape, FlagInversion, ParsableArguments, short_type_name,
};
pub use definition::{
    ArgumentDefinition, ArgumentHelp, ArgumentSet, ArgumentVisibility, DefinitionKind,
    InitialValue, Update, ValueParser,
};
pub use error::{ParseError, Result};
pub use key::{
    InputKey, InputOrigin, InputOriginElement, ParsedValue, ParsedValues, STORAGE_PREFIX,
    coding_name,
};
pub use name::{Name, NameSpec, NameSpecification, to_kebab_case};

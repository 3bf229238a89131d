#![deny(missing_docs)]
//! A linter for Debian control files.
//!
//! Checks `debian/control`, `DEBIAN/control`, `.dsc`, `.changes` and
//! machine-readable `debian/copyright` files against Debian Policy and the
//! DEP-5 copyright format. Which checks run is decided by a
//! [`Configuration`], usually derived from one of the [`Preset`]s.
//!
//! # Examples
//!
//! ```rust
//! use debian_control_lint::{lint, Check, ControlType, Preset};
//!
//! let text = r#"Source: foo
//! Maintainer: Jane Packager <jane@example.com>
//! Standards-Version: 4.6.2
//! Vcs-Git: https://salsa.debian.org/foo.git
//! Vcs-Hg: https://hg.example.com/foo
//!
//! Package: foo
//! Architecture: any
//! Description: an example package
//!  It does nothing useful.
//! "#;
//!
//! let mut config = Preset::Normal.configuration();
//! config.set_control_type(ControlType::SourcePackageControl);
//!
//! let report = lint(text, &config).unwrap();
//! assert_eq!(report.count(Check::DuplicateVcs), 1);
//! for violation in report.violations() {
//!     println!("{}", violation);
//! }
//! ```

pub mod checks;
pub mod config;
pub mod control;
pub mod control_type;
pub mod error;
pub mod field;
pub mod glob;
pub mod input;
pub mod mailbox;
pub mod parse;
pub mod probe;
mod refs;
pub mod report;
pub mod spec;
pub mod stanza;
pub mod tables;

pub use config::{Check, Configuration, Preset};
pub use control::{lint, ControlFile, Phase};
pub use control_type::ControlType;
pub use error::Error;
pub use field::{DataField, FieldType};
pub use parse::Line;
pub use report::{Context, Report, Violation};
pub use stanza::Stanza;

//! Content checks, dispatched from the stanza specs.
//!
//! Checks come in three sizes: [`FieldCheck`]s look at the value of a single
//! field, [`StanzaCheck`]s at a whole stanza and [`FileCheck`]s at the whole
//! file. All of them only communicate through [`Context::report`].

mod copyright;
mod fields;
mod stanza;

use crate::control::ControlFile;
use crate::report::Context;
use crate::stanza::Stanza;

pub use copyright::simple_license_name;

/// A check of the value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCheck {
    /// No check
    None,
    /// `Name <email>`
    Address,
    /// Comma separated list of addresses
    MultiAddress,
    /// Address or URL of the upstream author
    UpstreamContact,
    /// Architecture list, with rules depending on the control type
    Architecture,
    /// `yes` or `no`
    Boolean,
    /// List of binary packages
    BinaryList,
    /// Changelog entries
    ChangeList,
    /// Glob patterns of a copyright file
    CopyrightFileList,
    /// Format URL of a copyright file
    CopyrightFormat,
    /// Source of a copyright file
    CopyrightSource,
    /// RFC 2822 date
    Date,
    /// Package relations
    Dependency,
    /// Package relations with exact versions
    ExactDependency,
    /// Package description
    Description,
    /// Dgit commit hash
    Dgit,
    /// Upload distribution
    Distribution,
    /// MD5 file list
    FileList,
    /// Format of a .dsc or .changes file
    FormatVersion,
    /// Vcs-Git
    GitVcs,
    /// Vcs-Hg
    MercurialVcs,
    /// License of a copyright file
    License,
    /// Multi-Arch
    MultiArch,
    /// List of bug numbers
    NumberList,
    /// Package-List of a .dsc file
    PackageList,
    /// Package name
    PackageName,
    /// Package-Type
    PackageType,
    /// Priority
    Priority,
    /// Rules-Requires-Root
    RequiresRoot,
    /// Section
    Section,
    /// Checksums-Sha1
    Sha1,
    /// Checksums-Sha256
    Sha256,
    /// Size in bytes or kilobytes
    Size,
    /// Source package name with optional version
    Source,
    /// Standards-Version
    StandardsVersion,
    /// Urgency
    Urgency,
    /// URL
    Url,
    /// Debian version
    Version,
}

impl FieldCheck {
    /// Check `value`.
    pub fn run(&self, value: &str, cx: &mut Context) {
        match self {
            FieldCheck::None => {}
            FieldCheck::Address => fields::address(value, cx),
            FieldCheck::MultiAddress => fields::multi_address(value, cx),
            FieldCheck::UpstreamContact => fields::upstream_contact(value, cx),
            FieldCheck::Architecture => fields::single_architecture(value, cx),
            FieldCheck::Boolean => fields::boolean(value, cx),
            FieldCheck::BinaryList => fields::binary_list(value, cx),
            FieldCheck::ChangeList => fields::change_list(value, cx),
            FieldCheck::CopyrightFileList => fields::copyright_file_list(value, cx),
            FieldCheck::CopyrightFormat => fields::copyright_format(value, cx),
            FieldCheck::CopyrightSource => fields::copyright_source(value, cx),
            FieldCheck::Date => fields::date(value, cx),
            FieldCheck::Dependency => fields::dependency(value, cx),
            FieldCheck::ExactDependency => fields::exact_dependency(value, cx),
            FieldCheck::Description => fields::description(value, cx),
            FieldCheck::Dgit => fields::dgit(value, cx),
            FieldCheck::Distribution => fields::distribution(value, cx),
            FieldCheck::FileList => fields::file_list(value, cx),
            FieldCheck::FormatVersion => fields::format_version(value, cx),
            FieldCheck::GitVcs => fields::git_vcs(value, cx),
            FieldCheck::MercurialVcs => fields::mercurial_vcs(value, cx),
            FieldCheck::License => fields::license(value, cx),
            FieldCheck::MultiArch => fields::multi_arch(value, cx),
            FieldCheck::NumberList => fields::number_list(value, cx),
            FieldCheck::PackageList => fields::package_list(value, cx),
            FieldCheck::PackageName => fields::package_name(value, cx),
            FieldCheck::PackageType => fields::package_type(value, cx),
            FieldCheck::Priority => fields::priority(value, cx),
            FieldCheck::RequiresRoot => fields::requires_root(value, cx),
            FieldCheck::Section => fields::section(value, cx),
            FieldCheck::Sha1 => fields::checksums(value, 40, cx),
            FieldCheck::Sha256 => fields::checksums(value, 64, cx),
            FieldCheck::Size => fields::size(value, cx),
            FieldCheck::Source => fields::source(value, cx),
            FieldCheck::StandardsVersion => fields::standards_version(value, cx),
            FieldCheck::Urgency => fields::urgency(value, cx),
            FieldCheck::Url => fields::url(value, cx),
            FieldCheck::Version => fields::version(value, cx),
        }
    }
}

/// A check of a whole stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StanzaCheck {
    /// The version in Source should differ from Version
    Source,
    /// At most one version control system
    Vcs,
    /// Files and the checksum lists describe the same files
    Checksums,
    /// The header of a copyright file
    CopyrightHeader,
}

impl StanzaCheck {
    /// Check `stanza`.
    pub fn run(&self, stanza: &Stanza, cx: &mut Context) {
        match self {
            StanzaCheck::Source => stanza::source(stanza, cx),
            StanzaCheck::Vcs => stanza::vcs(stanza, cx),
            StanzaCheck::Checksums => stanza::checksums(stanza, cx),
            StanzaCheck::CopyrightHeader => stanza::copyright_header(stanza, cx),
        }
    }
}

/// A check of a whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCheck {
    /// No check
    None,
    /// File patterns and license declarations of a copyright file
    Copyright,
}

impl FileCheck {
    /// Check `file`.
    pub fn run(&self, file: &ControlFile, cx: &mut Context) {
        match self {
            FileCheck::None => {}
            FileCheck::Copyright => {
                copyright::file_patterns(file, cx);
                copyright::license_names(file, cx);
            }
        }
    }
}

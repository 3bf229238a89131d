//! The kinds of control files that can be linted, and the stanzas each may contain.

use crate::checks::{FieldCheck, FileCheck, StanzaCheck};
use crate::field::FieldType::{self, Folded, Multiline, Simple};
use crate::spec::Requirement::{self, Mandatory, Optional, Recommended};
use crate::spec::{FieldSpec, StanzaSpec};
use once_cell::sync::Lazy;

/// Name of the copyright stanza that lists files.
pub const FILES_STANZA: &str = "file stanza";

/// Name of the copyright stanza that holds the text of a license.
pub const LICENSE_STANZA: &str = "stand-alone license stanza";

/// A type of control file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlType {
    /// `debian/control` in a source package
    SourcePackageControl,

    /// `DEBIAN/control` in a binary package
    BinaryPackageControl,

    /// `debian/copyright` in the machine-readable format
    #[default]
    Copyright,

    /// A source control file (`.dsc`)
    SourceControl,

    /// An upload control file (`.changes`)
    Changes,
}

impl ControlType {
    /// All control types.
    pub const ALL: &'static [ControlType] = &[
        ControlType::SourcePackageControl,
        ControlType::BinaryPackageControl,
        ControlType::Copyright,
        ControlType::SourceControl,
        ControlType::Changes,
    ];

    /// The name used to select this type.
    pub fn type_name(&self) -> &'static str {
        match self {
            ControlType::SourcePackageControl => "debian/control",
            ControlType::BinaryPackageControl => "DEBIAN/control",
            ControlType::Copyright => "debian/copyright",
            ControlType::SourceControl => ".dsc",
            ControlType::Changes => ".changes",
        }
    }

    /// The file linted when no file is given.
    pub fn default_file(&self) -> &'static str {
        match self {
            ControlType::SourcePackageControl | ControlType::BinaryPackageControl => "control",
            ControlType::Copyright => "copyright",
            ControlType::SourceControl => ".dsc",
            ControlType::Changes => ".changes",
        }
    }

    /// Human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            ControlType::SourcePackageControl => "source package control file",
            ControlType::BinaryPackageControl => "binary package control file",
            ControlType::Copyright => "copyright file",
            ControlType::SourceControl => "source control file",
            ControlType::Changes => "upload control file",
        }
    }

    /// Whether the file may be wrapped in a PGP cleartext signature.
    pub fn supports_pgp(&self) -> bool {
        matches!(self, ControlType::SourceControl | ControlType::Changes)
    }

    /// Whether `#` comment lines are allowed.
    pub fn allows_comments(&self) -> bool {
        matches!(self, ControlType::SourcePackageControl)
    }

    /// The stanzas this type of file may contain, in order.
    pub fn stanzas(&self) -> &'static [StanzaSpec] {
        match self {
            ControlType::SourcePackageControl => &SOURCE_PACKAGE_CONTROL,
            ControlType::BinaryPackageControl => &BINARY_PACKAGE_CONTROL,
            ControlType::Copyright => &COPYRIGHT,
            ControlType::SourceControl => &SOURCE_CONTROL,
            ControlType::Changes => &CHANGES,
        }
    }

    /// The check run over the whole file.
    pub fn file_check(&self) -> FileCheck {
        match self {
            ControlType::Copyright => FileCheck::Copyright,
            _ => FileCheck::None,
        }
    }
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl std::str::FromStr for ControlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlType::ALL
            .iter()
            .copied()
            .find(|t| t.type_name() == s)
            .ok_or_else(|| format!("Unknown control type: {}", s))
    }
}

const fn field(requirement: Requirement, field_type: FieldType, check: FieldCheck) -> FieldSpec {
    FieldSpec::new(requirement, field_type, check)
}

type Fields = Vec<(&'static str, FieldSpec)>;

fn vcs_fields(fields: &mut Fields) {
    fields.extend([
        ("Vcs-Browser", field(Optional, Simple, FieldCheck::Url)),
        ("Vcs-Arch", field(Optional, Simple, FieldCheck::None)),
        ("Vcs-Bzr", field(Optional, Simple, FieldCheck::None)),
        ("Vcs-Cvs", field(Optional, Simple, FieldCheck::None)),
        ("Vcs-Darcs", field(Optional, Simple, FieldCheck::None)),
        ("Vcs-Git", field(Optional, Simple, FieldCheck::GitVcs)),
        ("Vcs-Hg", field(Optional, Simple, FieldCheck::MercurialVcs)),
        ("Vcs-Mtn", field(Optional, Simple, FieldCheck::None)),
        ("Vcs-Svn", field(Optional, Simple, FieldCheck::None)),
    ]);
}

fn build_relation_fields(fields: &mut Fields) {
    for name in [
        "Build-Depends",
        "Build-Depends-Indep",
        "Build-Depends-Arch",
        "Build-Conflicts",
        "Build-Conflicts-Indep",
        "Build-Conflicts-Arch",
    ] {
        fields.push((name, field(Optional, Folded, FieldCheck::Dependency)));
    }
}

fn binary_relation_fields(fields: &mut Fields) {
    for name in [
        "Depends",
        "Pre-Depends",
        "Recommends",
        "Suggests",
        "Enhances",
        "Breaks",
        "Conflicts",
        "Provides",
        "Replaces",
    ] {
        fields.push((name, field(Optional, Folded, FieldCheck::Dependency)));
    }
}

static SOURCE_PACKAGE_CONTROL: Lazy<Vec<StanzaSpec>> = Lazy::new(|| {
    let mut general: Fields = vec![
        ("Source", field(Mandatory, Simple, FieldCheck::Source)),
        ("Maintainer", field(Mandatory, Simple, FieldCheck::Address)),
        ("Uploaders", field(Optional, Folded, FieldCheck::MultiAddress)),
        ("Section", field(Recommended, Simple, FieldCheck::Section)),
        ("Priority", field(Recommended, Simple, FieldCheck::Priority)),
        ("Standards-Version", field(Mandatory, Simple, FieldCheck::StandardsVersion)),
        ("Homepage", field(Optional, Simple, FieldCheck::Url)),
        ("Testsuite", field(Optional, Simple, FieldCheck::Dependency)),
        ("Rules-Requires-Root", field(Optional, Simple, FieldCheck::RequiresRoot)),
    ];
    build_relation_fields(&mut general);
    vcs_fields(&mut general);

    let mut binary: Fields = vec![
        ("Package", field(Mandatory, Simple, FieldCheck::PackageName)),
        ("Architecture", field(Mandatory, Simple, FieldCheck::Architecture)),
        ("Section", field(Recommended, Simple, FieldCheck::Section)),
        ("Priority", field(Recommended, Simple, FieldCheck::Priority)),
        ("Essential", field(Optional, Simple, FieldCheck::Boolean)),
        ("Multi-Arch", field(Optional, Simple, FieldCheck::MultiArch)),
        ("Description", field(Recommended, Multiline, FieldCheck::Description)),
        ("Homepage", field(Optional, Simple, FieldCheck::Url)),
        ("Built-Using", field(Optional, Simple, FieldCheck::ExactDependency)),
        ("Package-Type", field(Optional, Simple, FieldCheck::PackageType)),
    ];
    binary_relation_fields(&mut binary);

    vec![
        StanzaSpec {
            name: "general stanza",
            mandatory: true,
            repeatable: false,
            fields: general,
            checks: &[StanzaCheck::Source, StanzaCheck::Vcs],
        },
        StanzaSpec {
            name: "binary package stanza",
            mandatory: true,
            repeatable: true,
            fields: binary,
            checks: &[],
        },
    ]
});

static BINARY_PACKAGE_CONTROL: Lazy<Vec<StanzaSpec>> = Lazy::new(|| {
    let mut fields: Fields = vec![
        ("Package", field(Mandatory, Simple, FieldCheck::PackageName)),
        ("Source", field(Optional, Simple, FieldCheck::Source)),
        ("Version", field(Mandatory, Simple, FieldCheck::Version)),
        ("Section", field(Recommended, Simple, FieldCheck::Section)),
        ("Priority", field(Recommended, Simple, FieldCheck::Priority)),
        ("Architecture", field(Mandatory, Simple, FieldCheck::Architecture)),
        ("Essential", field(Optional, Simple, FieldCheck::Boolean)),
        ("Multi-Arch", field(Optional, Simple, FieldCheck::MultiArch)),
        ("Installed-Size", field(Optional, Simple, FieldCheck::Size)),
        ("Maintainer", field(Mandatory, Simple, FieldCheck::Address)),
        ("Description", field(Recommended, Multiline, FieldCheck::Description)),
        ("Homepage", field(Optional, Simple, FieldCheck::Url)),
        ("Built-Using", field(Optional, Simple, FieldCheck::ExactDependency)),
    ];
    binary_relation_fields(&mut fields);

    vec![StanzaSpec {
        name: "binary package control stanza",
        mandatory: true,
        repeatable: false,
        fields,
        checks: &[StanzaCheck::Source],
    }]
});

static SOURCE_CONTROL: Lazy<Vec<StanzaSpec>> = Lazy::new(|| {
    let mut fields: Fields = vec![
        ("Format", field(Mandatory, Simple, FieldCheck::FormatVersion)),
        ("Source", field(Mandatory, Simple, FieldCheck::Source)),
        ("Binary", field(Optional, Folded, FieldCheck::BinaryList)),
        ("Architecture", field(Optional, Simple, FieldCheck::Architecture)),
        ("Version", field(Mandatory, Simple, FieldCheck::Version)),
        ("Maintainer", field(Mandatory, Simple, FieldCheck::Address)),
        ("Uploaders", field(Optional, Folded, FieldCheck::MultiAddress)),
        ("Homepage", field(Optional, Simple, FieldCheck::Url)),
        ("Testsuite", field(Optional, Simple, FieldCheck::Dependency)),
        ("Dgit", field(Optional, Folded, FieldCheck::Dgit)),
        ("Standards-Version", field(Mandatory, Simple, FieldCheck::StandardsVersion)),
        ("Package-List", field(Recommended, Multiline, FieldCheck::PackageList)),
        ("Checksums-Sha1", field(Mandatory, Multiline, FieldCheck::Sha1)),
        ("Checksums-Sha256", field(Mandatory, Multiline, FieldCheck::Sha256)),
        ("Files", field(Mandatory, Multiline, FieldCheck::FileList)),
    ];
    vcs_fields(&mut fields);
    build_relation_fields(&mut fields);

    vec![StanzaSpec {
        name: "source stanza",
        mandatory: true,
        repeatable: false,
        fields,
        checks: &[StanzaCheck::Source, StanzaCheck::Vcs, StanzaCheck::Checksums],
    }]
});

static CHANGES: Lazy<Vec<StanzaSpec>> = Lazy::new(|| {
    vec![StanzaSpec {
        name: "changes stanza",
        mandatory: true,
        repeatable: false,
        fields: vec![
            ("Format", field(Mandatory, Simple, FieldCheck::FormatVersion)),
            ("Date", field(Mandatory, Simple, FieldCheck::Date)),
            ("Source", field(Mandatory, Simple, FieldCheck::Source)),
            ("Binary", field(Mandatory, Folded, FieldCheck::BinaryList)),
            ("Architecture", field(Optional, Simple, FieldCheck::Architecture)),
            ("Version", field(Mandatory, Simple, FieldCheck::Version)),
            ("Distribution", field(Mandatory, Simple, FieldCheck::Distribution)),
            ("Urgency", field(Recommended, Simple, FieldCheck::Urgency)),
            ("Maintainer", field(Mandatory, Simple, FieldCheck::Address)),
            ("Changed-By", field(Optional, Simple, FieldCheck::Address)),
            ("Description", field(Recommended, Multiline, FieldCheck::None)),
            ("Closes", field(Optional, Simple, FieldCheck::NumberList)),
            ("Changes", field(Mandatory, Multiline, FieldCheck::ChangeList)),
            ("Checksums-Sha1", field(Mandatory, Multiline, FieldCheck::Sha1)),
            ("Checksums-Sha256", field(Mandatory, Multiline, FieldCheck::Sha256)),
            ("Files", field(Mandatory, Multiline, FieldCheck::FileList)),
        ],
        checks: &[StanzaCheck::Source, StanzaCheck::Checksums],
    }]
});

static COPYRIGHT: Lazy<Vec<StanzaSpec>> = Lazy::new(|| {
    vec![
        StanzaSpec {
            name: "header stanza",
            mandatory: true,
            repeatable: false,
            fields: vec![
                ("Format", field(Mandatory, Simple, FieldCheck::CopyrightFormat)),
                ("Upstream-Name", field(Optional, Simple, FieldCheck::None)),
                ("Upstream-Contact", field(Optional, Multiline, FieldCheck::UpstreamContact)),
                ("Source", field(Optional, Multiline, FieldCheck::CopyrightSource)),
                ("Disclaimer", field(Optional, Multiline, FieldCheck::None)),
                ("Comment", field(Optional, Multiline, FieldCheck::None)),
                ("License", field(Optional, Multiline, FieldCheck::License)),
                ("Copyright", field(Optional, Multiline, FieldCheck::None)),
                ("Files-Excluded", field(Optional, Multiline, FieldCheck::CopyrightFileList)),
            ],
            checks: &[StanzaCheck::CopyrightHeader],
        },
        StanzaSpec {
            name: FILES_STANZA,
            mandatory: true,
            repeatable: true,
            fields: vec![
                ("Files", field(Mandatory, Multiline, FieldCheck::CopyrightFileList)),
                ("Copyright", field(Mandatory, Multiline, FieldCheck::None)),
                ("License", field(Mandatory, Multiline, FieldCheck::License)),
                ("Comment", field(Optional, Multiline, FieldCheck::None)),
            ],
            checks: &[],
        },
        StanzaSpec {
            name: LICENSE_STANZA,
            mandatory: false,
            repeatable: true,
            fields: vec![
                ("License", field(Mandatory, Multiline, FieldCheck::License)),
                ("Comment", field(Optional, Multiline, FieldCheck::None)),
            ],
            checks: &[],
        },
    ]
});

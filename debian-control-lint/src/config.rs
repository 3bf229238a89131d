//! Check registry, presets and per-run configuration.

use crate::control_type::ControlType;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A named bundle of enabled checks.
///
/// Presets are ordered: every check enabled by a preset is also enabled by
/// all presets that compare greater than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Preset {
    /// Disables all non-essential checks
    Quirks,

    /// Follows the letter of Debian Policy
    Normal,

    /// Also enforces best practices and conventions
    Strict,

    /// Enables every check
    Exact,
}

impl Preset {
    /// All presets, from most lenient to most strict.
    pub const ALL: &'static [Preset] = &[
        Preset::Quirks,
        Preset::Normal,
        Preset::Strict,
        Preset::Exact,
    ];

    /// Human readable description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::Quirks => "The quirks preset disables all non-essential checks.",
            Preset::Normal => "The normal preset is designed for files following the letter of Debian Policy (unless ambiguous), but not necessarily following all best practices.",
            Preset::Strict => "The strict preset is for files following Debian Policy, including any best practices or conventions.",
            Preset::Exact => "The exact preset enables all checks, even ones not mandated by Debian Policy, including unstable checks. Not for production use.",
        }
    }

    /// The checks enabled by this preset.
    pub fn checks(&self) -> impl Iterator<Item = Check> + '_ {
        Check::ALL
            .iter()
            .copied()
            .filter(move |c| c.minimum_preset() <= *self)
    }

    /// Create a fresh configuration from this preset.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            checks: self.checks().collect(),
            control_type: ControlType::default(),
            target: None,
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Preset::Quirks => "quirks",
            Preset::Normal => "normal",
            Preset::Strict => "strict",
            Preset::Exact => "exact",
        })
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quirks" => Ok(Preset::Quirks),
            "normal" => Ok(Preset::Normal),
            "strict" => Ok(Preset::Strict),
            "exact" => Ok(Preset::Exact),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

macro_rules! checks {
    ($($variant:ident => $id:literal, $preset:ident, $description:literal;)*) => {
        /// A configurable policy check.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Check {
            $(
                #[doc = $description]
                $variant,
            )*
        }

        impl Check {
            /// Every known check, in identifier order.
            pub const ALL: &'static [Check] = &[$(Check::$variant),*];

            /// The stable identifier of the check, as used on the command line.
            pub fn id(&self) -> &'static str {
                match self {
                    $(Check::$variant => $id,)*
                }
            }

            /// What the check reports.
            pub fn description(&self) -> &'static str {
                match self {
                    $(Check::$variant => $description,)*
                }
            }

            /// The least strict preset that enables this check.
            pub fn minimum_preset(&self) -> Preset {
                match self {
                    $(Check::$variant => Preset::$preset,)*
                }
            }
        }
    };
}

checks! {
    AddressStyle => "addressStyle", Normal, "An address (name and email) not using the proper format.";
    ArchInversion => "archInversion", Normal, "Mixed inverted and non-inverted architectures.";
    Comments => "comments", Normal, "Comments outside of debian/control files.";
    CopyrightFilePatternGenerality => "copyrightFilePatternGenerality", Normal, "A file pattern in a debian/copyright file that is more generic than a pattern declared in an earlier stanza.";
    CopyrightSourceStyle => "copyrightSourceStyle", Exact, "A Source field in a debian/copyright file that is not a single URL address.";
    CustomFieldNames => "customFieldNames", Strict, "A user-defined field not following the naming scheme.";
    CustomFields => "customFields", Strict, "Fields that are not listed in Debian Policy. When disabled, fields are not checked for 'customFieldNames'.";
    CustomLicenseException => "customLicenseException", Exact, "License exception not listed in the copyright format.";
    CustomUrgencies => "customUrgencies", Normal, "An Urgency field value not listed in Debian Policy.";
    DebianInstallerSection => "debianInstallerSection", Normal, "A Section field value of 'debian-installer'.";
    DescriptionReservedSyntax => "descriptionReservedSyntax", Normal, "Reserved syntax used in descriptions.";
    DgitExtraData => "dgitExtraData", Strict, "Extra data specified in a Dgit field, reserved for future expansion.";
    DuplicateArchitecture => "duplicateArchitecture", Strict, "An Architecture field declaring the same architecture more than once.";
    DuplicateField => "duplicateField", Normal, "A field declared twice in the same stanza.";
    DuplicateFilePattern => "duplicateFilePattern", Strict, "A file pattern repeated within the same field.";
    DuplicateFiles => "duplicateFiles", Strict, "Duplicate entry in a file list.";
    DuplicateIssueNumbers => "duplicateIssueNumbers", Strict, "A Closes field with repeated issue numbers.";
    DuplicatePackages => "duplicatePackages", Strict, "Duplicate entry in a package list.";
    DuplicateVcs => "duplicateVcs", Normal, "More than one version control fields declared.";
    Email => "email", Normal, "An email address with an invalid format.";
    EmptyFields => "emptyFields", Normal, "Fields with no value specified.";
    EmptyStanzaSeparators => "emptyStanzaSeparators", Strict, "Stanza separators that contain whitespaces.";
    ExactFormatVersion => "exactFormatVersion", Exact, "An unrecognized format version.";
    ExtraPriority => "extraPriority", Normal, "The use of the deprecated Priority value 'extra'.";
    FieldName => "fieldName", Normal, "A field name using invalid characters or formatting.";
    FieldNameCapitalization => "fieldNameCapitalization", Exact, "Field name that is not capitalized according to the established conventions.";
    FieldType => "fieldType", Normal, "A field with an invalid type.";
    FileListIndent => "fileListIndent", Normal, "A file list not using a single space as indentation.";
    FutureDate => "futureDate", Normal, "A future date specified in a Date field.";
    LeadingEmptyLine => "leadingEmptyLine", Normal, "A field that should begin with an empty line but doesn't.";
    LicenseDeclarations => "licenseDeclarations", Normal, "Declared licenses that are not used, or used licenses that are not declared.";
    LicenseDeclaredAfterExplanation => "licenseDeclaredAfterExplanation", Exact, "A license that had an explanation every time it was used, and still has a stand-alone license stanza.";
    LicenseName => "licenseName", Normal, "Short license name(s) not properly formatted. When disabled, debian/copyright licenses are also not checked for 'customLicenseException'.";
    MaintainerNameFullStop => "maintainerNameFullStop", Exact, "A maintainer name that contains a full stop.";
    MissingSectionOrPriority => "missingSectionOrPriority", Normal, "A missing section or priority value in a .changes file's file list.";
    MultipleDistributions => "multipleDistributions", Exact, "A Distribution field with more than one distribution specified.";
    RecommendedFields => "recommendedFields", Strict, "A recommended field that is not present in the stanza.";
    RedundantFilePattern => "redundantFilePattern", Exact, "A file pattern that is not necessary, because there is a more generic pattern in the same field.";
    RedundantPackageType => "redundantPackageType", Strict, "A Package-Type field with a value of 'deb' in a debian/control file.";
    SourceRedundantVersion => "sourceRedundantVersion", Exact, "A version specified in a Source field that matches the value of the Version field.";
    SpaceAfterColon => "spaceAfterColon", Strict, "A colon that has no space after it, and doesn't end the line.";
    StrictArch => "strictArch", Strict, "An architecture not recognized.";
    StrictCopyrightFormatVersion => "strictCopyrightFormatVersion", Strict, "A copyright format version not recognized.";
    StrictSection => "strictSection", Strict, "A section or area name not recognized.";
    StrictStandardsVersion => "strictStandardsVersion", Exact, "A standards version not recognized.";
    TrailingSpace => "trailingSpace", Exact, "Line that ends with a trailing whitespace.";
    UnknownPackageType => "unknownPackageType", Exact, "An unrecognized type is used in a Package-Type field. Currently, the recognized types are 'deb' and 'udeb'.";
    UnknownPriority => "unknownPriority", Normal, "A priority name not recognized.";
    UpstreamContactStyle => "upstreamContactStyle", Exact, "An Upstream-Contact field that is not a single URL address or a Maintainer-style contact.";
    UpstreamVersionStyle => "upstreamVersionStyle", Normal, "An upstream version using invalid syntax.";
    UrgencyDescriptionParentheses => "urgencyDescriptionParentheses", Strict, "Commentary in an Urgency field that is not wrapped in parentheses.";
    Url => "url", Normal, "A URL using an invalid format or unknown scheme.";
    UrlExists => "urlExists", Exact, "A URL address that is not reachable.";
    UrlForceHttps => "urlForceHttps", Exact, "A URL address not using the HTTPS protocol.";
    VcsBranch => "vcsBranch", Exact, "A VCS field that does not declare a branch when it should.";
    VersionStyle => "versionStyle", Normal, "A Debian version not using the proper format.";
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Check {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Check::ALL
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown check: {}", s))
    }
}

/// The state of every check plus the file being linted.
///
/// A configuration is an ordinary value: cloning it and applying overrides
/// never affects the preset it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    checks: BTreeSet<Check>,
    control_type: ControlType,
    target: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Preset::Normal.configuration()
    }
}

impl Configuration {
    /// Whether a check is enabled.
    pub fn is_enabled(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }

    /// Enable a check.
    pub fn enable(&mut self, check: Check) -> &mut Self {
        self.checks.insert(check);
        self
    }

    /// Disable a check.
    pub fn disable(&mut self, check: Check) -> &mut Self {
        self.checks.remove(&check);
        self
    }

    /// Enable or disable a check.
    pub fn set(&mut self, check: Check, enabled: bool) -> &mut Self {
        if enabled {
            self.enable(check)
        } else {
            self.disable(check)
        }
    }

    /// The enabled checks, in identifier order.
    pub fn enabled_checks(&self) -> impl Iterator<Item = Check> + '_ {
        self.checks.iter().copied()
    }

    /// The type of control file being linted.
    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    /// Set the type of control file being linted.
    pub fn set_control_type(&mut self, control_type: ControlType) -> &mut Self {
        self.control_type = control_type;
        self
    }

    /// Set the file to lint.
    pub fn set_target(&mut self, target: impl Into<PathBuf>) -> &mut Self {
        self.target = Some(target.into());
        self
    }

    /// The file to lint; falls back to the default file name of the control type.
    pub fn target(&self) -> &Path {
        match &self.target {
            Some(target) => target.as_path(),
            None => Path::new(self.control_type.default_file()),
        }
    }
}

//! Links to the documents the checks are based on.

macro_rules! policy {
    ($anchor:literal) => {
        concat!("https://www.debian.org/doc/debian-policy/ch-controlfields#", $anchor)
    };
}

macro_rules! dep5 {
    ($anchor:literal) => {
        concat!("https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/#", $anchor)
    };
}

pub const SYNTAX: &str = policy!("syntax-of-control-files");
pub const USER_DEFINED_FIELDS: &str = policy!("user-defined-fields");
pub const ARCHITECTURE: &str = policy!("architecture");
pub const ARCH_WILDCARD: &str =
    "https://www.debian.org/doc/debian-policy/ch-customized-programs.html#architecture-wildcards";
pub const BINARY: &str = policy!("binary");
pub const CHANGES: &str = policy!("changes");
pub const CHECKSUMS: &str = policy!("checksums-sha1-and-checksums-sha256");
pub const CLOSES: &str = policy!("closes");
pub const DATE: &str = policy!("date");
pub const DESCRIPTION: &str = policy!("description");
pub const DGIT: &str = policy!("dgit");
pub const DISTRIBUTION: &str = policy!("distribution");
pub const ESSENTIAL: &str = policy!("essential");
pub const FILES: &str = policy!("files");
pub const FORMAT: &str = policy!("format");
pub const INSTALLED_SIZE: &str = policy!("installed-size");
pub const MAINTAINER: &str = policy!("maintainer");
pub const PACKAGE: &str = policy!("package");
pub const PACKAGE_LIST: &str = policy!("package-list");
pub const PACKAGE_TYPE: &str = policy!("package-type");
pub const PRIORITY: &str = policy!("priority");
pub const RULES_REQUIRES_ROOT: &str = policy!("rules-requires-root");
pub const SECTION: &str = policy!("section");
pub const SOURCE: &str = policy!("source");
pub const STANDARDS_VERSION: &str = policy!("standards-version");
pub const URGENCY: &str = policy!("urgency");
pub const VCS: &str = policy!("version-control-system-vcs-fields");
pub const VERSION: &str = policy!("version");
pub const RELATIONSHIPS: &str = "https://www.debian.org/doc/debian-policy/ch-relationships.html";
pub const MULTI_ARCH: &str = "https://wiki.debian.org/Multiarch/Implementation";
pub const PRIORITIES: &str = "https://www.debian.org/doc/debian-policy/ch-archive.html#priorities";
pub const SUBSECTIONS: &str = "https://www.debian.org/doc/debian-policy/ch-archive.html#sections";
pub const RFC822: &str = "https://www.w3.org/Protocols/rfc822/";

pub const COPYRIGHT_HEADER: &str = dep5!("header-stanza");
pub const COPYRIGHT_FILES: &str = dep5!("files-field");
pub const COPYRIGHT_FORMAT: &str = dep5!("format-field");
pub const COPYRIGHT_LICENSE: &str = dep5!("license-field");
pub const COPYRIGHT_SHORT_NAME: &str = dep5!("license-short-name");
pub const COPYRIGHT_STANDALONE: &str = dep5!("stand-alone-license-stanza");
pub const COPYRIGHT_SOURCE: &str = dep5!("source-field");
pub const COPYRIGHT_UPSTREAM_CONTACT: &str = dep5!("upstream-contact-field");

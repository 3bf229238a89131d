//! Checks of individual field values.

use crate::config::Check;
use crate::control_type::ControlType;
use crate::refs;
use crate::report::Context;
use crate::tables;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

static ARCH_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap());
static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9+.-]+$").unwrap());
static UPSTREAM_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9][A-Za-z0-9.+~:-]*$").unwrap());
static DEBIAN_REVISION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9.+~]+$").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun), \d{1,2} ",
        r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{4} ",
        r"\d{2}:\d{2}:\d{2} [+-](\d{2})(\d{2})$"
    ))
    .unwrap()
});
static SOURCE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+( \([a-zA-Z0-9]+\))?$").unwrap());
static CHANGES_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());
static FILE_LIST_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ \S").unwrap());
static REQUIRES_ROOT_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[!-.0-~]+/[!-~]+$").unwrap());
pub(super) static LICENSE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r" (or|and) ").unwrap());

const RELATION_OPERATORS: &[&str] = &["<<", "<=", ">=", ">>", "="];

fn is_hex(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Report if the first line of a multi-line value is not empty.
fn leading_empty_line(value: &str, field: &str, reference: &'static str, cx: &mut Context) {
    if !value.split('\n').next().unwrap_or_default().trim().is_empty() {
        cx.check(
            Check::LeadingEmptyLine,
            format!("The first line of {} should be empty", field),
            Some(reference),
        );
    }
}

/// Lines after the first, skipping blank ones.
fn entries(value: &str) -> impl Iterator<Item = &str> {
    value.split('\n').skip(1).filter(|l| !l.trim().is_empty())
}

pub(super) fn address(value: &str, cx: &mut Context) {
    let (begin, end) = match (value.find('<'), value.rfind('>')) {
        (Some(begin), Some(end)) if begin < end => (begin, end),
        _ => {
            cx.check(
                Check::AddressStyle,
                format!("Missing email address: {}", value),
                Some(refs::MAINTAINER),
            );
            return;
        }
    };
    let mailbox = &value[begin + 1..end];
    if !cx.mailbox().is_valid(mailbox) {
        cx.check(
            Check::Email,
            format!("Invalid email address: {}", mailbox),
            Some(refs::RFC822),
        );
    }
    if end != value.len() - 1 {
        cx.check(
            Check::AddressStyle,
            format!("Extra content after email address: {}", value),
            Some(refs::MAINTAINER),
        );
    }
    let name = &value[..begin];
    if name.trim().is_empty() {
        cx.check(
            Check::AddressStyle,
            format!("Missing name: {}", value),
            Some(refs::MAINTAINER),
        );
    } else if name.contains('.') {
        cx.check(
            Check::MaintainerNameFullStop,
            format!("Full stop in maintainer name: {}", name.trim()),
            Some(refs::MAINTAINER),
        );
    }
}

pub(super) fn multi_address(value: &str, cx: &mut Context) {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let last = parts.len() - 1;
    for (i, part) in parts.into_iter().enumerate() {
        if part.is_empty() {
            if i != last || i == 0 {
                cx.error("Empty address in list", Some(refs::MAINTAINER));
            }
            continue;
        }
        address(part, cx);
    }
}

pub(super) fn upstream_contact(value: &str, cx: &mut Context) {
    for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_url(line) {
            Ok(url) => check_url(&url, cx),
            Err(_) if line.contains('<') => address(line, cx),
            Err(_) => cx.check(
                Check::UpstreamContactStyle,
                format!("Upstream contact is neither an address nor a URL: {}", line),
                Some(refs::COPYRIGHT_UPSTREAM_CONTACT),
            ),
        }
    }
}

/// Check a list of architecture names, as used in Architecture fields and
/// architecture restrictions of relations.
fn architectures(declared: &[&str], cx: &mut Context) {
    if declared.iter().any(|a| a.starts_with('!')) {
        for arch in declared.iter().filter(|a| !a.starts_with('!')) {
            cx.check(
                Check::ArchInversion,
                format!("Mixed inverted and non-inverted architecture: {}", arch),
                Some(refs::RELATIONSHIPS),
            );
        }
    }
    for arch in declared.iter().map(|a| a.trim_start_matches('!')) {
        if arch == "any" || arch == "all" {
            continue;
        }
        if cx.enabled(Check::StrictArch) {
            let wildcard = arch.starts_with("any-") || arch.ends_with("-any");
            if wildcard && !tables::is_known_wildcard(arch) {
                cx.check(
                    Check::StrictArch,
                    format!("Unknown architecture wildcard: {}", arch),
                    Some(refs::ARCH_WILDCARD),
                );
            } else if !wildcard && !tables::is_known_architecture(arch) {
                cx.check(
                    Check::StrictArch,
                    format!("Unknown architecture: {}", arch),
                    Some(refs::ARCHITECTURE),
                );
            }
        } else if !ARCH_NAME.is_match(arch) {
            cx.error(
                format!("Invalid architecture name: {}", arch),
                Some(refs::ARCHITECTURE),
            );
        }
    }
}

pub(super) fn single_architecture(value: &str, cx: &mut Context) {
    let declared: Vec<&str> = value.split_whitespace().collect();
    let mut seen = HashSet::new();
    for arch in &declared {
        if !seen.insert(*arch) {
            cx.check(
                Check::DuplicateArchitecture,
                format!("Duplicate architecture: {}", arch),
                Some(refs::ARCHITECTURE),
            );
        }
    }

    match cx.control_type() {
        ControlType::SourcePackageControl => {
            if declared.len() > 1 && declared.iter().any(|a| *a == "all" || *a == "any") {
                cx.error(
                    format!("'all' and 'any' must be used alone: {}", value),
                    Some(refs::ARCHITECTURE),
                );
            } else {
                architectures(&declared, cx);
            }
        }
        ControlType::SourceControl => {
            if declared.contains(&"any") {
                if declared.iter().any(|a| *a != "any" && *a != "all") {
                    cx.error(
                        format!("'any' can only be combined with 'all': {}", value),
                        Some(refs::ARCHITECTURE),
                    );
                }
            } else {
                architectures(&declared, cx);
            }
        }
        ControlType::Changes => {
            let binary: Vec<&str> = declared.into_iter().filter(|a| *a != "source").collect();
            if binary.iter().any(|a| a.split('-').any(|part| part == "any")) {
                cx.error(
                    format!("Architecture wildcards are not allowed in .changes files: {}", value),
                    Some(refs::ARCHITECTURE),
                );
            } else {
                architectures(&binary, cx);
            }
        }
        _ => architectures(&declared, cx),
    }
}

pub(super) fn boolean(value: &str, cx: &mut Context) {
    if value != "yes" && value != "no" {
        cx.error(
            format!("Expected 'yes' or 'no': {}", value),
            Some(refs::ESSENTIAL),
        );
    }
}

pub(super) fn binary_list(value: &str, cx: &mut Context) {
    let names: Vec<&str> = match cx.control_type() {
        ControlType::Changes => value.split_whitespace().collect(),
        _ => value.split(',').map(str::trim).collect(),
    };
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            cx.error("Empty package name in list", Some(refs::BINARY));
            continue;
        }
        package_name(name, cx);
        if !seen.insert(name) {
            cx.check(
                Check::DuplicatePackages,
                format!("Duplicate package in list: {}", name),
                Some(refs::BINARY),
            );
        }
    }
}

pub(super) fn change_list(value: &str, cx: &mut Context) {
    leading_empty_line(value, "Changes", refs::CHANGES, cx);
}

fn has_illegal_escape(pattern: &str) -> bool {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' && !matches!(chars.next(), Some('\\' | '*' | '?')) {
            return true;
        }
    }
    false
}

pub(super) fn copyright_file_list(value: &str, cx: &mut Context) {
    for pattern in value.split_whitespace() {
        if has_illegal_escape(pattern) {
            cx.error(
                format!("Illegal escape sequence in file pattern: {}", pattern),
                Some(refs::COPYRIGHT_FILES),
            );
        }
    }
}

pub(super) fn copyright_format(value: &str, cx: &mut Context) {
    url(value, cx);
    if value != tables::COPYRIGHT_FORMAT {
        cx.check(
            Check::StrictCopyrightFormatVersion,
            format!("Unknown copyright format: {}", value),
            Some(refs::COPYRIGHT_FORMAT),
        );
    }
}

pub(super) fn copyright_source(value: &str, cx: &mut Context) {
    let single = match value.split_whitespace().collect::<Vec<_>>().as_slice() {
        [one] => parse_url(one).ok(),
        _ => None,
    };
    match single {
        Some(url) => check_url(&url, cx),
        None => cx.check(
            Check::CopyrightSourceStyle,
            "Source field is not a single URL address",
            Some(refs::COPYRIGHT_SOURCE),
        ),
    }
}

pub(super) fn date(value: &str, cx: &mut Context) {
    let Some(captures) = DATE.captures(value) else {
        cx.error(format!("Invalid date format: {}", value), Some(refs::DATE));
        return;
    };
    let offset_hours: u32 = captures[3].parse().unwrap_or(u32::MAX);
    let offset_minutes: u32 = captures[4].parse().unwrap_or(u32::MAX);
    if offset_hours >= 24 || offset_minutes >= 60 {
        cx.error(format!("Invalid time zone offset: {}", value), Some(refs::DATE));
        return;
    }
    match chrono::DateTime::parse_from_rfc2822(value) {
        Err(e) => cx.error(format!("Invalid date: {} ({})", value, e), Some(refs::DATE)),
        Ok(date) if date.with_timezone(&Utc) > Utc::now() => cx.check(
            Check::FutureDate,
            format!("Date is in the future: {}", value),
            Some(refs::DATE),
        ),
        Ok(_) => {}
    }
}

pub(super) fn dependency(value: &str, cx: &mut Context) {
    let relations: Vec<&str> = value.split([',', '|']).map(str::trim).collect();
    let last = relations.len() - 1;
    for (i, relation) in relations.into_iter().enumerate() {
        if relation.is_empty() {
            // a trailing comma is tolerated
            if i != last || i == 0 {
                cx.error("Empty package relation", Some(refs::RELATIONSHIPS));
            }
            continue;
        }
        package_relation(relation, cx);
    }
}

fn package_relation(relation: &str, cx: &mut Context) {
    let name_end = relation
        .find(|c: char| matches!(c, '(' | '[' | '<') || c.is_whitespace())
        .unwrap_or(relation.len());
    let name = &relation[..name_end];
    // strip an architecture qualifier such as `:any`
    let name = name.split(':').next().unwrap_or_default();
    if !relation.starts_with("${") {
        package_name(name, cx);
    }

    if let Some(open) = relation.find('(') {
        match relation[open..].find(')') {
            Some(close) => version_restriction(relation[open + 1..open + close].trim(), cx),
            None => cx.error(
                format!("Incomplete version restriction: {}", relation),
                Some(refs::RELATIONSHIPS),
            ),
        }
    }
    if let Some(open) = relation.find('[') {
        match relation[open..].find(']') {
            Some(close) => {
                let declared: Vec<&str> = relation[open + 1..open + close].split_whitespace().collect();
                if declared.is_empty() {
                    cx.error(
                        format!("Empty architecture restriction: {}", relation),
                        Some(refs::RELATIONSHIPS),
                    );
                }
                architectures(&declared, cx);
            }
            None => cx.error(
                format!("Incomplete architecture restriction: {}", relation),
                Some(refs::RELATIONSHIPS),
            ),
        }
    }
}

fn version_restriction(restriction: &str, cx: &mut Context) {
    match RELATION_OPERATORS
        .iter()
        .find(|op| restriction.starts_with(*op))
    {
        Some(op) => version(restriction[op.len()..].trim(), cx),
        None => cx.error(
            format!("Invalid version relation: ({})", restriction),
            Some(refs::RELATIONSHIPS),
        ),
    }
}

pub(super) fn exact_dependency(value: &str, cx: &mut Context) {
    if ["<<", "<=", ">=", ">>"].iter().any(|op| value.contains(op)) {
        cx.error(
            format!("Only exact versions can be used: {}", value),
            Some(refs::RELATIONSHIPS),
        );
    }
    dependency(value, cx);
}

pub(super) fn description(value: &str, cx: &mut Context) {
    let mut lines = value.split('\n');
    if lines.next().unwrap_or_default().trim().is_empty() {
        cx.error("Missing synopsis in description", Some(refs::DESCRIPTION));
    }
    for line in lines {
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            if rest.starts_with('.') && rest != "." {
                cx.check(
                    Check::DescriptionReservedSyntax,
                    format!("Reserved syntax in description: {}", line),
                    Some(refs::DESCRIPTION),
                );
            }
        }
    }
}

pub(super) fn dgit(value: &str, cx: &mut Context) {
    let mut parts = value.split_whitespace();
    let hash = parts.next().unwrap_or_default();
    if !is_hex(hash, 40) {
        cx.error(format!("Invalid git commit hash: {}", hash), Some(refs::DGIT));
    }
    if parts.next().is_some() {
        cx.check(
            Check::DgitExtraData,
            format!("Extra data in Dgit field: {}", value),
            Some(refs::DGIT),
        );
    }
}

pub(super) fn distribution(value: &str, cx: &mut Context) {
    if value.split_whitespace().count() > 1 {
        cx.check(
            Check::MultipleDistributions,
            format!("More than one distribution: {}", value),
            Some(refs::DISTRIBUTION),
        );
    }
}

fn md5(value: &str, cx: &mut Context) {
    if !is_hex(value, 32) {
        cx.error(format!("Invalid MD5 checksum: {}", value), Some(refs::FILES));
    }
}

pub(super) fn file_list(value: &str, cx: &mut Context) {
    let columns = match cx.control_type() {
        ControlType::Changes => 5,
        _ => 3,
    };
    leading_empty_line(value, "Files", refs::FILES, cx);
    let mut seen = HashSet::new();
    for line in entries(value) {
        if !FILE_LIST_INDENT.is_match(line) {
            cx.check(
                Check::FileListIndent,
                format!("File list entries should be indented with a single space: {}", line),
                Some(refs::FILES),
            );
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != columns {
            cx.error(
                format!("Expected {} values in file list entry: {}", columns, line.trim()),
                Some(refs::FILES),
            );
            continue;
        }
        md5(parts[0], cx);
        size(parts[1], cx);
        if columns == 5 {
            let (area_section, file_priority) = (parts[2], parts[3]);
            if area_section == "byhand" {
                if file_priority != "-" {
                    cx.error(
                        format!("Files installed by hand must have priority '-': {}", line.trim()),
                        Some(refs::FILES),
                    );
                }
            } else {
                if area_section == "-" {
                    cx.check(
                        Check::MissingSectionOrPriority,
                        format!("Missing section in file list entry: {}", line.trim()),
                        Some(refs::FILES),
                    );
                } else {
                    section(area_section, cx);
                }
                if file_priority == "-" {
                    cx.check(
                        Check::MissingSectionOrPriority,
                        format!("Missing priority in file list entry: {}", line.trim()),
                        Some(refs::FILES),
                    );
                } else {
                    priority(file_priority, cx);
                }
            }
        }
        let name = parts[columns - 1];
        if !seen.insert(name) {
            cx.check(
                Check::DuplicateFiles,
                format!("Duplicate file in list: {}", name),
                Some(refs::FILES),
            );
        }
    }
}

pub(super) fn format_version(value: &str, cx: &mut Context) {
    let (syntax, known) = match cx.control_type() {
        ControlType::Changes => (
            CHANGES_FORMAT.is_match(value),
            value == tables::CHANGES_FORMAT,
        ),
        _ => (
            SOURCE_FORMAT.is_match(value),
            tables::SOURCE_FORMATS.contains(&value),
        ),
    };
    if !syntax {
        cx.error(format!("Invalid format version: {}", value), Some(refs::FORMAT));
    } else if !known {
        cx.check(
            Check::ExactFormatVersion,
            format!("Unknown format version: {}", value),
            Some(refs::FORMAT),
        );
    }
}

pub(super) fn git_vcs(value: &str, cx: &mut Context) {
    let (location, rest) = match value.split_once(' ') {
        Some((location, rest)) => (location, rest.trim()),
        None => (value, ""),
    };
    url(location, cx);
    if rest.is_empty() {
        cx.check(
            Check::VcsBranch,
            format!("No branch specified: {}", value),
            Some(refs::VCS),
        );
    } else if let Some(branch) = rest.strip_prefix("-b") {
        let mut params = branch.split_whitespace();
        if params.next().is_none() || !branch.starts_with(' ') {
            cx.error(
                format!("Incomplete branch definition: {}", value),
                Some(refs::VCS),
            );
        }
        if let Some(path) = params.next() {
            if !is_vcs_path(path) || params.next().is_some() {
                cx.error(format!("Invalid path: {}", value), Some(refs::VCS));
            }
        }
    } else if !is_vcs_path(rest) {
        cx.error(format!("Invalid data in Vcs-Git field: {}", value), Some(refs::VCS));
    }
}

fn is_vcs_path(path: &str) -> bool {
    path.len() > 2 && path.starts_with('[') && path.ends_with(']')
}

pub(super) fn mercurial_vcs(value: &str, cx: &mut Context) {
    let (location, rest) = match value.split_once(' ') {
        Some((location, rest)) => (location, rest.trim()),
        None => (value, ""),
    };
    url(location, cx);
    if rest.is_empty() {
        cx.check(
            Check::VcsBranch,
            format!("No branch specified: {}", value),
            Some(refs::VCS),
        );
    } else if rest.split_whitespace().count() != 2 || !rest.starts_with("-b ") {
        cx.error(format!("Invalid data in Vcs-Hg field: {}", value), Some(refs::VCS));
    }
}

pub(super) fn license(value: &str, cx: &mut Context) {
    let first = value.split('\n').next().unwrap_or_default().trim();
    if first.is_empty() {
        cx.error(
            "License must have a short name in the first line",
            Some(refs::COPYRIGHT_LICENSE),
        );
        return;
    }
    if !cx.enabled(Check::LicenseName) {
        return;
    }
    let names = first.replace(',', "");
    for name in LICENSE_SEPARATOR.split(&names).map(str::trim) {
        let words: Vec<&str> = name.split_whitespace().collect();
        match words.as_slice() {
            ["public-domain"] if value.trim() == first => cx.check(
                Check::LicenseName,
                "Licensing to public domain must be followed by an explanation",
                Some(refs::COPYRIGHT_SHORT_NAME),
            ),
            [_] => {}
            [_, "with", exception, "exception"] => {
                if !tables::LICENSE_EXCEPTIONS.contains(exception) {
                    cx.check(
                        Check::CustomLicenseException,
                        format!("Unknown license exception: {}", exception),
                        Some(refs::COPYRIGHT_SHORT_NAME),
                    );
                }
            }
            _ => cx.check(
                Check::LicenseName,
                format!("Invalid license name: {}", name),
                Some(refs::COPYRIGHT_SHORT_NAME),
            ),
        }
    }
}

pub(super) fn multi_arch(value: &str, cx: &mut Context) {
    if !tables::MULTI_ARCH.contains(&value) {
        cx.error(format!("Invalid Multi-Arch value: {}", value), Some(refs::MULTI_ARCH));
    }
}

pub(super) fn number_list(value: &str, cx: &mut Context) {
    let mut seen = HashSet::new();
    for number in value.split_whitespace() {
        match number.parse::<i64>() {
            Err(_) => cx.error(format!("Invalid bug number: {}", number), Some(refs::CLOSES)),
            Ok(_) if number.starts_with('+') => cx.error(
                format!("Bug numbers must be unsigned: {}", number),
                Some(refs::CLOSES),
            ),
            Ok(n) if n <= 0 => cx.error(
                format!("Bug numbers must be positive: {}", number),
                Some(refs::CLOSES),
            ),
            Ok(n) => {
                if !seen.insert(n) {
                    cx.check(
                        Check::DuplicateIssueNumbers,
                        format!("Duplicate bug number: {}", n),
                        Some(refs::CLOSES),
                    );
                }
            }
        }
    }
}

pub(super) fn package_list(value: &str, cx: &mut Context) {
    leading_empty_line(value, "Package-List", refs::PACKAGE_LIST, cx);
    let mut seen = HashSet::new();
    for line in entries(value) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            cx.error(
                format!("Expected at least 4 values in package list entry: {}", line.trim()),
                Some(refs::PACKAGE_LIST),
            );
            continue;
        }
        package_name(parts[0], cx);
        package_type(parts[1], cx);
        section(parts[2], cx);
        priority(parts[3], cx);
        if !seen.insert(parts[0]) {
            cx.check(
                Check::DuplicatePackages,
                format!("Duplicate package in list: {}", parts[0]),
                Some(refs::PACKAGE_LIST),
            );
        }
    }
}

pub(super) fn package_name(value: &str, cx: &mut Context) {
    if !PACKAGE_NAME.is_match(value) {
        cx.error(format!("Invalid package name: {}", value), Some(refs::PACKAGE));
    }
}

pub(super) fn package_type(value: &str, cx: &mut Context) {
    if !tables::PACKAGE_TYPES.contains(&value) {
        cx.check(
            Check::UnknownPackageType,
            format!("Unknown package type: {}", value),
            Some(refs::PACKAGE_TYPE),
        );
    } else if value == "deb" && cx.control_type() == ControlType::SourcePackageControl {
        cx.check(
            Check::RedundantPackageType,
            "Package type 'deb' is the default and can be omitted",
            Some(refs::PACKAGE_TYPE),
        );
    }
}

pub(super) fn priority(value: &str, cx: &mut Context) {
    if value == "extra" {
        cx.check(
            Check::ExtraPriority,
            "Priority 'extra' is deprecated; use 'optional' instead",
            Some(refs::PRIORITIES),
        );
    } else if !tables::PRIORITIES.contains(&value) {
        cx.check(
            Check::UnknownPriority,
            format!("Unknown priority: {}", value),
            Some(refs::PRIORITY),
        );
    }
}

pub(super) fn requires_root(value: &str, cx: &mut Context) {
    if value == "no" || value == "binary-targets" {
        return;
    }
    for keyword in value.split_whitespace() {
        if !REQUIRES_ROOT_KEYWORD.is_match(keyword) {
            cx.error(
                format!("Invalid Rules-Requires-Root keyword: {}", keyword),
                Some(refs::RULES_REQUIRES_ROOT),
            );
        }
    }
}

pub(super) fn section(value: &str, cx: &mut Context) {
    let name = match value.split_once('/') {
        Some((area, name)) => {
            if !tables::AREAS.contains(&area) {
                cx.error(format!("Unknown archive area: {}", area), Some(refs::SUBSECTIONS));
            }
            name
        }
        None => value,
    };
    if name == "debian-installer" {
        cx.check(
            Check::DebianInstallerSection,
            "The debian-installer section should not be used here",
            Some(refs::SUBSECTIONS),
        );
    } else if !tables::SECTIONS.contains(&name) {
        cx.check(
            Check::StrictSection,
            format!("Unknown section: {}", name),
            Some(refs::SECTION),
        );
    }
}

pub(super) fn checksums(value: &str, len: usize, cx: &mut Context) {
    leading_empty_line(value, "a checksum list", refs::CHECKSUMS, cx);
    for line in entries(value) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            cx.error(
                format!("Expected 3 values in checksum list entry: {}", line.trim()),
                Some(refs::CHECKSUMS),
            );
            continue;
        }
        if !is_hex(parts[0], len) {
            cx.error(format!("Invalid checksum: {}", parts[0]), Some(refs::CHECKSUMS));
        }
        size(parts[1], cx);
    }
}

pub(super) fn size(value: &str, cx: &mut Context) {
    if value.starts_with('+') {
        cx.error(format!("Size must be unsigned: {}", value), Some(refs::INSTALLED_SIZE));
    } else if value.parse::<u64>().is_err() {
        if value.parse::<i64>().is_ok() {
            cx.error(format!("Size cannot be negative: {}", value), Some(refs::INSTALLED_SIZE));
        } else {
            cx.error(format!("Invalid size: {}", value), Some(refs::INSTALLED_SIZE));
        }
    }
}

pub(super) fn source(value: &str, cx: &mut Context) {
    let Some((name, rest)) = value.split_once('(') else {
        package_name(value, cx);
        return;
    };
    package_name(name.trim_end(), cx);
    if matches!(
        cx.control_type(),
        ControlType::SourcePackageControl | ControlType::SourceControl
    ) {
        cx.error(
            format!("debian/control and .dsc files cannot have a version in their Source field: {}", value),
            Some(refs::SOURCE),
        );
    }
    match rest.strip_suffix(')') {
        Some(v) => version(v.trim(), cx),
        None => cx.error(
            format!("Incomplete version in Source field: {}", value),
            Some(refs::SOURCE),
        ),
    }
}

pub(super) fn standards_version(value: &str, cx: &mut Context) {
    let parts: Option<Vec<u32>> = value.split('.').map(|p| p.parse().ok()).collect();
    let mut parts = match parts {
        Some(parts) if (3..=4).contains(&parts.len()) => parts,
        _ => {
            cx.error(
                format!("Invalid Standards-Version: {}", value),
                Some(refs::STANDARDS_VERSION),
            );
            return;
        }
    };
    parts.resize(4, 0);
    if parts.as_slice() > tables::LATEST_STANDARDS_VERSION.as_slice() {
        cx.check(
            Check::StrictStandardsVersion,
            format!("Unknown Standards-Version: {}", value),
            Some(refs::STANDARDS_VERSION),
        );
    }
}

pub(super) fn urgency(value: &str, cx: &mut Context) {
    let (level, comment) = match value.split_once(' ') {
        Some((level, comment)) => (level, Some(comment.trim())),
        None => (value, None),
    };
    if !tables::URGENCIES.contains(&level.to_ascii_lowercase().as_str()) {
        cx.check(
            Check::CustomUrgencies,
            format!("Unknown urgency: {}", level),
            Some(refs::URGENCY),
        );
    }
    if let Some(comment) = comment {
        if !(comment.starts_with('(') && comment.ends_with(')')) {
            cx.check(
                Check::UrgencyDescriptionParentheses,
                format!("Urgency commentary should be in parentheses: {}", comment),
                Some(refs::URGENCY),
            );
        }
    }
}

fn parse_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if !tables::URL_SCHEMES.contains(&url.scheme()) {
        return Err(format!("unknown scheme '{}'", url.scheme()));
    }
    Ok(url)
}

fn check_url(url: &Url, cx: &mut Context) {
    if url.scheme() != "https" {
        cx.check(
            Check::UrlForceHttps,
            format!("URL does not use HTTPS: {}", url),
            None,
        );
    }
    if cx.enabled(Check::UrlExists) {
        let probed = cx.prober().probe(url);
        if let Err(reason) = probed {
            cx.check(
                Check::UrlExists,
                format!("URL is not reachable: {} ({})", url, reason),
                None,
            );
        }
    }
}

pub(super) fn url(value: &str, cx: &mut Context) {
    match parse_url(value) {
        Ok(url) => check_url(&url, cx),
        Err(reason) => cx.check(Check::Url, format!("Invalid URL: {} ({})", value, reason), None),
    }
}

pub(super) fn version(value: &str, cx: &mut Context) {
    if value.starts_with("${") {
        return;
    }
    let (epoch, rest) = match value.split_once(':') {
        Some((epoch, rest)) => (Some(epoch), rest),
        None => (None, value),
    };
    if let Some(epoch) = epoch {
        if epoch.starts_with(['+', '-']) {
            cx.check(
                Check::VersionStyle,
                format!("Epoch must not have a sign: {}", value),
                Some(refs::VERSION),
            );
        } else if epoch.parse::<u32>().is_err() {
            cx.check(
                Check::VersionStyle,
                format!("Epoch must be an unsigned integer: {}", value),
                Some(refs::VERSION),
            );
        }
    }
    let (upstream, revision) = match rest.rsplit_once('-') {
        Some((upstream, revision)) => (upstream, Some(revision)),
        None => (rest, None),
    };
    if !UPSTREAM_VERSION.is_match(upstream) {
        cx.check(
            Check::UpstreamVersionStyle,
            format!("Invalid upstream version: {}", upstream),
            Some(refs::VERSION),
        );
    }
    if let Some(revision) = revision {
        if !DEBIAN_REVISION.is_match(revision) {
            cx.check(
                Check::VersionStyle,
                format!("Invalid Debian revision: {}", revision),
                Some(refs::VERSION),
            );
        }
    }
}

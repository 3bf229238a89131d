//! Value tables from Debian Policy and the Debian archive.

/// Operating systems that may appear in `os-cpu` architectures and `os-any` wildcards.
pub const OPERATING_SYSTEMS: &[&str] = &[
    "linux",
    "kfreebsd",
    "knetbsd",
    "kopensolaris",
    "hurd",
    "darwin",
    "dragonflybsd",
    "freebsd",
    "netbsd",
    "openbsd",
    "aix",
    "solaris",
    "uclinux",
    "mint",
    "uclibc-linux",
    "musl-linux",
];

/// CPUs that may appear in `os-cpu` architectures and `any-cpu` wildcards.
pub const CPUS: &[&str] = &[
    "alpha",
    "amd64",
    "arc",
    "arm",
    "arm64",
    "arm64ilp32",
    "armeb",
    "armel",
    "armhf",
    "avr32",
    "hppa",
    "i386",
    "ia64",
    "loong64",
    "m32r",
    "m68k",
    "mips",
    "mips64",
    "mips64el",
    "mips64r6",
    "mips64r6el",
    "mipsel",
    "mipsn32",
    "mipsn32el",
    "mipsn32r6",
    "mipsn32r6el",
    "mipsr6",
    "mipsr6el",
    "nios2",
    "or1k",
    "powerpc",
    "powerpcel",
    "powerpcspe",
    "ppc64",
    "ppc64el",
    "riscv64",
    "s390",
    "s390x",
    "sh3",
    "sh3eb",
    "sh4",
    "sh4eb",
    "sparc",
    "sparc64",
    "tilegx",
    "x32",
];

/// Archive areas other than `main`, which is implied.
pub const AREAS: &[&str] = &["main", "contrib", "non-free", "non-free-firmware"];

/// Archive sections.
pub const SECTIONS: &[&str] = &[
    "admin",
    "cli-mono",
    "comm",
    "database",
    "debian-installer",
    "debug",
    "devel",
    "doc",
    "editors",
    "education",
    "electronics",
    "embedded",
    "fonts",
    "games",
    "gnome",
    "gnu-r",
    "gnustep",
    "graphics",
    "hamradio",
    "haskell",
    "httpd",
    "interpreters",
    "introspection",
    "java",
    "javascript",
    "kde",
    "kernel",
    "libdevel",
    "libs",
    "lisp",
    "localization",
    "mail",
    "math",
    "metapackages",
    "misc",
    "net",
    "news",
    "ocaml",
    "oldlibs",
    "otherosfs",
    "perl",
    "php",
    "python",
    "ruby",
    "rust",
    "science",
    "shells",
    "sound",
    "tasks",
    "tex",
    "text",
    "utils",
    "vcs",
    "video",
    "web",
    "x11",
    "xfce",
    "zope",
];

/// Package priorities.
pub const PRIORITIES: &[&str] = &["required", "important", "standard", "optional", "extra"];

/// Upload urgencies.
pub const URGENCIES: &[&str] = &["low", "medium", "high", "emergency", "critical"];

/// Package types.
pub const PACKAGE_TYPES: &[&str] = &["deb", "udeb"];

/// Values of the Multi-Arch field.
pub const MULTI_ARCH: &[&str] = &["no", "same", "foreign", "allowed"];

/// License exceptions defined by the copyright format.
pub const LICENSE_EXCEPTIONS: &[&str] = &["Font", "OpenSSL"];

/// Version control fields, excluding `Vcs-Browser`.
pub const VCS_FIELDS: &[&str] = &[
    "Vcs-Arch",
    "Vcs-Bzr",
    "Vcs-Cvs",
    "Vcs-Darcs",
    "Vcs-Git",
    "Vcs-Hg",
    "Vcs-Mtn",
    "Vcs-Svn",
];

/// URL schemes accepted in URL fields.
pub const URL_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "git", "git+ssh", "ssh", "svn", "svn+ssh", "bzr", "bzr+ssh",
    "cvs", "hg", "mtn", "darcs", "mailto", "file",
];

/// The latest Debian Policy version.
pub const LATEST_STANDARDS_VERSION: [u32; 4] = [4, 7, 2, 0];

/// The current machine-readable copyright format.
pub const COPYRIGHT_FORMAT: &str =
    "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

/// Source package formats understood by dpkg-source.
pub const SOURCE_FORMATS: &[&str] = &["1.0", "3.0 (native)", "3.0 (quilt)"];

/// The current .changes format.
pub const CHANGES_FORMAT: &str = "1.8";

/// Whether `arch` is a known architecture name.
pub fn is_known_architecture(arch: &str) -> bool {
    if CPUS.contains(&arch) {
        return true;
    }
    match arch.rsplit_once('-') {
        Some((os, cpu)) => OPERATING_SYSTEMS.contains(&os) && CPUS.contains(&cpu),
        None => false,
    }
}

/// Whether `wildcard` is a valid `os-any` or `any-cpu` wildcard.
pub fn is_known_wildcard(wildcard: &str) -> bool {
    if let Some(os) = wildcard.strip_suffix("-any") {
        OPERATING_SYSTEMS.contains(&os)
    } else if let Some(cpu) = wildcard.strip_prefix("any-") {
        CPUS.contains(&cpu)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architectures() {
        assert!(is_known_architecture("amd64"));
        assert!(is_known_architecture("kfreebsd-i386"));
        assert!(is_known_architecture("musl-linux-armhf"));
        assert!(is_known_architecture("hurd-i386"));
        assert!(!is_known_architecture("x85"));
        assert!(!is_known_architecture("windows-amd64"));
    }

    #[test]
    fn test_wildcards() {
        assert!(is_known_wildcard("linux-any"));
        assert!(is_known_wildcard("any-i386"));
        assert!(!is_known_wildcard("any-x85"));
        assert!(!is_known_wildcard("nonexistentos-any"));
        assert!(!is_known_wildcard("any"));
    }
}

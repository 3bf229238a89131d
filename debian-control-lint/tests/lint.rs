use debian_control_lint::{lint, Check, Configuration, ControlFile, ControlType, Error, Preset, Report};
use indoc::indoc;

fn config(preset: Preset, control_type: ControlType) -> Configuration {
    let mut config = preset.configuration();
    config.set_control_type(control_type);
    config
}

fn messages(report: &Report) -> Vec<&str> {
    report.violations().iter().map(|v| v.message.as_str()).collect()
}

fn spec_names(text: &str, config: &Configuration) -> Vec<&'static str> {
    let mut file = ControlFile::new(config);
    file.parse_str(text).unwrap();
    file.match_stanzas().unwrap();
    file.specs().iter().map(|s| s.name).collect()
}

const COPYRIGHT_HEADER: &str = indoc! {"
    Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/
    Upstream-Name: foo

"};

#[test]
fn test_clean_source_package_control() {
    let text = "Source: foo\nMaintainer: A <a@b.com>\nStandards-Version: 4.6.2\n\nPackage: foo\nArchitecture: any\nDescription: x\n y\n";
    let report = lint(text, &config(Preset::Normal, ControlType::SourcePackageControl)).unwrap();
    assert!(report.is_empty(), "{:?}", messages(&report));
}

#[test]
fn test_violations_do_not_stop_linting() {
    let text = indoc! {"
        Source: foo
        Maintainer: A <a@b.com>
        Standards-Version: 4.6.2
        Vcs-Git: https://salsa.debian.org/foo.git
        Vcs-Hg: https://hg.example.com/foo

        Package: foo
        Architecture: any
        Priority: extra
        Description: x
    "};
    let report = lint(text, &config(Preset::Normal, ControlType::SourcePackageControl)).unwrap();
    assert_eq!(report.count(Check::DuplicateVcs), 1);
    assert_eq!(report.count(Check::ExtraPriority), 1);
    let priority = report
        .violations()
        .iter()
        .find(|v| v.check == Some(Check::ExtraPriority))
        .unwrap();
    assert_eq!(priority.line, Some(9));
}

#[test]
fn test_generic_pattern_first_is_fine() {
    let text = format!(
        "{}{}",
        COPYRIGHT_HEADER,
        indoc! {"
            Files: src/*
            Copyright: 2024 A
            License: MIT
             Permission is hereby granted.

            Files: src/foo.c
            Copyright: 2024 B
            License: MIT
             Permission is hereby granted.
        "}
    );
    let report = lint(&text, &config(Preset::Normal, ControlType::Copyright)).unwrap();
    assert_eq!(report.count(Check::CopyrightFilePatternGenerality), 0);
}

#[test]
fn test_specific_pattern_first_is_reported() {
    let text = format!(
        "{}{}",
        COPYRIGHT_HEADER,
        indoc! {"
            Files: src/foo.c
            Copyright: 2024 A
            License: MIT
             Permission is hereby granted.

            Files: src/*
            Copyright: 2024 B
            License: MIT
             Permission is hereby granted.
        "}
    );
    let report = lint(&text, &config(Preset::Normal, ControlType::Copyright)).unwrap();
    assert_eq!(report.count(Check::CopyrightFilePatternGenerality), 1);
    assert_eq!(
        messages(&report),
        vec!["More generic patterns should precede specific ones: src/foo.c and src/*"]
    );

    let mut config = config(Preset::Normal, ControlType::Copyright);
    config.disable(Check::CopyrightFilePatternGenerality);
    assert!(lint(&text, &config).unwrap().is_empty());
}

#[test]
fn test_missing_mandatory_field_picks_another_spec() {
    let text = format!(
        "{}{}",
        COPYRIGHT_HEADER,
        indoc! {"
            Files: *
            Copyright: 2024 A
            License: GPL-2+

            Copyright: 2024 B
            License: GPL-2+
             This program is free software.
        "}
    );
    let config = config(Preset::Normal, ControlType::Copyright);
    assert_eq!(
        spec_names(&text, &config),
        vec!["header stanza", "file stanza", "stand-alone license stanza"]
    );
    let report = lint(&text, &config).unwrap();
    assert_eq!(report.count(Check::CustomFields), 0);
}

#[test]
fn test_missing_mandatory_field_falls_back_to_placeholder() {
    let text = indoc! {"
        Source: foo
        Maintainer: A <a@b.com>
        Standards-Version: 4.6.2

        Package: foo
        Description: no architecture
    "};
    let config = config(Preset::Normal, ControlType::SourcePackageControl);
    assert_eq!(spec_names(text, &config), vec!["general stanza", "blank stanza"]);
    let report = lint(text, &config).unwrap();
    assert_eq!(report.len(), 2);
    assert!(messages(&report)[0].starts_with("Cannot match stanza"));
    assert_eq!(messages(&report)[1], "Missing mandatory stanza: binary package stanza");
}

#[test]
fn test_public_domain_without_explanation() {
    let text = format!("{}Files: *\nCopyright: 2024 A\nLicense: public-domain\n", COPYRIGHT_HEADER);
    let report = lint(&text, &config(Preset::Exact, ControlType::Copyright)).unwrap();
    assert_eq!(report.count(Check::LicenseName), 1);

    let explained = format!("{} The author waives all rights.\n", text);
    let report = lint(&explained, &config(Preset::Exact, ControlType::Copyright)).unwrap();
    assert_eq!(report.count(Check::LicenseName), 0);
}

#[test]
fn test_free_form_upstream_fields() {
    let text = indoc! {"
        Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/
        Upstream-Name: GNU Hello
        Upstream-Contact:
         Jane Upstream <jane@example.com>
         https://www.gnu.org/software/hello/

        Files: *
        Copyright: 2024 A
        License: MIT
         Permission is hereby granted.
    "};
    let report = lint(text, &config(Preset::Normal, ControlType::Copyright)).unwrap();
    assert!(report.is_empty(), "{:?}", messages(&report));
}

#[test]
fn test_missing_file_stanza() {
    let report = lint(COPYRIGHT_HEADER, &config(Preset::Normal, ControlType::Copyright)).unwrap();
    assert_eq!(messages(&report), vec!["Missing mandatory stanza: file stanza"]);
}

#[test]
fn test_linting_is_deterministic() {
    let text = format!(
        "{}{}",
        COPYRIGHT_HEADER,
        indoc! {"
            Files: src/foo.c src/*
            Copyright: 2024 A
            License: MIT

            Files: *
            Copyright: 2024 B
            License: MIT
        "}
    );
    let config = config(Preset::Exact, ControlType::Copyright);
    let first = lint(&text, &config).unwrap();
    assert!(!first.is_empty());
    for _ in 0..3 {
        assert_eq!(lint(&text, &config).unwrap(), first);
    }
}

const DSC: &str = indoc! {"
    -----BEGIN PGP SIGNED MESSAGE-----
    Hash: SHA256

    Format: 3.0 (quilt)
    Source: foo
    Binary: foo
    Architecture: any
    Version: 1.0-1
    Maintainer: A <a@b.com>
    Standards-Version: 4.6.2
    Package-List:
     foo deb misc optional arch=any
    Checksums-Sha1:
     aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa 100 foo_1.0.orig.tar.xz
    Checksums-Sha256:
     aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa 100 foo_1.0.orig.tar.xz
     bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb 20 foo_1.0-1.debian.tar.xz
    Files:
     aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa 100 foo_1.0.orig.tar.xz
     bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb 20 foo_1.0-1.debian.tar.xz

    -----BEGIN PGP SIGNATURE-----

    iQIzBAEBCAAdFiEE
    -----END PGP SIGNATURE-----
"};

#[test]
fn test_signed_source_control() {
    let report = lint(DSC, &config(Preset::Normal, ControlType::SourceControl)).unwrap();
    let missing: Vec<_> = report
        .violations()
        .iter()
        .filter(|v| v.message.starts_with("File is not in the"))
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(
        missing[0].message,
        "File is not in the Checksums-Sha1 list: foo_1.0-1.debian.tar.xz"
    );
}

#[test]
fn test_broken_signature() {
    let config = config(Preset::Normal, ControlType::SourceControl);

    let unsigned = DSC.replace("-----BEGIN PGP SIGNATURE-----", "");
    assert!(matches!(lint(&unsigned, &config), Err(Error::MissingSignature)));

    let no_hash = DSC.replace("Hash: SHA256", "Digest: SHA256");
    assert!(matches!(lint(&no_hash, &config), Err(Error::UnrecognizedSignature)));

    let empty = "-----BEGIN PGP SIGNED MESSAGE-----\nHash: SHA256\n\n-----BEGIN PGP SIGNATURE-----\n";
    assert!(matches!(lint(empty, &config), Err(Error::SignatureOnly)));
}

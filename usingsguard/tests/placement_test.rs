//! Tests for the placement checker through the public API.
#![allow(clippy::unwrap_used)]

use usingsguard::cancel::CancellationToken;
use usingsguard::config::{resolve_target_file, ConfigOptions, ConfigSource};
use usingsguard::cst::parse_unit;
use usingsguard::rules::placement::{check, PlacementRule, PLACEMENT_RULE};
use usingsguard::rules::{Rule, ViolationRecord};
use std::path::Path;

const SAMPLE: &str = "using System;\nusing static System.Math;\nnamespace Test { class C { } }";

fn violations(name: &str, source: &str, options: &ConfigOptions) -> Vec<ViolationRecord> {
    let unit = parse_unit(Some(Path::new(name)), source).unwrap();
    check(&unit, options, &CancellationToken::new()).unwrap()
}

fn options(pairs: &[(&str, &str)]) -> ConfigOptions {
    pairs.iter().copied().collect()
}

#[test]
fn test_unit_without_imports_is_never_flagged() {
    let source = "namespace Test { class C { void M() { using var s = Open(); } } }";
    for name in ["Program.cs", "Usings.cs", ""] {
        assert!(violations(name, source, &ConfigOptions::default()).is_empty());
        assert!(violations(name, source, &options(&[("dotnet_usings_file_name", "A.cs")])).is_empty());
    }
}

#[test]
fn test_designated_file_is_not_flagged_in_any_case() {
    assert!(violations("Usings.cs", SAMPLE, &ConfigOptions::default()).is_empty());
    assert!(violations("usings.CS", SAMPLE, &ConfigOptions::default()).is_empty());
    assert!(violations("src/App/USINGS.cs", SAMPLE, &ConfigOptions::default()).is_empty());
}

#[test]
fn test_primary_key_wins_over_legacy_key() {
    let both = options(&[("dotnet_usings_file_name", "A.cs"), ("usings_file_name", "B.cs")]);
    let target = resolve_target_file(&both);
    assert_eq!(target.file_name, "A.cs");
    assert_eq!(target.source, ConfigSource::PrimaryKey);

    assert!(violations("A.cs", SAMPLE, &both).is_empty());
    assert_eq!(violations("B.cs", SAMPLE, &both).len(), 2);
}

#[test]
fn test_blank_primary_key_falls_back_to_legacy() {
    let blank = options(&[("dotnet_usings_file_name", "   "), ("usings_file_name", " B.cs ")]);
    let target = resolve_target_file(&blank);
    assert_eq!(target.file_name, "B.cs");
    assert_eq!(target.source, ConfigSource::LegacyKey);

    let found = violations("Program.cs", SAMPLE, &blank);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|v| v.target.file_name == "B.cs"));
}

#[test]
fn test_blank_keys_fall_back_to_default() {
    let blank = options(&[("dotnet_usings_file_name", ""), ("usings_file_name", "\t")]);
    assert_eq!(resolve_target_file(&blank).file_name, "Usings.cs");
    assert_eq!(resolve_target_file(&blank).source, ConfigSource::Default);
}

#[test]
fn test_sample_reports_two_diagnostics() {
    let found = violations("TestFile.cs", SAMPLE, &ConfigOptions::default());
    let diagnostics: Vec<_> = found.iter().map(|v| v.to_diagnostic(PLACEMENT_RULE)).collect();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[1].line, 2);
    for d in &diagnostics {
        assert_eq!(d.rule_id, "USINGS001");
        assert_eq!(d.severity, "warning");
        assert_eq!(d.message, "Move using statements to 'Usings.cs'");
        assert_eq!(d.file, Path::new("TestFile.cs"));
    }
}

#[test]
fn test_nested_directives_are_flagged_in_source_order() {
    let source = "using System;\nnamespace Outer\n{\n    using System.IO;\n    namespace Inner\n    {\n        using System.Text;\n    }\n}\n";
    let found = violations("Program.cs", source, &ConfigOptions::default());
    let lines: Vec<_> = found
        .iter()
        .map(|v| v.to_diagnostic(PLACEMENT_RULE).line)
        .collect();
    assert_eq!(lines, vec![1, 4, 7]);
}

#[test]
fn test_rule_trait_object() {
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(PlacementRule)];
    let unit = parse_unit(Some(Path::new("Program.cs")), SAMPLE).unwrap();
    let found = rules[0]
        .check(&unit, &ConfigOptions::default(), &CancellationToken::new())
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(rules[0].name(), "UsingsPlacement");
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let found = violations("TestFile.cs", SAMPLE, &ConfigOptions::default());
    let json = serde_json::to_value(found[0].to_diagnostic(PLACEMENT_RULE)).unwrap();
    assert_eq!(json["rule_id"], "USINGS001");
    assert_eq!(json["line"], 1);
    assert_eq!(json["end_col"], 14);
    assert_eq!(json["target_file"], "Usings.cs");
}

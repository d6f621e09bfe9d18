use crate::omp_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey, ErrorType};
use crate::omp_frontend::compiler_warnings::WarningKind;
use crate::omp_frontend::conversion_context::StorageValue;
use crate::omp_frontend::omp::DeclareTargetCaptureClause;
use crate::omp_frontend::string_interning::StringTable;
use crate::projects::fixture::{CaptureReport, ClauseResult, FixtureReport, lower_fixture};
use crate::projects::settings::{LoweringConfig, MissingObjectPolicy};

const HOST_PROGRAM: &str = r#"
[[scope]]
name = "main"

[[scope]]
name = "inner"
parent = "main"

[[symbol]]
name = "x"
scope = "main"

[[symbol]]
name = "arr"
scope = "main"

[[symbol]]
name = "i"
scope = "main"

[[symbol]]
name = "s"
scope = "main"

[[symbol]]
name = "field"
scope = "main"
kind = "component"

[[symbol]]
name = "x"
scope = "inner"
host = true

[[binding]]
symbol = "x"
scope = "main"
value = 1

[[binding]]
symbol = "arr"
scope = "main"
value = 2

[[binding]]
symbol = "field"
scope = "main"
value = 3

[[binding]]
symbol = "i"
scope = "main"
value = 4

[[directive]]
name = "target data"
scope = "inner"

[[directive.clause]]
name = "map"
objects = [
    { name = "x" },
    { element = { base = "arr", subscripts = ["i"] } },
    { component = { base = "s", field = "field" } },
    { designator = { element = { base = "arr", subscripts = ["1:4"] } } },
]

[[directive]]
name = "declare target"
scope = "main"

[[directive.clause]]
name = "to"
capture = "to"
objects = [{ name = "x" }, { designator = { name = "arr" } }, { element = { base = "arr", subscripts = ["1"] } }]

[[directive.clause]]
name = "link"
capture = "link"
objects = [{ name = "x" }]
"#;

fn lower(source: &str, config: &LoweringConfig) -> (Result<FixtureReport, ErrorType>, StringTable) {
    let mut string_table = StringTable::new();
    let result = lower_fixture(source, None, config, &mut string_table).map_err(|messages| {
        messages
            .errors
            .first()
            .map(|error| error.error_type)
            .unwrap_or(ErrorType::Compiler)
    });
    (result, string_table)
}

#[test]
fn fixture_lowers_operands_and_captures_in_source_order() {
    let (report, _) = lower(HOST_PROGRAM, &LoweringConfig::default());
    let report = report.expect("fixture should lower");

    assert_eq!(report.directives.len(), 2);
    assert!(report.warnings.is_empty());

    let target_data = &report.directives[0];
    assert_eq!(target_data.name, "target data");
    assert_eq!(
        target_data.clauses[0].result,
        ClauseResult::Operands(vec![
            StorageValue(1),
            StorageValue(2),
            StorageValue(3),
            StorageValue(2),
        ])
    );

    let declare_target = &report.directives[1];
    assert_eq!(
        declare_target.clauses[0].result,
        ClauseResult::Captures(vec![
            CaptureReport {
                clause: DeclareTargetCaptureClause::To,
                symbol: String::from("x"),
            },
            CaptureReport {
                clause: DeclareTargetCaptureClause::To,
                symbol: String::from("arr"),
            },
        ])
    );
    assert_eq!(
        declare_target.clauses[1].result,
        ClauseResult::Captures(vec![CaptureReport {
            clause: DeclareTargetCaptureClause::Link,
            symbol: String::from("x"),
        }])
    );
}

#[test]
fn fixture_report_serializes_to_json() {
    let (report, _) = lower(HOST_PROGRAM, &LoweringConfig::default());
    let report = report.expect("fixture should lower");

    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["directives"][0]["clauses"][0]["name"], "map");
    assert_eq!(
        json["directives"][0]["clauses"][0]["operands"],
        serde_json::json!([1, 2, 3, 2])
    );
    assert_eq!(
        json["directives"][1]["clauses"][0]["captures"][1],
        serde_json::json!({ "clause": "to", "symbol": "arr" })
    );
}

const UNBOUND_PROGRAM: &str = r#"
[[scope]]
name = "main"

[[symbol]]
name = "a"
scope = "main"

[[symbol]]
name = "c"
scope = "main"

[[binding]]
symbol = "a"
scope = "main"
value = 7

[[binding]]
symbol = "c"
scope = "main"
value = 8

[[directive]]
name = "parallel"
scope = "main"

[[directive.clause]]
name = "private"
objects = [
    { name = "a" },
    { substring = { base = "c", lower = 1, upper = 3 } },
    { name = "c" },
]
"#;

#[test]
fn unsupported_clause_items_fail_by_default() {
    let mut string_table = StringTable::new();
    let messages = lower_fixture(
        UNBOUND_PROGRAM,
        None,
        &LoweringConfig::default(),
        &mut string_table,
    )
    .expect_err("the substring should be rejected");

    let error = &messages.errors[0];
    assert_eq!(error.error_type, ErrorType::Lowering);
    assert!(error.msg.contains("c(1:3)"));
    assert_eq!(
        error.metadata.get(&ErrorMetaDataKey::ClauseName).map(String::as_str),
        Some("private")
    );

    // The substring is the second item of the objects array
    assert_eq!(error.location.start_pos.line_number, 30);
}

#[test]
fn unsupported_clause_items_are_skipped_with_a_warning_when_configured() {
    let config = LoweringConfig {
        missing_objects: MissingObjectPolicy::Skip,
        ..LoweringConfig::default()
    };
    let (report, _) = lower(UNBOUND_PROGRAM, &config);
    let report = report.expect("skip policy should not fail");

    assert_eq!(
        report.directives[0].clauses[0].result,
        ClauseResult::Operands(vec![StorageValue(7), StorageValue(8)])
    );
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].warning_kind, WarningKind::UnresolvedObject);
    assert_eq!(report.warnings[0].msg, "c(1:3)");
}

#[test]
fn host_association_without_outer_storage_is_missing_storage() {
    let source = r#"
[[scope]]
name = "main"

[[scope]]
name = "inner"
parent = "main"

[[symbol]]
name = "y"
scope = "main"

[[symbol]]
name = "y"
scope = "inner"
host = true

[[directive]]
name = "parallel"
scope = "inner"

[[directive.clause]]
name = "shared"
objects = [{ name = "y" }]
"#;

    let config = LoweringConfig {
        missing_objects: MissingObjectPolicy::Skip,
        ..LoweringConfig::default()
    };
    let (report, _) = lower(source, &config);
    let report = report.expect("skip policy should not fail");

    assert_eq!(
        report.directives[0].clauses[0].result,
        ClauseResult::Operands(Vec::new())
    );
    assert_eq!(report.warnings[0].warning_kind, WarningKind::MissingStorage);
}

#[test]
fn unknown_scopes_and_bindings_are_fixture_errors() {
    let unknown_scope = r#"
[[symbol]]
name = "a"
scope = "nowhere"
"#;
    let (result, _) = lower(unknown_scope, &LoweringConfig::default());
    assert_eq!(result.err(), Some(ErrorType::Fixture));

    let unknown_binding = r#"
[[scope]]
name = "main"

[[binding]]
symbol = "ghost"
scope = "main"
value = 1
"#;
    let (result, _) = lower(unknown_binding, &LoweringConfig::default());
    assert_eq!(result.err(), Some(ErrorType::Fixture));

    let (result, _) = lower("[[scope]]\nname = 3\n", &LoweringConfig::default());
    assert_eq!(result.err(), Some(ErrorType::Fixture));
}

#[test]
fn host_association_needs_an_enclosing_declaration() {
    let source = r#"
[[scope]]
name = "main"

[[scope]]
name = "inner"
parent = "main"

[[symbol]]
name = "z"
scope = "inner"
host = true
"#;
    let (result, _) = lower(source, &LoweringConfig::default());
    assert_eq!(result.err(), Some(ErrorType::Fixture));
}

const DECLARED_P: &str = r#"
[[scope]]
name = "main"

[[symbol]]
name = "p"
scope = "main"

[[binding]]
symbol = "p"
scope = "main"
value = 7
"#;

fn lower_error(source: &str) -> CompilerError {
    let mut string_table = StringTable::new();
    let messages = lower_fixture(source, None, &LoweringConfig::default(), &mut string_table)
        .expect_err("fixture should be rejected");
    messages.errors[0].clone()
}

#[test]
fn misspelled_fixture_keys_are_fixture_errors() {
    let misspelled_capture = format!(
        "{DECLARED_P}
[[directive]]
name = \"declare target\"
scope = \"main\"

[[directive.clause]]
name = \"to\"
captur = \"to\"
objects = [{{ name = \"p\" }}]
"
    );
    let error = lower_error(&misspelled_capture);
    assert_eq!(error.error_type, ErrorType::Fixture);
    assert!(error.msg.contains("captur"));

    let misspelled_host = "
[[scope]]
name = \"main\"

[[symbol]]
name = \"p\"
scope = \"main\"
hots = true
";
    assert_eq!(lower_error(misspelled_host).error_type, ErrorType::Fixture);
}

#[test]
fn redeclared_symbols_report_why_they_failed() {
    let source = format!(
        "{DECLARED_P}
[[symbol]]
name = \"p\"
scope = \"main\"
"
    );
    let error = lower_error(&source);
    assert_eq!(error.error_type, ErrorType::Fixture);
    assert!(error.msg.contains("'p' can't be declared in scope 'main'"));
    assert!(error.msg.contains("already declared"));
}

#[test]
fn subscripts_take_at_most_three_bounds() {
    let triplet = format!(
        "{DECLARED_P}
[[directive]]
name = \"target data\"
scope = \"main\"

[[directive.clause]]
name = \"map\"
objects = [{{ element = {{ base = \"p\", subscripts = [\"1:n:2\"] }} }}]
"
    );
    let (report, _) = lower(&triplet, &LoweringConfig::default());
    let report = report.expect("a full triplet is fine");
    assert_eq!(
        report.directives[0].clauses[0].result,
        ClauseResult::Operands(vec![StorageValue(7)])
    );

    let too_many = triplet.replace("1:n:2", "1:2:3:4");
    let error = lower_error(&too_many);
    assert_eq!(error.error_type, ErrorType::Fixture);
    assert!(error.msg.contains("1:2:3:4"));
    assert_eq!(error.location.start_pos.line_number, 19);
}

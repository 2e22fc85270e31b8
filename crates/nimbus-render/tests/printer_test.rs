use nimbus_render::{
    print_info, print_list, Format, Record, Summary, Value, ViewOptions,
};

fn render(format: Format, value: &Value, options: Option<&ViewOptions>) -> String {
    let mut out = Vec::new();
    print_info(&mut out, format, value, options).unwrap();
    String::from_utf8(out).unwrap()
}

fn app_record() -> Value {
    let units = Value::List(vec![
        Value::Record(
            Record::new("Unit")
                .field("ID", "unit1")
                .field("Status", "started"),
        ),
        Value::Record(
            Record::new("Unit")
                .field("ID", "unit2")
                .field("Status", "stopped"),
        ),
    ]);
    Value::Record(
        Record::new("App")
            .field("Name", "myapp")
            .field("Platform", "python")
            .field("Deploys", 7u64)
            .field("Units", units),
    )
}

#[test]
fn curated_summary_renders_the_documented_layout() {
    let summary = Summary::new()
        .field("Name", "myapp")
        .field("Deploys", 7u64)
        .detail(
            "Units",
            ["id", "status"],
            vec![
                vec!["unit1".to_string(), "started".to_string()],
                vec!["unit2".to_string(), "stopped".to_string()],
            ],
        );
    let out = render(Format::Table, &Value::custom(summary), None);
    assert_eq!(
        out,
        "Deploys:  7\n\
         Name:     myapp\n\
         \n\
         Units:\n\
         \x20\x20ID     STATUS\n\
         \x20\x20unit1  started\n\
         \x20\x20unit2  stopped\n"
    );
}

#[test]
fn allow_list_makes_the_deny_list_irrelevant() {
    let allow_only = ViewOptions::show_only(["Name", "Deploys"]);

    let mut with_noise = allow_only.clone();
    with_noise.hidden_fields = vec!["Name".to_string(), "Units".to_string()];

    let baseline = render(Format::Table, &app_record(), Some(&allow_only));
    let noisy = render(Format::Table, &app_record(), Some(&with_noise));
    assert_eq!(baseline, noisy);
    assert_eq!(baseline, "Deploys:  7\nName:     myapp\n");
}

#[test]
fn rendering_is_idempotent_across_all_formats() {
    for format in [Format::Table, Format::Json, Format::PrettyJson, Format::Yaml] {
        let first = render(format, &app_record(), None);
        let second = render(format, &app_record(), None);
        assert_eq!(first, second, "{format} output drifted");
        assert!(!first.is_empty());
    }
}

#[test]
fn yaml_route_emits_a_document() {
    let out = render(Format::Yaml, &app_record(), None);
    assert!(out.starts_with("Name: myapp\n"), "{out}");
    assert!(out.ends_with('\n'));
}

#[test]
fn list_of_maps_surfaces_a_not_implemented_error() {
    let rows = Value::from(serde_json::json!([{"k": 1}, {"k": 2}]));
    let mut out = Vec::new();
    let err = print_list(&mut out, Format::Table, &rows, None).unwrap_err();
    assert!(err.to_string().contains("not implemented"), "{err}");
    // A failed render leaves the sink untouched.
    assert!(out.is_empty());
}

#[test]
fn stream_passthrough_reaches_the_sink_unmodified() {
    let body = b"2026-08-25 web.1  GET /healthz 200\n".to_vec();
    let value = Value::stream(std::io::Cursor::new(body.clone()));
    let mut out = Vec::new();
    print_info(&mut out, Format::Table, &value, None).unwrap();
    assert_eq!(out, body);
}

#[test]
fn visibility_options_do_not_leak_into_structured_formats() {
    // Structured output is a machine API: the full value is always encoded.
    let options = ViewOptions::show_only(["Name"]);
    let out = render(Format::Json, &app_record(), Some(&options));
    assert!(out.contains("Platform"), "{out}");
}

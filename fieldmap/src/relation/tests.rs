//! Tests for relation parsing, provenance inference and overriding.

use super::*;
use crate::descriptor::Shape;
use crate::rule::RuleOrigin;
use rstest::{fixture, rstest};

fn field(name: &str, shape: Shape) -> FieldDescriptor {
    FieldDescriptor::new(name, shape)
}

fn optional_int() -> Shape {
    Shape::pointer(Shape::scalar("i64"))
}

#[fixture]
fn src_binding() -> SourceBinding {
    SourceBinding::new(
        "src",
        StructDescriptor::new(
            "Row",
            "crate::models",
            vec![
                field("Fields", optional_int()),
                field("Field", optional_int()),
            ],
        ),
        0,
    )
}

#[rstest]
#[case::plain("total: a.count", None, "total", "a.count")]
#[case::aliased("dst.total: a.count + b.extra", Some("dst"), "total", "a.count + b.extra")]
#[case::paths("total: i64::from(a.count)", None, "total", "i64::from(a.count)")]
#[case::padded("  dst . total :  a.count  ", Some("dst"), "total", "a.count")]
fn relations_split_on_the_lone_separator(
    #[case] raw: &str,
    #[case] alias: Option<&str>,
    #[case] dest_field: &str,
    #[case] expression: &str,
) {
    let relation = Relation::parse(raw).expect("relation parses");
    assert_eq!(relation.dest_alias.as_deref(), alias);
    assert_eq!(relation.dest_field, dest_field);
    assert_eq!(relation.expression, expression);
    assert_eq!(relation.raw, raw);
}

#[rstest]
#[case::no_separator("total a.count")]
#[case::two_separators("total: a.count: b")]
#[case::only_paths("total::a.count")]
#[case::empty_expression("total:   ")]
#[case::empty_target(": a.count")]
#[case::bad_field("dst.to tal: a.count")]
fn malformed_relations_are_rejected(#[case] raw: &str) {
    let err = Relation::parse(raw).expect_err("relation must be rejected");
    assert!(
        matches!(err, FieldmapError::MalformedRelation { ref relation, .. } if relation == raw),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[case::exact("src.Field")]
#[case::dereferenced("*src.Field")]
#[case::inside_call("int64(src.Field)")]
fn inference_picks_the_referenced_field(src_binding: SourceBinding, #[case] expression: &str) {
    let found = infer_provenance(expression, &[src_binding]).expect("provenance");
    assert_eq!(found.alias, "src");
    assert_eq!(found.field, "Field");
    assert!(found.is_pointer);
    assert!(!found.ambiguous);
}

#[rstest]
fn inference_reports_plain_fields(src_binding: SourceBinding) {
    let mut binding = src_binding;
    binding.descriptor.fields = vec![
        field("Fields", optional_int()),
        field("Field", Shape::scalar("bool")),
    ];
    let found = infer_provenance("src.Field", &[binding]).expect("provenance");
    assert_eq!(found.field, "Field");
    assert!(!found.is_pointer);
}

#[rstest]
fn inference_prefers_the_longest_field(src_binding: SourceBinding) {
    let found = infer_provenance("src.Fields.unwrap_or(0)", &[src_binding]).expect("provenance");
    assert_eq!(found.field, "Fields");
    assert!(!found.ambiguous);
}

#[rstest]
fn inference_without_alias_yields_nothing(src_binding: SourceBinding) {
    assert_eq!(infer_provenance("nul", &[src_binding]), None);
}

#[rstest]
fn several_fields_mark_the_inference_ambiguous(src_binding: SourceBinding) {
    let found = infer_provenance("src.Field.unwrap_or_default() + src.Fields.unwrap_or(1)", &[
        src_binding,
    ])
    .expect("provenance");
    assert_eq!(found.field, "Fields");
    assert!(found.ambiguous);
}

fn single_field_binding(
    alias: &str,
    type_name: &str,
    field_name: &str,
    shape: Shape,
    position: usize,
) -> SourceBinding {
    SourceBinding::new(
        alias,
        StructDescriptor::new(type_name, "crate::models", vec![field(field_name, shape)]),
        position,
    )
}

#[test]
fn aliases_inside_longer_aliases_are_not_references() {
    let sources = [
        single_field_binding("a", "A", "x", Shape::scalar("i64"), 0),
        single_field_binding("ab", "Ab", "x", optional_int(), 1),
    ];
    let found = infer_provenance("ab.x.unwrap_or(0)", &sources).expect("provenance");
    assert_eq!(found.alias, "ab");
    assert_eq!(found.field, "x");
    assert!(found.is_pointer);
    assert!(!found.ambiguous);
}

#[test]
fn first_alias_without_a_referenced_field_falls_through() {
    let sources = [
        single_field_binding("a", "A", "y", Shape::scalar("i64"), 0),
        single_field_binding("b", "B", "x", optional_int(), 1),
    ];
    let found = infer_provenance("b.x.unwrap_or(a.y)", &sources).expect("provenance");
    assert_eq!(found.alias, "a");
    assert!(found.ambiguous);

    let skipped = infer_provenance("a.len() + b.x.unwrap_or(0)", &sources).expect("provenance");
    assert_eq!(skipped.alias, "b");
    assert!(skipped.is_pointer);
    assert!(skipped.ambiguous);
}

#[test]
fn several_aliases_mark_the_inference_ambiguous() {
    let sources = [
        single_field_binding("b", "B", "y", Shape::scalar("i64"), 1),
        single_field_binding("a", "A", "x", Shape::scalar("i64"), 0),
    ];
    let mixed = infer_provenance("a.x + b.y", &sources).expect("provenance");
    assert_eq!(mixed.alias, "a");
    assert!(mixed.ambiguous);
}

#[rstest]
#[case::field_access("u.p.count")]
#[case::longer_identifier("up.count")]
#[case::raw_identifier("r#p")]
fn alias_references_need_identifier_boundaries(#[case] expression: &str) {
    assert!(!references_alias(expression, "p"));
    assert!(references_alias(&format!("{expression} + p.count"), "p"));
}

#[test]
fn relations_may_target_raw_identifiers() {
    let relation = Relation::parse("dst.r#type: a.kind").expect("relation parses");
    assert_eq!(relation.dest_field, "r#type");
    assert_eq!(relation.expression, "a.kind");
}

#[rstest]
fn explicit_guards_replace_inference(src_binding: SourceBinding) {
    let relation = Relation::parse("total: src.Fields.unwrap_or(0)")
        .expect("relation parses")
        .with_guard("src.Field");
    let found = relation
        .provenance(&[src_binding])
        .expect("guard resolves")
        .expect("provenance");
    assert_eq!(found.field, "Field");
    assert!(!found.ambiguous);
}

#[rstest]
fn unknown_guards_are_fatal(src_binding: SourceBinding) {
    let relation = Relation::parse("total: 1")
        .expect("relation parses")
        .with_guard("src.Missing");
    assert_eq!(
        relation.provenance(&[src_binding]),
        Err(FieldmapError::UnknownGuard {
            relation: "total: 1".to_owned(),
            guard: "src.Missing".to_owned(),
        })
    );
}

#[rstest]
fn relations_replace_rules_and_later_relations_win(src_binding: SourceBinding) {
    let destination = StructDescriptor::new(
        "Summary",
        "crate::dto",
        vec![field("Field", optional_int()), field("total", Shape::scalar("i64"))],
    );
    let automatic = crate::resolver::resolve(&destination, std::slice::from_ref(&src_binding));
    assert_eq!(automatic[0].origin, RuleOrigin::Automatic);

    let relations = [
        Relation::parse("Field: Some(42)").expect("parses"),
        Relation::parse("total: 1").expect("parses"),
        Relation::parse("dst.total: src.Field.unwrap_or_default()").expect("parses"),
    ];
    let rules = apply_relations(automatic, &relations, &destination, &[src_binding])
        .expect("relations apply");

    assert_eq!(rules[0].origin, RuleOrigin::Manual);
    assert_eq!(rules[0].expression.as_deref(), Some("Some(42)"));
    assert_eq!(rules[0].source_alias, None);
    assert!(!rules[0].source_is_pointer);

    assert_eq!(
        rules[1].expression.as_deref(),
        Some("src.Field.unwrap_or_default()")
    );
    assert_eq!(rules[1].guard().as_deref(), Some("src.Field"));
}

#[test]
fn expressions_without_known_aliases_carry_no_provenance() {
    let destination = StructDescriptor::new(
        "Summary",
        "crate::dto",
        vec![field("Total", Shape::scalar("i64"))],
    );
    let source = SourceBinding::new(
        "order",
        StructDescriptor::new("Order", "crate::order", vec![field("Count", optional_int())]),
        0,
    );
    let relations = [Relation::parse("Total: a.Count + b.Extra").expect("parses")];
    let rules = apply_relations(
        vec![FieldMappingRule::unmatched("Total")],
        &relations,
        &destination,
        &[source],
    )
    .expect("relations apply");
    assert!(rules[0].resolved);
    assert_eq!(rules[0].expression.as_deref(), Some("a.Count + b.Extra"));
    assert_eq!(rules[0].guard(), None);
}

#[rstest]
fn relations_for_unknown_fields_are_fatal(src_binding: SourceBinding) {
    let destination = StructDescriptor::new("Summary", "crate::dto", Vec::new());
    let relations = [Relation::parse("missing: 1").expect("parses")];
    let err = apply_relations(Vec::new(), &relations, &destination, &[src_binding])
        .expect_err("unknown target");
    assert!(matches!(err, FieldmapError::UnknownRelationTarget { ref field, .. } if field == "missing"));
}

#[rstest]
#[case("total", true)]
#[case("_hidden", true)]
#[case("r2d2", true)]
#[case("2fast", false)]
#[case("", false)]
#[case("a-b", false)]
#[case("r#type", true)]
#[case("r#", false)]
fn identifier_check(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_identifier(text), expected);
}

//! Decision-table tests for the compatibility matcher.

use super::*;
use rstest::rstest;

fn scalar(name: &str) -> Shape {
    Shape::scalar(name)
}

fn opt(inner: Shape) -> Shape {
    Shape::pointer(inner)
}

fn vec_of(inner: Shape) -> Shape {
    Shape::slice(inner)
}

#[rstest]
#[case::copy_scalar(scalar("i64"), "src.id")]
#[case::cloned_string(scalar("String"), "src.id.clone()")]
#[case::copy_option(opt(scalar("bool")), "src.id")]
#[case::cloned_vec(vec_of(scalar("u8")), "src.id.clone()")]
#[case::identical_map(
    Shape::map(scalar("String"), scalar("String")),
    "src.id.clone()"
)]
fn identical_shapes_pass_through(#[case] shape: Shape, #[case] expected: &str) {
    let conversion = match_shapes("src.id", &shape, &shape).expect("identical shapes match");
    assert_eq!(conversion.kind, ConversionKind::PassThrough);
    assert_eq!(conversion.expression, expected);
}

#[rstest]
#[case(scalar("i64"), "src.id.unwrap_or_default()")]
#[case(scalar("String"), "src.id.clone().unwrap_or_default()")]
#[case(scalar("Address"), "src.id.clone().unwrap_or_default()")]
fn optional_source_is_read_into_plain_destination(#[case] dest: Shape, #[case] expected: &str) {
    let source = opt(dest.clone());
    let conversion = match_shapes("src.id", &source, &dest).expect("dereference applies");
    assert_eq!(conversion.kind, ConversionKind::Dereference);
    assert_eq!(conversion.expression, expected);
}

#[rstest]
#[case(scalar("bool"), "Some(src.id)")]
#[case(scalar("String"), "Some(src.id.clone())")]
fn plain_source_is_wrapped_into_optional_destination(
    #[case] source: Shape,
    #[case] expected: &str,
) {
    let dest = opt(source.clone());
    let conversion = match_shapes("src.id", &source, &dest).expect("wrap applies");
    assert_eq!(conversion.kind, ConversionKind::Wrap);
    assert_eq!(conversion.expression, expected);
}

#[test]
fn pointer_rules_are_symmetric() {
    let plain = scalar("String");
    let optional = opt(plain.clone());
    let wrap = match_shapes("src.name", &plain, &optional).expect("wrap");
    let unwrap = match_shapes("src.name", &optional, &plain).expect("unwrap");
    assert_eq!(wrap.expression, "Some(src.name.clone())");
    assert_eq!(unwrap.expression, "src.name.clone().unwrap_or_default()");
}

#[rstest]
#[case::widen(scalar("i32"), scalar("i64"), ConversionKind::Cast, "src.n as i64")]
#[case::narrow(scalar("u64"), scalar("u8"), ConversionKind::Cast, "src.n as u8")]
#[case::float(scalar("f32"), scalar("f64"), ConversionKind::Cast, "src.n as f64")]
#[case::deref_cast(
    opt(scalar("i32")),
    scalar("i64"),
    ConversionKind::DereferenceCast,
    "src.n.unwrap_or_default() as i64"
)]
#[case::cast_wrap(
    scalar("usize"),
    opt(scalar("u32")),
    ConversionKind::CastWrap,
    "Some(src.n as u32)"
)]
#[case::pointer_cast(
    opt(scalar("i16")),
    opt(scalar("f64")),
    ConversionKind::PointerCast,
    "src.n.map(|value| value as f64)"
)]
fn numeric_rules_cast(
    #[case] source: Shape,
    #[case] dest: Shape,
    #[case] kind: ConversionKind,
    #[case] expected: &str,
) {
    let conversion = match_shapes("src.n", &source, &dest).expect("numeric conversion");
    assert_eq!(conversion.kind, kind);
    assert_eq!(conversion.expression, expected);
}

#[rstest]
#[case::value_to_value(scalar("i32"), scalar("i64"), "i32_arr_to_i64_arr")]
#[case::value_to_ptr(scalar("i32"), opt(scalar("i64")), "i32_arr_to_i64_ptr_arr")]
#[case::ptr_to_value(opt(scalar("f32")), scalar("f64"), "f32_ptr_arr_to_f64_arr")]
#[case::ptr_to_ptr(opt(scalar("u8")), opt(scalar("u32")), "u8_ptr_arr_to_u32_ptr_arr")]
#[case::same_type_wrap(scalar("String"), opt(scalar("String")), "string_arr_to_string_ptr_arr")]
fn compatible_vectors_use_elementwise_helpers(
    #[case] source_elem: Shape,
    #[case] dest_elem: Shape,
    #[case] helper_name: &str,
) {
    let conversion = match_shapes("src.items", &vec_of(source_elem), &vec_of(dest_elem))
        .expect("element-wise conversion");
    let helper = conversion.helper().expect("helper recorded");
    assert_eq!(helper.name(), helper_name);
    assert_eq!(conversion.expression, format!("{helper_name}(&src.items)"));
}

#[rstest]
#[case::string_to_number(scalar("String"), scalar("i64"))]
#[case::bool_to_number(scalar("bool"), scalar("u8"))]
#[case::named_types(scalar("Address"), scalar("Location"))]
#[case::optional_string_to_number(opt(scalar("String")), scalar("i64"))]
#[case::different_maps(
    Shape::map(scalar("String"), scalar("String")),
    Shape::map(scalar("String"), scalar("i64"))
)]
#[case::nested_vectors(vec_of(vec_of(scalar("i32"))), vec_of(vec_of(scalar("i64"))))]
#[case::incompatible_elements(vec_of(scalar("String")), vec_of(scalar("i64")))]
#[case::vector_to_scalar(vec_of(scalar("i64")), scalar("i64"))]
#[case::unsupported(
    Shape::Unsupported("(u8, u8)".to_owned()),
    Shape::Unsupported("(u8, u8)".to_owned())
)]
fn incompatible_shapes_are_not_possible(#[case] source: Shape, #[case] dest: Shape) {
    assert_eq!(match_shapes("src.x", &source, &dest), None);
}

#[test]
fn match_field_delegates_to_shapes() {
    let source = FieldDescriptor::new("id", scalar("i32"));
    let dest = FieldDescriptor::new("id", scalar("i64"));
    let conversion = match_field("a.id", &source, &dest).expect("cast");
    assert_eq!(conversion.expression, "a.id as i64");
    assert!(conversion.helper().is_none());
}

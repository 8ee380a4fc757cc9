use crate::resolve::NameResolver;

fn resolver() -> NameResolver {
    let mut resolver = NameResolver::new();
    resolver.set_package(Some("p"));
    resolver.register_import("q.R");
    resolver
}

#[test]
fn import_wins_over_implicit_package() {
    assert_eq!(resolver().resolve("R"), "q.R");
}

#[test]
fn unknown_names_fall_back_to_java_lang() {
    assert_eq!(resolver().resolve("Unknown"), "java.lang.Unknown");
    assert_eq!(resolver().resolve("String"), "java.lang.String");
}

#[test]
fn qualified_names_pass_through() {
    assert_eq!(resolver().resolve("java.util.List"), "java.util.List");
}

#[test]
fn top_level_types_get_the_package() {
    let mut resolver = resolver();
    assert_eq!(resolver.register_top_level("A"), "p.A");
    assert_eq!(resolver.resolve("A"), "p.A");

    let mut bare = NameResolver::new();
    assert_eq!(bare.register_top_level("A"), "A");
    assert_eq!(bare.package(), None);
}

#[test]
fn blank_package_is_no_package() {
    let mut resolver = NameResolver::new();
    resolver.set_package(Some("  "));
    assert_eq!(resolver.package(), None);
}

#[test]
fn nested_types_use_dollar_in_binary_form() {
    let mut resolver = resolver();
    let outer = resolver.register_top_level("Outer");
    let inner = resolver.register_nested(&outer, &outer, "Inner");
    let deepest = resolver.register_nested(&inner, "p.Outer$Inner", "Deepest");

    assert_eq!(inner, "p.Outer.Inner");
    assert_eq!(resolver.resolve_class("Inner"), "p.Outer$Inner");
    assert_eq!(deepest, "p.Outer.Inner.Deepest");
    assert_eq!(resolver.resolve_class("Deepest"), "p.Outer$Inner$Deepest");
    assert_eq!(resolver.binary("p.Outer.Inner"), "p.Outer$Inner");
}

#[test]
fn later_registrations_shadow_earlier_ones() {
    let mut resolver = resolver();
    let outer = resolver.register_top_level("Outer");
    resolver.register_nested(&outer, &outer, "R");
    assert_eq!(resolver.resolve("R"), "p.Outer.R");
}

#[test]
fn type_spellings_keep_primitives_and_dimensions() {
    let resolver = resolver();
    assert_eq!(resolver.resolve_type("int"), "int");
    assert_eq!(resolver.resolve_type("int[][]"), "int[][]");
    assert_eq!(resolver.resolve_type("R[]"), "q.R[]");
    assert_eq!(resolver.resolve_type("String..."), "java.lang.String[]");
    assert_eq!(resolver.resolve_type(" void "), "void");
}

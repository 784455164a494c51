use rtui_engine::{RenderKind, SourceBlock, build_hierarchy, compose, render};
use rtui_types::{ScoredMember, StoreValue, ValueTypeTag};

#[test]
fn test_dual_role_node_keeps_both_roles() {
    let root = build_hierarchy(["a", "a:b"], ":");
    let a = root.child("a").unwrap();

    assert_eq!(a.full_key(), Some("a"));
    assert_eq!(a.children().len(), 1);
    assert_eq!(a.child("b").unwrap().full_key(), Some("a:b"));
}

#[test]
fn test_root_children_sorted() {
    let root = build_hierarchy(["zeta:x", "alpha:y", "beta:z"], ":");
    let labels: Vec<&str> = root.children().map(|c| c.label()).collect();

    assert_eq!(labels, vec!["alpha", "beta", "zeta"]);
}

#[test]
fn test_string_json_is_pretty_printed() {
    let rendered = render(&StoreValue::text(r#"{"a":1}"#), &ValueTypeTag::String);

    assert_eq!(rendered.kind, RenderKind::Json);
    assert_eq!(rendered.text(), "{\n  \"a\": 1\n}");
}

#[test]
fn test_string_non_json_unchanged() {
    let rendered = render(&StoreValue::text("not json"), &ValueTypeTag::String);

    assert_eq!(rendered.kind, RenderKind::Plain);
    assert_eq!(rendered.text(), "not json");
}

#[test]
fn test_hash_lines() {
    let value = StoreValue::pairs([("name", "John"), ("email", "j@x.com")]);
    let rendered = render(&value, &ValueTypeTag::Hash);

    assert!(rendered.lines.contains(&"name: John".to_string()));
    assert!(rendered.lines.contains(&"email: j@x.com".to_string()));
}

#[test]
fn test_list_and_set_lines() {
    let value = StoreValue::items(["x", "y", "z"]);

    assert_eq!(render(&value, &ValueTypeTag::List).lines, vec!["x", "y", "z"]);

    let set = render(&value, &ValueTypeTag::Set).lines;
    for item in ["x", "y", "z"] {
        assert!(set.contains(&item.to_string()));
    }
}

#[test]
fn test_ordered_set_lines() {
    let value = StoreValue::scored([("m1", 1.0), ("m2", 2.0)]);

    assert_eq!(
        render(&value, &ValueTypeTag::OrderedSet).lines,
        vec!["m1: 1.0", "m2: 2.0"]
    );
}

#[test]
fn test_ordered_set_missing_score_is_visible_error() {
    let value = StoreValue::Scored(vec![ScoredMember::without_score("m1")]);
    let rendered = render(&value, &ValueTypeTag::OrderedSet);

    assert!(rendered.is_error());
    assert!(rendered.text().contains("m1"));
}

#[test]
fn test_empty_inputs() {
    assert_eq!(build_hierarchy(Vec::<String>::new(), ":").children().len(), 0);

    let rendered = render(&StoreValue::text(""), &ValueTypeTag::String);
    assert_eq!(rendered.kind, RenderKind::Plain);
    assert_eq!(rendered.text(), "");
}

#[test]
fn test_unknown_tag_falls_back_to_raw() {
    let rendered = render(
        &StoreValue::text("payload"),
        &ValueTypeTag::Unknown("stream".to_string()),
    );

    assert!(!rendered.matched_formatter());
    assert_eq!(rendered.text(), "payload");
}

#[test]
fn test_compose_splits_code_field() {
    let value = StoreValue::text(r#"{"name":"KeyTree","code":"fn main() {}\n"}"#);
    let view = compose("code:key_tree", &value, &ValueTypeTag::String);

    assert_eq!(view.title, "Data for code:key_tree");
    assert_eq!(view.primary.text(), "{\n  \"name\": \"KeyTree\"\n}");
    assert_eq!(view.source, SourceBlock::Code(vec!["fn main() {}".to_string()]));
}

#[test]
fn test_compose_without_code_field() {
    let view = compose("user:1000", &StoreValue::pairs([("name", "John")]), &ValueTypeTag::Hash);

    assert_eq!(view.primary.lines, vec!["name: John"]);
    assert!(view.source.is_empty());
}

#[test]
fn test_content_view_serializes() {
    let view = compose("k", &StoreValue::text("plain"), &ValueTypeTag::String);

    insta::assert_json_snapshot!(view, @r#"
    {
      "title": "Data for k",
      "primary": {
        "kind": "plain",
        "lines": [
          "plain"
        ]
      },
      "source": {
        "kind": "empty"
      }
    }
    "#);
}

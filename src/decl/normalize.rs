// Declaration tree normalization
//
// Filters a raw SourceKit tree down to the documented API surface and
// reshapes it into `DeclNode`s:
//
// - hidden (private/fileprivate) declarations are dropped with their subtree
// - internal declarations are dropped, except enum elements
// - declarations with nothing to show are dropped
// - `enum case` wrappers are replaced by the elements they contain
// - extensions with no surviving members are dropped

use crate::decl::kind::{Accessibility, DeclKind};
use crate::decl::raw::RawNode;
use crate::error::Result;
use serde::Serialize;

/// A declaration in the rendered documentation tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeclKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "doc.name", skip_serializing_if = "Option::is_none")]
    pub doc_name: Option<String>,
    #[serde(rename = "doc.comment", skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    /// Child declarations; always present, possibly empty
    pub substructure: Vec<DeclNode>,
}

impl DeclNode {
    /// True when the node has no descriptive field, ignoring children
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.name.is_none()
            && self.doc_name.is_none()
            && self.doc_comment.is_none()
            && self.parsed_declaration.is_none()
            && self.typename.is_none()
    }

    /// Display name, preferring the documented name
    pub fn title(&self) -> Option<&str> {
        self.doc_name.as_deref().or(self.name.as_deref())
    }
}

/// Normalize one level of siblings, recursing into their children
///
/// Returns `None` when nothing survives, so that callers can tell an
/// empty level apart from a populated one. An unknown kind code on any
/// visible declaration aborts with [`crate::Error::UnknownKind`].
pub fn normalize(nodes: &[RawNode]) -> Result<Option<Vec<DeclNode>>> {
    let mut normalized = Vec::new();

    for raw in nodes {
        let accessibility = raw.accessibility.as_deref().map(Accessibility::from_code);
        if accessibility.is_some_and(|access| !access.is_visible()) {
            continue;
        }

        let kind = raw.kind.as_deref().map(DeclKind::from_code).transpose()?;
        let is_enum_case = kind.is_some_and(DeclKind::is_enum_case);
        let is_enum_element = kind.is_some_and(DeclKind::is_enum_element);

        if accessibility == Some(Accessibility::Internal) && !is_enum_element {
            continue;
        }

        let mut node = DeclNode {
            kind,
            name: raw.name.clone(),
            doc_name: raw.doc_name.clone(),
            doc_comment: raw.doc_comment.clone(),
            parsed_declaration: raw.parsed_declaration.clone(),
            typename: raw.typename.clone(),
            substructure: Vec::new(),
        };
        // Checked before recursion: children never rescue an empty node.
        if node.is_empty() {
            continue;
        }

        let children = match raw.substructure.as_deref() {
            Some(children) => normalize(children)?,
            None => None,
        };

        match children {
            Some(children) if is_enum_case => {
                normalized.extend(children);
                continue;
            }
            Some(children) => node.substructure = children,
            None if kind == Some(DeclKind::Extension) => continue,
            None => {}
        }

        normalized.push(node);
    }

    if normalized.is_empty() {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::{json, Value};

    const PUBLIC: &str = "source.lang.swift.accessibility.public";
    const INTERNAL: &str = "source.lang.swift.accessibility.internal";
    const PRIVATE: &str = "source.lang.swift.accessibility.private";
    const FILEPRIVATE: &str = "source.lang.swift.accessibility.fileprivate";

    fn raw(value: Value) -> Vec<RawNode> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| RawNode::from_value(v).unwrap())
            .collect()
    }

    fn names(nodes: &[DeclNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_deref().unwrap()).collect()
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(normalize(&[]).unwrap(), None);
    }

    #[test]
    fn test_public_nodes_keep_order() {
        let nodes = raw(json!([
            { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.function.free", "key.name": "b()" },
            { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.class", "key.name": "A" },
            { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.var.global", "key.name": "c" }
        ]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert_eq!(names(&out), vec!["b()", "A", "c"]);
        assert_eq!(out[0].kind, Some(DeclKind::FreeFunction));
        assert!(out.iter().all(|n| n.substructure.is_empty()));
    }

    #[test]
    fn test_field_projection() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.kind": "source.lang.swift.decl.function.method.instance",
            "key.name": "run(_:)",
            "key.doc.name": "run",
            "key.doc.comment": "Runs it.",
            "key.parsed_declaration": "public func run(_ x: Int)",
            "key.typename": "(Int) -> ()",
            "key.offset": 10
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        let node = &out[0];
        assert_eq!(node.kind, Some(DeclKind::InstanceMethod));
        assert_eq!(node.doc_name.as_deref(), Some("run"));
        assert_eq!(node.doc_comment.as_deref(), Some("Runs it."));
        assert_eq!(node.parsed_declaration.as_deref(), Some("public func run(_ x: Int)"));
        assert_eq!(node.typename.as_deref(), Some("(Int) -> ()"));
        assert_eq!(node.title(), Some("run"));
    }

    #[test]
    fn test_hidden_nodes_drop_whole_subtree() {
        for access in [PRIVATE, FILEPRIVATE, "source.lang.swift.accessibility.open_ish"] {
            let nodes = raw(json!([
                {
                    "key.accessibility": access,
                    "key.kind": "source.lang.swift.decl.class",
                    "key.name": "Hidden",
                    "key.substructure": [
                        { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.var.instance", "key.name": "leak" }
                    ]
                },
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.class", "key.name": "Shown" }
            ]));

            let out = normalize(&nodes).unwrap().unwrap();
            assert_eq!(names(&out), vec!["Shown"]);
        }
    }

    #[test]
    fn test_hidden_nodes_skip_kind_translation() {
        let nodes = raw(json!([
            { "key.accessibility": PRIVATE, "key.kind": "source.lang.swift.decl.actor", "key.name": "A" }
        ]));
        assert_eq!(normalize(&nodes).unwrap(), None);
    }

    #[test]
    fn test_internal_nodes_dropped_even_with_children() {
        let nodes = raw(json!([{
            "key.accessibility": INTERNAL,
            "key.kind": "source.lang.swift.decl.struct",
            "key.name": "Helper",
            "key.substructure": [
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.var.instance", "key.name": "x" }
            ]
        }]));
        assert_eq!(normalize(&nodes).unwrap(), None);
    }

    #[test]
    fn test_internal_enum_elements_are_kept() {
        let nodes = raw(json!([{
            "key.accessibility": INTERNAL,
            "key.kind": "source.lang.swift.decl.enumelement",
            "key.name": "north"
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert_eq!(out[0].kind, Some(DeclKind::EnumElement));
    }

    #[test]
    fn test_enum_case_wrapper_is_flattened() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.kind": "source.lang.swift.decl.enum",
            "key.name": "Direction",
            "key.substructure": [
                {
                    "key.kind": "source.lang.swift.decl.enumcase",
                    "key.substructure": [
                        { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.enumelement", "key.name": "north" },
                        { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.enumelement", "key.name": "south" }
                    ]
                },
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.function.method.instance", "key.name": "flip()" },
                {
                    "key.kind": "source.lang.swift.decl.enumcase",
                    "key.substructure": [
                        { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.enumelement", "key.name": "east" }
                    ]
                }
            ]
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert_eq!(out.len(), 1);
        let members = &out[0].substructure;
        assert_eq!(names(members), vec!["north", "south", "flip()", "east"]);
        assert!(members.iter().all(|n| n.kind != Some(DeclKind::EnumCase)));
    }

    #[test]
    fn test_enum_case_wrapper_without_elements_stays() {
        let nodes = raw(json!([
            { "key.kind": "source.lang.swift.decl.enumcase", "key.substructure": [] }
        ]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert_eq!(out[0].kind, Some(DeclKind::EnumCase));
        assert!(out[0].substructure.is_empty());
    }

    #[test]
    fn test_empty_extension_is_dropped() {
        let nodes = raw(json!([
            {
                "key.kind": "source.lang.swift.decl.extension",
                "key.name": "String",
                "key.substructure": [
                    { "key.accessibility": INTERNAL, "key.kind": "source.lang.swift.decl.function.method.instance", "key.name": "helper()" }
                ]
            },
            { "key.kind": "source.lang.swift.decl.extension", "key.name": "Int" }
        ]));
        assert_eq!(normalize(&nodes).unwrap(), None);
    }

    #[test]
    fn test_extension_with_public_member_is_kept() {
        let nodes = raw(json!([{
            "key.kind": "source.lang.swift.decl.extension",
            "key.name": "String",
            "key.substructure": [
                { "key.accessibility": INTERNAL, "key.kind": "source.lang.swift.decl.function.method.instance", "key.name": "helper()" },
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.function.method.instance", "key.name": "shout()" }
            ]
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert_eq!(out[0].kind, Some(DeclKind::Extension));
        assert_eq!(names(&out[0].substructure), vec!["shout()"]);
    }

    #[test]
    fn test_filtered_children_become_explicit_empty_list() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.kind": "source.lang.swift.decl.class",
            "key.name": "Box",
            "key.substructure": [
                { "key.accessibility": PRIVATE, "key.kind": "source.lang.swift.decl.var.instance", "key.name": "secret" }
            ]
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        assert!(out[0].substructure.is_empty());
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["substructure"], json!([]));
    }

    #[test]
    fn test_node_without_fields_is_dropped_despite_children() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.substructure": [
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.var.instance", "key.name": "x" }
            ]
        }]));
        assert_eq!(normalize(&nodes).unwrap(), None);
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.kind": "source.lang.swift.decl.class",
            "key.name": "Outer",
            "key.substructure": [
                { "key.accessibility": PUBLIC, "key.kind": "source.lang.swift.decl.macro", "key.name": "m" }
            ]
        }]));

        let err = normalize(&nodes).unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref code) if code == "source.lang.swift.decl.macro"));
    }

    #[test]
    fn test_serialized_keys() {
        let nodes = raw(json!([{
            "key.accessibility": PUBLIC,
            "key.kind": "source.lang.swift.decl.var.static",
            "key.name": "shared",
            "key.doc.comment": "The shared instance."
        }]));

        let out = normalize(&nodes).unwrap().unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            json!([{
                "kind": "static var",
                "name": "shared",
                "doc.comment": "The shared instance.",
                "substructure": []
            }])
        );
    }
}

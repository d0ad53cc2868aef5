// Declaration kind and accessibility codes
//
// SourceKit reports every declaration with a fully qualified kind code
// such as `source.lang.swift.decl.function.method.instance`. The set we
// document is closed: anything else means the tool speaks a newer
// vocabulary than we do, and that is reported instead of guessed at.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

const ACCESSIBILITY_PREFIX: &str = "source.lang.swift.accessibility.";

/// A declaration category we know how to document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    InstanceVar,
    StaticVar,
    GlobalVar,
    ParameterVar,
    Class,
    Struct,
    Typealias,
    Protocol,
    Extension,
    InstanceMethod,
    StaticMethod,
    FreeFunction,
    Enum,
    /// Synthetic `case a, b` grouping around enum elements
    EnumCase,
    /// A single case value inside an [`DeclKind::EnumCase`]
    EnumElement,
}

impl DeclKind {
    /// Every kind, in declaration order
    pub const ALL: [DeclKind; 15] = [
        DeclKind::InstanceVar,
        DeclKind::StaticVar,
        DeclKind::GlobalVar,
        DeclKind::ParameterVar,
        DeclKind::Class,
        DeclKind::Struct,
        DeclKind::Typealias,
        DeclKind::Protocol,
        DeclKind::Extension,
        DeclKind::InstanceMethod,
        DeclKind::StaticMethod,
        DeclKind::FreeFunction,
        DeclKind::Enum,
        DeclKind::EnumCase,
        DeclKind::EnumElement,
    ];

    /// Translate a SourceKit kind code
    pub fn from_code(code: &str) -> Result<Self> {
        DeclKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| Error::UnknownKind(code.to_string()))
    }

    /// The SourceKit kind code for this kind
    pub fn code(self) -> &'static str {
        match self {
            DeclKind::InstanceVar => "source.lang.swift.decl.var.instance",
            DeclKind::StaticVar => "source.lang.swift.decl.var.static",
            DeclKind::GlobalVar => "source.lang.swift.decl.var.global",
            DeclKind::ParameterVar => "source.lang.swift.decl.var.parameter",
            DeclKind::Class => "source.lang.swift.decl.class",
            DeclKind::Struct => "source.lang.swift.decl.struct",
            DeclKind::Typealias => "source.lang.swift.decl.typealias",
            DeclKind::Protocol => "source.lang.swift.decl.protocol",
            DeclKind::Extension => "source.lang.swift.decl.extension",
            DeclKind::InstanceMethod => "source.lang.swift.decl.function.method.instance",
            DeclKind::StaticMethod => "source.lang.swift.decl.function.method.static",
            DeclKind::FreeFunction => "source.lang.swift.decl.function.free",
            DeclKind::Enum => "source.lang.swift.decl.enum",
            DeclKind::EnumCase => "source.lang.swift.decl.enumcase",
            DeclKind::EnumElement => "source.lang.swift.decl.enumelement",
        }
    }

    /// Human-readable label used in rendered output
    pub fn label(self) -> &'static str {
        match self {
            DeclKind::InstanceVar => "var",
            DeclKind::StaticVar => "static var",
            DeclKind::GlobalVar => "global var",
            DeclKind::ParameterVar => "var parameter",
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Typealias => "typealias",
            DeclKind::Protocol => "protocol",
            DeclKind::Extension => "extension",
            DeclKind::InstanceMethod => "method",
            DeclKind::StaticMethod => "static method",
            DeclKind::FreeFunction => "function",
            DeclKind::Enum => "enum",
            DeclKind::EnumCase => "enum case",
            DeclKind::EnumElement => "case",
        }
    }

    pub fn is_enum_case(self) -> bool {
        self == DeclKind::EnumCase
    }

    pub fn is_enum_element(self) -> bool {
        self == DeclKind::EnumElement
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DeclKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Declared visibility of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    /// private, fileprivate, or anything else outside the documented surface
    Hidden,
}

impl Accessibility {
    /// Decode an accessibility code, with or without the SourceKit prefix
    pub fn from_code(code: &str) -> Self {
        match code.strip_prefix(ACCESSIBILITY_PREFIX).unwrap_or(code) {
            "public" => Accessibility::Public,
            "internal" => Accessibility::Internal,
            _ => Accessibility::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Accessibility::Hidden
    }
}

// Per-project documentation records
//
// A project is one repository; its files are the source files that
// still have documented declarations after normalization.

use crate::decl::normalize::{normalize, DeclNode};
use crate::decl::raw::SourceFile;
use crate::error::Result;
use serde::Serialize;

/// Declarations documented for one source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub file: String,
    pub substructure: Vec<DeclNode>,
}

/// Documentation for one repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub name: String,
    pub files: Vec<FileRecord>,
}

impl ProjectRecord {
    /// Build a record for a repository, stripping any trailing separator from its name
    pub fn new(name: &str, files: Vec<FileRecord>) -> Self {
        Self {
            name: project_name(name).to_string(),
            files,
        }
    }

    /// Total number of documented declarations, at any depth
    pub fn declaration_count(&self) -> usize {
        fn count(nodes: &[DeclNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.substructure)).sum()
        }
        self.files.iter().map(|f| count(&f.substructure)).sum()
    }
}

/// Everything handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderContext {
    pub projects: Vec<ProjectRecord>,
}

/// Normalize every file reported for a module
///
/// Files without any surviving declaration are left out entirely rather
/// than listed with an empty substructure.
pub fn extract_files(sources: &[SourceFile]) -> Result<Vec<FileRecord>> {
    let mut files = Vec::new();

    for source in sources {
        let Some(substructure) = source.substructure.as_deref() else {
            continue;
        };

        if let Some(substructure) = normalize(substructure)? {
            files.push(FileRecord {
                file: source.path.clone(),
                substructure,
            });
        }
    }

    Ok(files)
}

/// Repository name without a trailing path separator
pub fn project_name(name: &str) -> &str {
    name.strip_suffix(std::path::MAIN_SEPARATOR)
        .or_else(|| name.strip_suffix('/'))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::kind::DeclKind;
    use crate::decl::raw::decode_module_docs;

    const TWO_FILES: &str = r#"[
        {
            "/repo/Sources/Lib/Public.swift": {
                "key.substructure": [
                    {
                        "key.accessibility": "source.lang.swift.accessibility.public",
                        "key.kind": "source.lang.swift.decl.function.free",
                        "key.name": "greet(_:)"
                    }
                ]
            }
        },
        {
            "/repo/Sources/Lib/Internal.swift": {
                "key.substructure": [
                    {
                        "key.accessibility": "source.lang.swift.accessibility.internal",
                        "key.kind": "source.lang.swift.decl.struct",
                        "key.name": "Cache"
                    },
                    {
                        "key.accessibility": "source.lang.swift.accessibility.internal",
                        "key.kind": "source.lang.swift.decl.function.free",
                        "key.name": "warm()"
                    }
                ]
            }
        }
    ]"#;

    #[test]
    fn test_extract_skips_fully_filtered_files() {
        let sources = decode_module_docs(TWO_FILES).unwrap();
        let files = extract_files(&sources).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file, "/repo/Sources/Lib/Public.swift");
        assert_eq!(files[0].substructure.len(), 1);
        assert_eq!(files[0].substructure[0].kind, Some(DeclKind::FreeFunction));
    }

    #[test]
    fn test_extract_skips_files_without_substructure() {
        let sources = vec![SourceFile {
            path: "/repo/Empty.swift".to_string(),
            substructure: None,
        }];
        assert!(extract_files(&sources).unwrap().is_empty());
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract_files(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_project_name_strips_trailing_separator() {
        assert_eq!(project_name("Perfect-HTTP/"), "Perfect-HTTP");
        assert_eq!(project_name("PerfectLib"), "PerfectLib");
        assert_eq!(project_name(""), "");
    }

    #[test]
    fn test_project_record() {
        let sources = decode_module_docs(TWO_FILES).unwrap();
        let project = ProjectRecord::new("Perfect-Net/", extract_files(&sources).unwrap());
        assert_eq!(project.name, "Perfect-Net");
        assert_eq!(project.declaration_count(), 1);
    }

    #[test]
    fn test_render_context_json_shape() {
        let context = RenderContext {
            projects: vec![ProjectRecord::new("Demo", vec![])],
        };
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json, serde_json::json!({ "projects": [ { "name": "Demo", "files": [] } ] }));
    }
}

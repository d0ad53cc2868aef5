// Declaration model: raw SourceKit trees in, documented API trees out

pub mod kind;
pub mod normalize;
pub mod project;
pub mod raw;

pub use kind::{Accessibility, DeclKind};
pub use normalize::{normalize, DeclNode};
pub use project::{extract_files, project_name, FileRecord, ProjectRecord, RenderContext};
pub use raw::{decode_module_docs, RawNode, SourceFile};

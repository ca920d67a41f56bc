//! Generates an ASCII representation of a directory tree.

use std::cmp::Ordering;
use std::io::{self, Write};

use super::FileRecord;

/// A node of the dry-run tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub record: Option<FileRecord>,
    pub children: Vec<TreeNode>,
    pub is_dir: bool,
}

impl TreeNode {
    /// An unnamed directory node used as the tree root.
    pub fn root() -> Self {
        Self::new("", true)
    }

    fn new(name: &str, is_dir: bool) -> Self {
        Self {
            name: name.to_string(),
            record: None,
            children: Vec::new(),
            is_dir,
        }
    }

    fn label(&self, show_reason: bool) -> String {
        let mut label = self.name.clone();

        match &self.record {
            Some(record) if record.is_dir => label.push('/'),
            Some(record) if !record.is_text && !record.excluded => {
                label.push_str(" (binary, will be skipped)")
            }
            Some(_) => {}
            None if self.is_dir => label.push('/'),
            None => {}
        }

        if show_reason {
            if let Some(reason) = self.record.as_ref().and_then(|r| r.reason.as_ref()) {
                label.push_str(&format!(" [{}: {}]", reason.category, reason.pattern));
            }
        }
        label
    }
}

/// A utility struct for building and rendering the dry-run tree.
///
/// This struct is stateless and provides methods as associated functions.
pub struct TreeGenerator;

impl TreeGenerator {
    /// Builds a sorted tree from a flat list of records.
    pub fn build(records: &[FileRecord]) -> TreeNode {
        let mut root = TreeNode::root();
        for record in records {
            Self::insert(&mut root, record);
        }
        Self::sort(&mut root);
        root
    }

    /// Inserts a record along its relative path, creating intermediate
    /// directory nodes as needed. The scan root itself (`"."`) is skipped.
    pub fn insert(root: &mut TreeNode, record: &FileRecord) {
        if record.rel_path == "." || record.rel_path.is_empty() {
            return;
        }

        let parts: Vec<&str> = record.rel_path.split('/').collect();
        let mut current = root;

        for (i, part) in parts.iter().enumerate() {
            let is_last = i == parts.len() - 1;

            let index = match current.children.iter().position(|c| c.name == *part) {
                Some(index) => index,
                None => {
                    current
                        .children
                        .push(TreeNode::new(part, !is_last || record.is_dir));
                    current.children.len() - 1
                }
            };

            let child = &mut current.children[index];
            if is_last {
                child.record = Some(record.clone());
                child.is_dir = record.is_dir;
            }
            current = child;
        }
    }

    /// Orders every level: directories first, then files, each group by name.
    pub fn sort(node: &mut TreeNode) {
        node.children.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        for child in &mut node.children {
            Self::sort(child);
        }
    }

    /// Writes the children of `root` with box-drawing connectors.
    pub fn write_tree<W: Write>(root: &TreeNode, show_reasons: bool, writer: &mut W) -> io::Result<()> {
        Self::write_children(&root.children, "  ", show_reasons, writer)
    }

    fn write_children<W: Write>(
        children: &[TreeNode],
        prefix: &str,
        show_reasons: bool,
        writer: &mut W,
    ) -> io::Result<()> {
        for (i, node) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };

            writeln!(writer, "{prefix}{connector}{}", node.label(show_reasons))?;

            if !node.children.is_empty() {
                let new_prefix = if is_last {
                    format!("{prefix}    ")
                } else {
                    format!("{prefix}│   ")
                };
                Self::write_children(&node.children, &new_prefix, show_reasons, writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::ExclusionReason;
    use std::path::PathBuf;

    fn file(rel: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/root").join(rel),
            rel_path: rel.to_string(),
            is_dir: false,
            is_text: true,
            excluded: false,
            reason: None,
        }
    }

    fn dir(rel: &str) -> FileRecord {
        FileRecord {
            is_dir: true,
            is_text: false,
            ..file(rel)
        }
    }

    fn render(root: &TreeNode, show_reasons: bool) -> String {
        let mut buffer = Vec::new();
        TreeGenerator::write_tree(root, show_reasons, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_insert_merges_shared_prefixes() {
        let tree = TreeGenerator::build(&[dir("src"), file("src/main.rs"), file("src/lib.rs")]);
        assert_eq!(names(&tree), vec!["src"]);
        assert_eq!(names(&tree.children[0]), vec!["lib.rs", "main.rs"]);
    }

    #[test]
    fn test_root_record_is_skipped() {
        let tree = TreeGenerator::build(&[dir("."), file("a.txt")]);
        assert_eq!(names(&tree), vec!["a.txt"]);
    }

    #[test]
    fn test_missing_parent_is_created_as_directory() {
        let tree = TreeGenerator::build(&[file("deep/nested/file.rs")]);
        let deep = &tree.children[0];
        assert!(deep.is_dir);
        assert!(deep.record.is_none());
        assert!(deep.children[0].is_dir);
        assert!(!deep.children[0].children[0].is_dir);
    }

    #[test]
    fn test_directories_sort_before_files() {
        let tree = TreeGenerator::build(&[
            file("zeta.rs"),
            file("alpha.rs"),
            dir("src"),
            dir("docs"),
            file("src/b.rs"),
            dir("src/a"),
        ]);
        assert_eq!(names(&tree), vec!["docs", "src", "alpha.rs", "zeta.rs"]);
        assert_eq!(names(&tree.children[1]), vec!["a", "b.rs"]);
    }

    #[test]
    fn test_render_connectors_and_annotations() {
        let binary = FileRecord {
            is_text: false,
            ..file("src/logo.png")
        };
        let tree = TreeGenerator::build(&[
            file("README.md"),
            dir("src"),
            binary,
            file("src/main.rs"),
        ]);

        let expected = concat!(
            "  ├── src/\n",
            "  │   ├── logo.png (binary, will be skipped)\n",
            "  │   └── main.rs\n",
            "  └── README.md\n",
        );
        assert_eq!(render(&tree, false), expected);
    }

    #[test]
    fn test_render_reasons_for_excluded_entries() {
        let excluded = |rel: &str, is_dir: bool, pattern: &str, category: &str| FileRecord {
            is_dir,
            is_text: false,
            excluded: true,
            reason: Some(ExclusionReason {
                pattern: pattern.to_string(),
                category: category.to_string(),
            }),
            ..file(rel)
        };
        let tree = TreeGenerator::build(&[
            excluded(".git", true, ".git", "Version Control"),
            excluded("a.log", false, "*.log", "Logs & Temporary"),
        ]);

        let expected = concat!(
            "  ├── .git/ [Version Control: .git]\n",
            "  └── a.log [Logs & Temporary: *.log]\n",
        );
        assert_eq!(render(&tree, true), expected);
    }

    #[test]
    fn test_last_directory_uses_blank_continuation() {
        let tree = TreeGenerator::build(&[file("a.txt"), file("z/y/x.txt")]);
        let expected = concat!(
            "  ├── z/\n",
            "  │   └── y/\n",
            "  │       └── x.txt\n",
            "  └── a.txt\n",
        );
        assert_eq!(render(&tree, false), expected);

        let tree = TreeGenerator::build(&[file("z/y/x.txt")]);
        let expected = concat!(
            "  └── z/\n",
            "      └── y/\n",
            "          └── x.txt\n",
        );
        assert_eq!(render(&tree, false), expected);
    }
}

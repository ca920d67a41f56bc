//! The built-in exclusion catalog.
//!
//! Categories are kept in a fixed order. That order matters: when a pattern
//! appears in more than one category, it is attributed to the first one.

use std::io::{self, Write};

use super::pattern::is_wildcard;

/// Category name reported for patterns that are not part of the catalog.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// A named group of exclusion patterns sharing a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub patterns: &'static [&'static str],
}

pub const EXCLUSION_CATEGORIES: &[ExclusionCategory] = &[
    ExclusionCategory {
        id: "vcs",
        name: "Version Control",
        description: "Version control systems and metadata",
        patterns: &[".git", ".svn", ".hg", ".bzr"],
    },
    ExclusionCategory {
        id: "deps",
        name: "Dependencies",
        description: "Package managers and dependency directories",
        patterns: &["node_modules", "vendor", "bower_components", ".pnpm-store"],
    },
    ExclusionCategory {
        id: "build",
        name: "Build Artifacts",
        description: "Compiled code and build outputs",
        patterns: &[
            "target", "build", "dist", "out", "bin", "obj", "*.o", "*.so", "*.dll", "*.exe",
        ],
    },
    ExclusionCategory {
        id: "go",
        name: "Go Specific",
        description: "Go language specific files",
        patterns: &["go.sum", "*.test", "coverage.out", "*.prof"],
    },
    ExclusionCategory {
        id: "js",
        name: "JavaScript/Node.js",
        description: "JavaScript and Node.js specific files",
        patterns: &["*.min.js", "*.min.css", ".nyc_output", "coverage"],
    },
    ExclusionCategory {
        id: "python",
        name: "Python",
        description: "Python specific files and directories",
        patterns: &[
            "__pycache__",
            "*.pyc",
            "*.pyo",
            "*.pyd",
            ".pytest_cache",
            ".coverage",
            ".tox",
            "*.egg-info",
            ".venv",
            "venv",
        ],
    },
    ExclusionCategory {
        id: "python-ds",
        name: "Python Data Science",
        description: "Python data science and machine learning files",
        patterns: &[
            ".ipynb_checkpoints",
            "*.pkl",
            "*.pickle",
            "*.h5",
            "*.hdf5",
            "*.joblib",
            ".mlruns",
            "mlruns",
            "wandb",
            ".neptune",
            "lightning_logs",
            "*.model",
            "*.weights",
        ],
    },
    ExclusionCategory {
        id: "java",
        name: "Java",
        description: "Java specific files and directories",
        patterns: &["*.class", "*.jar", "*.war", "*.ear", ".gradle", "gradle-wrapper.jar"],
    },
    ExclusionCategory {
        id: "c",
        name: "C/C++",
        description: "C and C++ specific files",
        patterns: &["*.o", "*.a", "*.lib", "*.obj", "*.pdb", "*.ilk", "*.exp"],
    },
    ExclusionCategory {
        id: "rust",
        name: "Rust",
        description: "Rust specific files and directories",
        patterns: &["Cargo.lock", "target"],
    },
    ExclusionCategory {
        id: "logs",
        name: "Logs & Temporary",
        description: "Log files and temporary data",
        patterns: &["*.log", "*.tmp", "*.temp", "*.cache", "*.swp", "*.swo", "*~"],
    },
    ExclusionCategory {
        id: "env",
        name: "Environment & Config",
        description: "Environment variables and sensitive configuration",
        patterns: &[".env*", "*.pem", "*.key", "*.crt", "*.p12", "secrets.json"],
    },
    ExclusionCategory {
        id: "ide",
        name: "IDE & Editors",
        description: "IDE and editor specific files",
        patterns: &[
            ".vscode",
            ".idea",
            "*.sublime-*",
            ".vim",
            ".emacs.d",
            ".DS_Store",
            "Thumbs.db",
        ],
    },
    ExclusionCategory {
        id: "docs",
        name: "Documentation",
        description: "Generated documentation",
        patterns: &["docs/_build", "site", "_site", ".jekyll-cache"],
    },
    ExclusionCategory {
        id: "typescript",
        name: "TypeScript",
        description: "TypeScript specific files and directories",
        patterns: &[
            "*.tsbuildinfo",
            "*.d.ts.map",
            "tsconfig.tsbuildinfo",
            ".tscache",
            "*.js.map",
            "*.jsx.map",
            "*.ts.map",
            "*.tsx.map",
        ],
    },
    ExclusionCategory {
        id: "php",
        name: "PHP",
        description: "PHP specific files and directories",
        patterns: &[
            "composer.lock",
            ".phpunit.result.cache",
            "*.phar",
            ".php_cs.cache",
            ".php-cs-fixer.cache",
            "phpunit.xml",
            "phpstan.neon",
            "psalm.xml",
        ],
    },
    ExclusionCategory {
        id: "latex",
        name: "LaTeX",
        description: "LaTeX document preparation system files",
        patterns: &[
            "*.aux",
            "*.bbl",
            "*.blg",
            "*.fdb_latexmk",
            "*.fls",
            "*.log",
            "*.out",
            "*.synctex.gz",
            "*.toc",
            "*.lof",
            "*.lot",
            "*.idx",
            "*.ind",
            "*.ilg",
            "*.nav",
            "*.snm",
            "*.vrb",
        ],
    },
    ExclusionCategory {
        id: "ruby",
        name: "Ruby",
        description: "Ruby specific files and directories",
        patterns: &[
            "Gemfile.lock",
            ".bundle",
            ".rspec",
            "coverage",
            "spec/reports",
            ".yardoc",
            "doc/",
            "*.gem",
        ],
    },
    ExclusionCategory {
        id: "swift",
        name: "Swift",
        description: "Swift and iOS development files",
        patterns: &[
            "*.xcworkspace",
            "*.xcuserdata",
            "*.xcscheme",
            "DerivedData",
            "build",
            "*.ipa",
            "*.dSYM",
            "Pods",
            "Podfile.lock",
            "*.swiftpm",
        ],
    },
    ExclusionCategory {
        id: "kotlin",
        name: "Kotlin",
        description: "Kotlin specific files",
        patterns: &["*.kt~", "*.kts~", ".kotlin"],
    },
];

/// All categories, in catalog order.
pub fn all_categories() -> &'static [ExclusionCategory] {
    EXCLUSION_CATEGORIES
}

/// Looks up a category by its ID.
pub fn find_category(id: &str) -> Option<&'static ExclusionCategory> {
    EXCLUSION_CATEGORIES.iter().find(|c| c.id == id)
}

/// Every pattern of every category, duplicates preserved.
pub fn all_patterns() -> Vec<String> {
    filtered_patterns::<&str>(&[])
}

/// Every pattern of every category whose ID is not in `disabled_ids`.
pub fn filtered_patterns<S: AsRef<str>>(disabled_ids: &[S]) -> Vec<String> {
    EXCLUSION_CATEGORIES
        .iter()
        .filter(|category| !disabled_ids.iter().any(|id| id.as_ref() == category.id))
        .flat_map(|category| category.patterns.iter().map(|p| p.to_string()))
        .collect()
}

/// Name of the first category that lists `pattern` verbatim, or `"Custom"`.
pub fn category_name_for_pattern(pattern: &str) -> &'static str {
    EXCLUSION_CATEGORIES
        .iter()
        .find(|category| category.patterns.iter().any(|p| *p == pattern))
        .map_or(CUSTOM_CATEGORY, |category| category.name)
}

/// Returns the subset of `ids` that are not catalog category IDs.
pub fn validate_category_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter()
        .map(|id| id.as_ref())
        .filter(|id| find_category(id).is_none())
        .map(str::to_string)
        .collect()
}

fn sorted_patterns(category: &ExclusionCategory) -> Vec<&'static str> {
    let mut patterns = category.patterns.to_vec();
    patterns.sort_unstable();
    patterns
}

/// Writes the full human-readable listing of every category.
pub fn write_exclusions<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Default Exclusions by Category")?;
    writeln!(writer, "==============================")?;

    for (i, category) in EXCLUSION_CATEGORIES.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }

        writeln!(writer, "ID: {} - {}", category.id, category.name)?;
        writeln!(writer, "Description: {}", category.description)?;
        writeln!(writer, "Patterns:")?;
        for pattern in sorted_patterns(category) {
            writeln!(writer, "  {pattern}")?;
        }
    }

    writeln!(writer, "\nSummary:")?;
    writeln!(writer, "  Total categories: {}", EXCLUSION_CATEGORIES.len())?;
    writeln!(writer, "  Total patterns: {}", all_patterns().len())?;

    writeln!(writer, "\nUsage:")?;
    writeln!(writer, "  --disable-category <id>     Disable a specific category")?;
    writeln!(writer, "  --disable-category go,vcs   Disable multiple categories")?;

    writeln!(writer, "\nExamples:")?;
    writeln!(
        writer,
        "  context-generator --disable-category go     # Include go.sum and Go test files"
    )?;
    writeln!(
        writer,
        "  context-generator --disable-category vcs    # Include .git directory contents"
    )?;
    writeln!(
        writer,
        "  context-generator --disable-category logs   # Include log files"
    )?;

    Ok(())
}

/// Writes every catalog pattern, wildcards first, then literals, each group sorted.
pub fn write_patterns_only<W: Write>(writer: &mut W) -> io::Result<()> {
    let (mut wildcards, mut literals): (Vec<&str>, Vec<&str>) = EXCLUSION_CATEGORIES
        .iter()
        .flat_map(|category| category.patterns.iter().copied())
        .partition(|pattern| is_wildcard(pattern));

    wildcards.sort_unstable();
    literals.sort_unstable();

    for pattern in wildcards.into_iter().chain(literals) {
        writeln!(writer, "{pattern}")?;
    }
    Ok(())
}

/// Writes the sorted patterns of one category.
///
/// Callers validate the ID first; an unknown ID produces a one-line notice.
pub fn write_category_exclusions<W: Write>(writer: &mut W, category_id: &str) -> io::Result<()> {
    match find_category(category_id) {
        Some(category) => {
            for pattern in sorted_patterns(category) {
                writeln!(writer, "{pattern}")?;
            }
        }
        None => writeln!(writer, "Category {category_id} not found")?,
    }
    Ok(())
}

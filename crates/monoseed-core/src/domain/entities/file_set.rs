//! The fixed whitelist of paths that make up the static template.
//!
//! Shared by the runtime copy (template root → project) and the offline
//! packager (reference workspace → template root).

use crate::domain::entities::common::RelativePath;

/// Whitelisted entries, in copy order.
const ENTRIES: &[&str] = &[
    "client",
    "server",
    ".vscode",
    "docker-compose.yml",
    "docker-compose.dev.yml",
    "env.example",
    "eslint.config.mjs",
    "jest.config.ts",
    "jest.preset.js",
    "nx.json",
    "package.json",
    "tsconfig.base.json",
    "tsconfig.json",
    "README.md",
];

/// Name of the ignore file synthesized into the packaged template.
pub const IGNORE_FILE: &str = ".gitignore";

/// Ignore rules for a distributable template. Broader than a single
/// project's own rules: lockfiles and editor state never ship.
pub const TEMPLATE_IGNORE: &str = r#"# Dependencies
node_modules/
package-lock.json

# Build outputs
dist/
build/
out/

# Environment variables
.env
.env.local
.env.development.local
.env.test.local
.env.production.local

# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Runtime data
pids
*.pid
*.seed
*.pid.lock

# Coverage directory used by tools like istanbul
coverage/
*.lcov

# nyc test coverage
.nyc_output

# Dependency directories
node_modules/
jspm_packages/

# Optional npm cache directory
.npm

# Optional eslint cache
.eslintcache

# Optional REPL history
.node_repl_history

# Output of 'npm pack'
*.tgz

# Yarn Integrity file
.yarn-integrity

# parcel-bundler cache
.cache
.parcel-cache

# Next.js build output
.next

# Nuxt.js build / generate output
.nuxt

# Storybook build outputs
.out
.storybook-out

# Temporary folders
tmp/
temp/

# Editor directories and files
.vscode/*
!.vscode/extensions.json
.idea
*.swp
*.swo
*~

# OS generated files
.DS_Store
.DS_Store?
._*
.Spotlight-V100
.Trashes
ehthumbs.db
Thumbs.db

# Nx
.nx/cache
.nx/workspace-data

# Test artifacts
test-output/
test-results/

# Docker
.dockerignore

# Database
*.sqlite
*.sqlite3
*.db
"#;

/// One `(source, target)` pair. Both sides are relative to their roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSetEntry {
    pub source: RelativePath,
    pub target: RelativePath,
}

/// Ordered list of template entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFileSet {
    entries: Vec<FileSetEntry>,
}

impl TemplateFileSet {
    /// The whitelist used when packaging from a reference workspace.
    ///
    /// The reference workspace's own ignore file is not part of it; the
    /// packager writes [`TEMPLATE_IGNORE`] instead.
    pub fn standard() -> Self {
        Self::from_paths(ENTRIES.iter().copied())
    }

    /// The entries copied out of a packaged template: the whitelist plus
    /// the synthesized ignore file.
    pub fn packaged() -> Self {
        Self::from_paths(ENTRIES.iter().copied().chain(std::iter::once(IGNORE_FILE)))
    }

    fn from_paths(paths: impl Iterator<Item = &'static str>) -> Self {
        Self {
            entries: paths
                .map(|p| FileSetEntry {
                    source: RelativePath::from_static(p),
                    target: RelativePath::from_static(p),
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[FileSetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_keeps_declared_order() {
        let set = TemplateFileSet::standard();
        let names: Vec<String> = set.entries().iter().map(|e| e.source.to_string()).collect();
        assert_eq!(names.first().map(String::as_str), Some("client"));
        assert_eq!(names.last().map(String::as_str), Some("README.md"));
        assert_eq!(set.len(), 14);
    }

    #[test]
    fn packaged_set_adds_ignore_file() {
        let set = TemplateFileSet::packaged();
        assert_eq!(set.len(), 15);
        assert_eq!(set.entries()[14].target.to_string(), IGNORE_FILE);
        assert!(!TemplateFileSet::standard()
            .entries()
            .iter()
            .any(|e| e.source.to_string() == IGNORE_FILE));
    }

    #[test]
    fn ignore_list_excludes_dependencies_and_nx_cache() {
        assert!(TEMPLATE_IGNORE.starts_with("# Dependencies\nnode_modules/\n"));
        assert!(TEMPLATE_IGNORE.contains("package-lock.json"));
        assert!(TEMPLATE_IGNORE.contains(".nx/cache"));
        assert!(TEMPLATE_IGNORE.contains("!.vscode/extensions.json"));
        assert!(TEMPLATE_IGNORE.ends_with("*.db\n"));
    }
}

//! Token Rewriter - applies rewrite rules to files under a root.
//!
//! Rules sharing a target are applied in declaration order to one read of
//! the file. A missing target is skipped; an unchanged file is never
//! written back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{RelativePath, RewriteRule},
    error::MonoseedResult,
};

/// What a rewrite pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Names of rules that changed something.
    pub rules_applied: Vec<&'static str>,
    /// Files written back.
    pub files_written: Vec<RelativePath>,
    /// Targets that did not exist.
    pub files_missing: Vec<RelativePath>,
}

impl RewriteReport {
    pub fn merge(&mut self, other: RewriteReport) {
        self.rules_applied.extend(other.rules_applied);
        self.files_written.extend(other.files_written);
        self.files_missing.extend(other.files_missing);
    }

    /// Whether the pass left every file as it was.
    pub fn is_noop(&self) -> bool {
        self.files_written.is_empty()
    }
}

pub struct TokenRewriter {
    filesystem: Arc<dyn Filesystem>,
}

impl TokenRewriter {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(root = %root.display(), rules = rules.len()))]
    pub fn apply(&self, root: &Path, rules: &[RewriteRule]) -> MonoseedResult<RewriteReport> {
        let mut report = RewriteReport::default();

        for (target, group) in group_by_target(rules) {
            let path = target.resolve(root);
            if !self.filesystem.exists(&path) {
                debug!(file = %target, "Rewrite target absent, skipping");
                report.files_missing.push(target.clone());
                continue;
            }

            let original = self.filesystem.read_file(&path)?;
            let mut content = original.clone();
            for rule in group {
                if let Some(next) = rule.apply(&content) {
                    debug!(rule = rule.name, file = %target, "Rule applied");
                    report.rules_applied.push(rule.name);
                    content = next;
                }
            }

            if content != original {
                self.filesystem.write_file(&path, &content)?;
                report.files_written.push(target.clone());
            }
        }

        Ok(report)
    }
}

/// Group rules by target, keeping first-seen target order and rule order.
fn group_by_target(rules: &[RewriteRule]) -> Vec<(&RelativePath, Vec<&RewriteRule>)> {
    let mut groups: Vec<(&RelativePath, Vec<&RewriteRule>)> = Vec::new();
    for rule in rules {
        match groups.iter_mut().find(|(t, _)| **t == rule.target) {
            Some((_, group)) => group.push(rule),
            None => groups.push((&rule.target, vec![rule])),
        }
    }
    groups
}

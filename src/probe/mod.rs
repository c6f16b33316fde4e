//! Heuristics for explicit Conventional Commits indications.
//!
//! A repository can advertise the convention without its history showing it
//! yet: commitlint configuration, commitizen tooling in package.json, git
//! hooks, or contributor documentation. The probe checks these surfaces and
//! records the result alongside the mined history. I/O failures inside a
//! check degrade to "no indication" rather than failing the repository.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

pub mod homepage;

pub use homepage::{check_homepage, default_client, ProbeError};

/// Keywords whose presence in documentation or a homepage indicates
/// Conventional Commits usage.
pub const CC_KEYWORDS: [&str; 10] = [
    "conventional commits",
    "conventional commit",
    "conventionalcommits.org",
    "conventional changelog",
    "commit message convention",
    "commit guidelines",
    "commitizen",
    "commitlint",
    "standard-version",
    "semantic-release",
];

/// package.json dependencies that imply the convention.
const CC_PACKAGES: [&str; 6] = [
    "commitizen",
    "cz-conventional-changelog",
    "@commitlint/cli",
    "@commitlint/config-conventional",
    "standard-version",
    "semantic-release",
];

/// Configuration files that imply the convention.
const CC_CONFIG_FILES: [&str; 7] = [
    "commitlint.config.js",
    ".commitlintrc",
    ".commitlintrc.js",
    ".commitlintrc.json",
    ".cz-config.js",
    ".czrc",
    ".versionrc",
];

/// Documentation files scanned for keywords.
const DOC_FILES: [&str; 3] = ["README.md", "CONTRIBUTING.md", "DEVELOPING.md"];

/// Checks whether any of the CC keywords occurs in the given text.
pub fn contains_cc_keyword(text: &str) -> bool {
    let folded = text.to_lowercase();
    CC_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
}

/// Runs every working-tree check against a checked-out repository root.
pub fn probe_working_tree(root: &Path) -> bool {
    check_package_json(root) || check_config_files(root) || check_git_hooks(root) || check_docs(root)
}

/// Looks for CC-related dependencies in package.json.
fn check_package_json(root: &Path) -> bool {
    let path = root.join("package.json");
    if !path.exists() {
        return false;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Failed to read {}: {err}", path.display());
            return false;
        }
    };

    let parsed: serde_json::Value = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Failed to parse {}: {err}", path.display());
            return false;
        }
    };

    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = parsed.get(section).and_then(|v| v.as_object()) {
            for package in CC_PACKAGES {
                if deps.contains_key(package) {
                    debug!("Found CC-related dependency in package.json: {package}");
                    return true;
                }
            }
        }
    }

    false
}

/// Looks for commitlint / commitizen configuration files.
fn check_config_files(root: &Path) -> bool {
    for config_file in CC_CONFIG_FILES {
        if root.join(config_file).exists() {
            debug!("Found CC configuration file: {config_file}");
            return true;
        }
    }
    false
}

/// Looks for git hooks that invoke commitlint or commitizen.
fn check_git_hooks(root: &Path) -> bool {
    let husky = root.join(".husky");
    if husky.is_dir() {
        if hooks_dir_mentions_cc(&husky, false) {
            return true;
        }
    } else {
        let git_hooks = root.join(".git").join("hooks");
        if git_hooks.is_dir() && hooks_dir_mentions_cc(&git_hooks, true) {
            return true;
        }
    }
    false
}

fn hooks_dir_mentions_cc(dir: &Path, skip_samples: bool) -> bool {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Failed to read hooks directory {}: {err}", dir.display());
            return false;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if skip_samples
            && path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("sample"))
        {
            continue;
        }

        if let Ok(content) = fs::read_to_string(&path) {
            if content.contains("commitlint") || content.contains("commitizen") {
                debug!("Found git hook with CC reference: {}", path.display());
                return true;
            }
        }
    }

    false
}

/// Scans the main documentation files for keywords.
fn check_docs(root: &Path) -> bool {
    for doc_file in DOC_FILES {
        let path = root.join(doc_file);
        if !path.exists() {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(content) if contains_cc_keyword(&content) => {
                debug!("Found CC keyword in {doc_file}");
                return true;
            }
            Ok(_) => {}
            Err(err) => warn!("Failed to read {}: {err}", path.display()),
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn keywords_match_case_insensitively() {
        assert!(contains_cc_keyword(
            "We follow the Conventional Commits specification."
        ));
        assert!(contains_cc_keyword("uses COMMITLINT in CI"));
        assert!(!contains_cc_keyword("we just write commit messages"));
    }

    #[test]
    fn empty_directory_has_no_indications() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(!probe_working_tree(dir.path()));
    }

    #[test]
    fn commitlint_dev_dependency_is_detected() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"@commitlint/cli": "^17.0.0"}}"#,
        )
        .expect("write");

        assert!(probe_working_tree(dir.path()));
    }

    #[test]
    fn unrelated_package_json_is_not_detected() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"react": "^18.0.0"}}"#,
        )
        .expect("write");

        assert!(!probe_working_tree(dir.path()));
    }

    #[test]
    fn malformed_package_json_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("package.json"), "{ not json").expect("write");

        assert!(!probe_working_tree(dir.path()));
    }

    #[test]
    fn config_file_is_detected() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(".commitlintrc.json"), "{}").expect("write");

        assert!(probe_working_tree(dir.path()));
    }

    #[test]
    fn husky_hook_is_detected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let husky = dir.path().join(".husky");
        fs::create_dir(&husky).expect("mkdir");
        fs::write(husky.join("commit-msg"), "npx --no -- commitlint --edit $1").expect("write");

        assert!(probe_working_tree(dir.path()));
    }

    #[test]
    fn sample_hooks_are_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let hooks = dir.path().join(".git").join("hooks");
        fs::create_dir_all(&hooks).expect("mkdir");
        fs::write(hooks.join("commit-msg.sample"), "commitlint something").expect("write");

        assert!(!probe_working_tree(dir.path()));
    }

    #[test]
    fn contributing_keyword_is_detected() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("CONTRIBUTING.md"),
            "Please follow the Commit Message Convention described below.",
        )
        .expect("write");

        assert!(probe_working_tree(dir.path()));
    }
}

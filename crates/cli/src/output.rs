//! Where and under what name a generated document is saved.

use docgen_core::AppResult;
use docgen_docs::{expand_home, extract_id, is_hosted};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const MAX_TITLE_CHARS: usize = 80;
const DOCS_ROOT_KEYWORD: &str = "docs";

static TITLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("Invalid title regex"));
static TITLE_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("Invalid title regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Destination for the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    LocalDirectory(PathBuf),
    HostedFolder(String),
    HostedDocumentRoot,
}

impl OutputTarget {
    /// Classify a location answer.
    ///
    /// Empty means the current directory and `docs` means the Google Docs
    /// root. Google links become a folder when they carry a folder ID.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();

        if location.is_empty() {
            return OutputTarget::LocalDirectory(PathBuf::from("."));
        }

        if location.eq_ignore_ascii_case(DOCS_ROOT_KEYWORD) {
            return OutputTarget::HostedDocumentRoot;
        }

        if is_hosted(location) {
            return match location.contains("/folders/").then(|| extract_id(location)) {
                Some(Some(id)) => OutputTarget::HostedFolder(id),
                _ => OutputTarget::HostedDocumentRoot,
            };
        }

        OutputTarget::LocalDirectory(expand_home(location))
    }

    pub fn is_hosted(&self) -> bool {
        !matches!(self, OutputTarget::LocalDirectory(_))
    }

    /// Folder link accepted by the plain-file upload; `root` is Drive's alias
    /// for My Drive.
    pub fn folder_url(&self) -> Option<String> {
        let id = match self {
            OutputTarget::HostedFolder(id) => id.as_str(),
            OutputTarget::HostedDocumentRoot => "root",
            OutputTarget::LocalDirectory(_) => return None,
        };
        Some(format!("https://drive.google.com/drive/folders/{}", id))
    }

    pub fn folder_id(&self) -> Option<&str> {
        match self {
            OutputTarget::HostedFolder(id) => Some(id),
            _ => None,
        }
    }
}

/// Title for the saved document.
///
/// Taken from the first level-1 heading with punctuation removed and
/// whitespace collapsed, at most 80 characters; otherwise
/// `Generated <Output Type>`.
pub fn derive_title(content: &str, output_type: &str) -> String {
    let from_heading = content
        .lines()
        .find_map(|line| TITLE_HEADING.captures(line.trim()))
        .map(|caps| {
            let stripped = TITLE_STRIP.replace_all(caps[1].trim(), "");
            let collapsed = WHITESPACE.replace_all(&stripped, " ");
            collapsed.trim().chars().take(MAX_TITLE_CHARS).collect::<String>()
        });

    match from_heading {
        Some(title) if !title.trim().is_empty() => title.trim_end().to_string(),
        _ => format!("Generated {}", title_case(output_type)),
    }
}

/// Capitalize the first letter of every alphabetic run, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Name of a hosted document.
pub fn document_name(title: &str) -> String {
    format!("{}-Generated", title)
}

/// Name of a saved Markdown file.
pub fn file_name(title: &str) -> String {
    format!("{}-Generated.md", title)
}

/// Write `content` to `<dir>/<title>-Generated.md`, creating `dir` if needed.
pub fn save_local(dir: &Path, title: &str, content: &str) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(title));
    std::fs::write(&path, content)?;
    tracing::info!("Saved {} bytes to {}", content.len(), path.display());
    Ok(path)
}

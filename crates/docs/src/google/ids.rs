use regex::Regex;
use std::sync::LazyLock;

static ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("Invalid id regex"),
        Regex::new(r"id=([A-Za-z0-9_-]+)").expect("Invalid id regex"),
        Regex::new(r"/folders/([A-Za-z0-9_-]+)").expect("Invalid id regex"),
    ]
});

/// File or folder ID from a Docs/Drive URL.
///
/// Rules are tried in order (`/d/<id>`, `id=<id>`, `/folders/<id>`) and the
/// first match wins.
pub fn extract_id(url: &str) -> Option<String> {
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url() {
        assert_eq!(
            extract_id("https://docs.google.com/document/d/ABC123/edit").as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn test_open_url() {
        assert_eq!(
            extract_id("https://drive.google.com/open?id=ABC123").as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn test_folder_url() {
        assert_eq!(
            extract_id("https://drive.google.com/drive/folders/1a_B-c?usp=sharing").as_deref(),
            Some("1a_B-c")
        );
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            extract_id("https://drive.google.com/file/d/FIRST/view?id=SECOND").as_deref(),
            Some("FIRST")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_id("https://drive.google.com/drive/my-drive"), None);
        assert_eq!(extract_id("notes.md"), None);
    }
}

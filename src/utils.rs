use chrono::Local;

/// Convert a URL or title fragment into a safe local filename.
///
/// Query strings and fragments are stripped first, then every character
/// outside ASCII letters, digits, periods, underscores and hyphens is
/// replaced with an underscore.
pub fn sanitize_filename(name: &str) -> String {
    let name = name.split('?').next().unwrap_or_default();
    let name = name.split('#').next().unwrap_or_default();

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the output directory name for a snapshot: a timestamp prefix
/// followed by the first 20 characters of the sanitized page title.
pub fn directory_name(title: &str) -> String {
    let stem: String = title.chars().take(20).collect();
    format!("{}_{}", timestamp(), sanitize_filename(&stem))
}

/// Current local time formatted for directory names.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_query_and_fragment() {
        assert_eq!(sanitize_filename("style.css?v=12#top"), "style.css");
        assert_eq!(sanitize_filename("photo.jpg#section"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_replaces_special_characters() {
        assert_eq!(sanitize_filename("a b/c:d.png"), "a_b_c_d.png");
        assert_eq!(sanitize_filename("héllo.gif"), "h_llo.gif");
        assert_eq!(sanitize_filename("safe_name-1.txt"), "safe_name-1.txt");
    }

    #[test]
    fn test_directory_name_truncates_title() {
        let name = directory_name("A very long page title that keeps going");
        // timestamp prefix is 15 characters plus the joining underscore
        let stem = &name[16..];
        assert_eq!(stem, "A_very_long_page_tit");
    }
}

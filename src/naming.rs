//! Turning remote titles into names that are safe to use as a single path component.

use clap::ValueEnum;
use inflector::Inflector;

const FALLBACK_NAME: &str = "untitled";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum NamingStyle {
    /// Keep the title as published, minus characters that are unsafe in paths
    #[default]
    Verbatim,
    /// snake_case the title, e.g. `Part One: Intro` becomes `part_one_intro`
    SnakeCase,
}

/// File or directory stem for `title` in the given style.
pub fn file_stem(title: &str, style: NamingStyle) -> String {
    let stem = match style {
        NamingStyle::Verbatim => sanitize(title),
        NamingStyle::SnakeCase => sanitize(title).to_snake_case(),
    };
    if stem.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        stem
    }
}

/// Replaces separators, reserved and control characters with `_`.
///
/// Leading/trailing whitespace and trailing dots are dropped, and the result can
/// never be `.` or `..`.
pub fn sanitize(title: &str) -> String {
    let replaced: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = replaced.trim_end_matches(['.', ' ']).trim_start();
    if cleaned.is_empty() {
        // only dots or whitespace: "." and ".." end up here
        return if replaced.is_empty() {
            String::new()
        } else {
            "_".to_string()
        };
    }
    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_titles() {
        assert_eq!(file_stem("Talk", NamingStyle::Verbatim), "Talk");
        assert_eq!(file_stem("Intro copy", NamingStyle::Verbatim), "Intro copy");
        assert_eq!(file_stem("Ünïcödé 日本", NamingStyle::Verbatim), "Ünïcödé 日本");
    }

    #[test]
    fn strips_trailing_newline() {
        assert_eq!(file_stem("Talk\n", NamingStyle::Verbatim), "Talk");
    }

    #[test]
    fn replaces_path_separators_and_reserved_characters() {
        assert_eq!(sanitize("AC/DC: Live"), "AC_DC_ Live");
        assert_eq!(sanitize(r#"a\b*c?"d<e>f|g"#), "a_b_c__d_e_f_g");
        assert_eq!(sanitize("tab\there"), "tab_here");
    }

    #[test]
    fn never_yields_relative_components() {
        assert_eq!(sanitize("."), "_");
        assert_eq!(sanitize(".."), "_");
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize("Ends with dots..."), "Ends with dots");
    }

    #[test]
    fn empty_titles_fall_back() {
        assert_eq!(file_stem("", NamingStyle::Verbatim), "untitled");
        assert_eq!(file_stem("   ", NamingStyle::SnakeCase), "untitled");
    }

    #[test]
    fn snake_case_style() {
        assert_eq!(file_stem("Part One: Intro", NamingStyle::SnakeCase), "part_one_intro");
        assert_eq!(file_stem("Body", NamingStyle::SnakeCase), "body");
    }
}

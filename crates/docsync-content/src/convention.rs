//! File naming convention for bilingual documentation units
//!
//! A unit written in the bilingual layout is named
//! `<doc|main|test>_<lang>[_<REGION>].<ext>`, for example `doc_zh_CN.go`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static BILINGUAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:doc|main|test)_([a-z]+(?:_[A-Z]+)?)\.[A-Za-z0-9]+$")
        .expect("Invalid bilingual name regex")
});

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Whether `path` names a bilingual documentation unit.
pub fn is_bilingual_name(path: &str) -> bool {
    BILINGUAL_NAME.is_match(file_name(path))
}

/// Language tag carried by a bilingual unit name, e.g. `zh_CN`.
pub fn lang_of(path: &str) -> Option<&str> {
    BILINGUAL_NAME
        .captures(file_name(path))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Canonical form of a language tag: lowercase language, uppercase
/// region. `None` when the tag is not `lang` or `lang_region` made of
/// ASCII letters.
pub fn normalize_lang(lang: &str) -> Option<String> {
    let lower = lang.to_ascii_lowercase();
    let mut parts = lower.split('_');
    let language = parts.next().filter(|l| !l.is_empty())?;
    let region = parts.next();
    if parts.next().is_some() {
        return None;
    }
    let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    if !valid(language) {
        return None;
    }
    match region {
        None => Some(language.to_string()),
        Some(region) if valid(region) => Some(format!("{language}_{}", region.to_ascii_uppercase())),
        Some(_) => None,
    }
}

/// File name of the bilingual unit for `lang`.
pub fn bilingual_name(lang: &str) -> Option<String> {
    normalize_lang(lang).map(|lang| format!("doc_{lang}.go"))
}

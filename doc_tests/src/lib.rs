//! Structure checks for the repository's markdown documents.
//!
//! Headers are matched with `^#{1,6} <text>`; a section runs until the next
//! header of the same or a higher level.

use regex::Regex;

/// A markdown header: its level (number of `#`) and trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub level: usize,
    pub text: String,
    pub line: usize,
}

pub fn headers(content: &str) -> Result<Vec<Header>, regex::Error> {
    let pattern = Regex::new(r"^(#{1,6})\s+(.+?)\s*$")?;
    Ok(content
        .lines()
        .enumerate()
        .filter_map(|(line, text)| {
            pattern.captures(text).map(|caps| Header {
                level: caps[1].len(),
                text: caps[2].to_string(),
                line,
            })
        })
        .collect())
}

pub fn section_exists(content: &str, section_name: &str) -> bool {
    headers(content)
        .map(|found| found.iter().any(|h| h.text == section_name))
        .unwrap_or(false)
}

/// Returns the named section including its header line, or an empty string.
pub fn extract_section(content: &str, section_name: &str) -> String {
    let Ok(found) = headers(content) else {
        return String::new();
    };
    let Some(start) = found.iter().position(|h| h.text == section_name) else {
        return String::new();
    };
    let level = found[start].level;
    let end = found[start + 1..]
        .iter()
        .find(|h| h.level <= level)
        .map(|h| h.line)
        .unwrap_or(usize::MAX);

    let mut section = String::new();
    for line in content
        .lines()
        .skip(found[start].line)
        .take(end.saturating_sub(found[start].line))
    {
        section.push_str(line);
        section.push('\n');
    }
    section
}

/// Direct child headers of a section, in order.
pub fn subsections(content: &str, section_name: &str) -> Vec<String> {
    let section = extract_section(content, section_name);
    let Ok(found) = headers(&section) else {
        return Vec::new();
    };
    let Some(parent) = found.first().map(|h| h.level) else {
        return Vec::new();
    };
    found
        .iter()
        .filter(|h| h.level == parent + 1)
        .map(|h| h.text.clone())
        .collect()
}

pub fn contains_all_keywords(content: &str, keywords: &[&str]) -> bool {
    let lowercase = content.to_lowercase();
    keywords
        .iter()
        .all(|keyword| lowercase.contains(&keyword.to_lowercase()))
}

pub fn extract_urls(content: &str) -> Result<Vec<String>, regex::Error> {
    let pattern = Regex::new(r"https?://[^\s\)]+")?;
    Ok(pattern
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Variant names cited as `` `Enum::Variant` `` for the given enum.
pub fn cited_variants(content: &str, enum_name: &str) -> Result<Vec<String>, regex::Error> {
    let pattern = Regex::new(&format!(r"`{}::(\w+)`", regex::escape(enum_name)))?;
    let mut variants: Vec<String> = pattern
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect();
    variants.sort();
    variants.dedup();
    Ok(variants)
}

/// Variant names declared as `Name = <code>,` inside a Rust source file.
pub fn declared_variants(source: &str) -> Result<Vec<String>, regex::Error> {
    let pattern = Regex::new(r"(?m)^\s*(\w+)\s*=\s*\d+,")?;
    Ok(pattern
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect())
}

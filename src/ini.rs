//! Sectioned key/value document
//!
//! Reads and writes the INI dialect used by profile files. The document keeps
//! section order, key order and comment lines, so rewriting a file only
//! touches the values that changed. Every read takes a default that is
//! returned when the section or key is missing or the value doesn't parse.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const LINE_ENDING: &str = "\r\n";

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Entry { key: String, value: String },
    /// Comment or unparsable line, kept verbatim
    Raw(String),
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
struct Section {
    name: String,
    lines: Vec<Line>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
        }
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Parser-side insert: later duplicates overwrite, new keys keep file order
    fn upsert_parsed(&mut self, key: &str, new_value: String) {
        for line in self.lines.iter_mut() {
            if let Line::Entry { key: k, value } = line
                && k == key
            {
                *value = new_value;
                return;
            }
        }
        self.lines.push(Line::Entry {
            key: key.to_string(),
            value: new_value,
        });
    }

    fn set(&mut self, key: &str, new_value: String) {
        for line in self.lines.iter_mut() {
            if let Line::Entry { key: k, value } = line
                && k == key
            {
                *value = new_value;
                return;
            }
        }

        // Keep trailing blank lines after the new entry so sections stay separated
        let insert_at = self
            .lines
            .iter()
            .rposition(|line| *line != Line::Blank)
            .map_or(0, |pos| pos + 1);
        self.lines.insert(
            insert_at,
            Line::Entry {
                key: key.to_string(),
                value: new_value,
            },
        );
    }
}

/// In-memory INI document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    /// Lines before the first section header
    preamble: Vec<Line>,
    sections: Vec<Section>,
}

impl IniDocument {
    /// Empty document; every read returns its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text. Never fails: lines that are neither headers,
    /// entries nor comments are preserved as-is and otherwise ignored.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for raw in text.lines() {
            let trimmed = raw.trim();

            let line = if trimmed.is_empty() {
                Line::Blank
            } else if trimmed.starts_with(';') || trimmed.starts_with('#') {
                Line::Raw(raw.to_string())
            } else if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                // Repeated headers merge into the first occurrence
                let name = name.trim();
                current = Some(doc.section_index(name).unwrap_or_else(|| {
                    doc.sections.push(Section::new(name));
                    doc.sections.len() - 1
                }));
                continue;
            } else if let Some((key, value)) = trimmed.split_once('=') {
                let key = key.trim();
                let value = value.trim().to_string();
                match current {
                    Some(idx) => {
                        doc.sections[idx].upsert_parsed(key, value);
                        continue;
                    }
                    None => Line::Entry {
                        key: key.to_string(),
                        value,
                    },
                }
            } else {
                Line::Raw(raw.to_string())
            };

            match current {
                Some(idx) => doc.sections[idx].lines.push(line),
                None => doc.preamble.push(line),
            }
        }

        doc
    }

    /// Load a document from disk. A missing file yields an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Self::parse(&contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read INI file {}", path.display())),
        }
    }

    /// Write the document, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, self.to_string())
            .with_context(|| format!("Failed to write INI file {}", path.display()))
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let idx = match self.section_index(name) {
            Some(idx) => idx,
            None => {
                if let Some(last) = self.sections.last_mut()
                    && last.lines.last() != Some(&Line::Blank)
                {
                    last.lines.push(Line::Blank);
                }
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub fn section_exists(&self, section: &str) -> bool {
        self.section_index(section).is_some()
    }

    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.value(section, key).is_some()
    }

    /// Section names in document order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Raw value of a key, if present
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.value(key))
    }

    pub fn read_string(&self, section: &str, key: &str, default: &str) -> String {
        self.value(section, key).unwrap_or(default).to_string()
    }

    /// Read an integer (decimal or `0x` hex). Out-of-range or malformed values
    /// yield `default`.
    pub fn read_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.value(section, key)
            .and_then(parse_int)
            .unwrap_or(default)
    }

    pub fn read_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.value(section, key)
            .and_then(parse_bool)
            .unwrap_or(default)
    }

    pub fn write_string(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section).set(key, value.to_string());
    }

    pub fn write_int(&mut self, section: &str, key: &str, value: i32) {
        self.section_mut(section).set(key, value.to_string());
    }

    pub fn write_bool(&mut self, section: &str, key: &str, value: bool) {
        let text = if value { "true" } else { "false" };
        self.section_mut(section).set(key, text.to_string());
    }

    /// Remove a whole section. Returns whether it existed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        match self.section_index(section) {
            Some(idx) => {
                self.sections.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_line(f: &mut fmt::Formatter<'_>, line: &Line) -> fmt::Result {
            match line {
                Line::Entry { key, value } => write!(f, "{key}={value}{LINE_ENDING}"),
                Line::Raw(text) => write!(f, "{text}{LINE_ENDING}"),
                Line::Blank => f.write_str(LINE_ENDING),
            }
        }

        for line in &self.preamble {
            write_line(f, line)?;
        }
        for section in &self.sections {
            write!(f, "[{}]{LINE_ENDING}", section.name)?;
            for line in &section.lines {
                write_line(f, line)?;
            }
        }
        Ok(())
    }
}

fn parse_int(text: &str) -> Option<i32> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<i64>().ok()?,
        None => return None,
    };

    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// First-letter boolean rule: t/y/1 and "on" are true, f/n/0 and "off" are false
fn parse_bool(text: &str) -> Option<bool> {
    let lower = text.trim().to_ascii_lowercase();
    match lower.chars().next()? {
        't' | 'y' | '1' => Some(true),
        'f' | 'n' | '0' => Some(false),
        'o' if lower.starts_with("on") => Some(true),
        'o' if lower.starts_with("of") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "; generated\r\n[Interface]\r\nDimUI=true\r\nOverlayCurrentID = 3\r\n\r\n[Overlay0]\r\nName=Dashboard\r\nWidth=0x10\r\n";

    #[test]
    fn test_read_with_defaults() {
        let doc = IniDocument::parse(SAMPLE);

        assert!(doc.read_bool("Interface", "DimUI", false));
        assert_eq!(doc.read_int("Interface", "OverlayCurrentID", 0), 3);
        assert_eq!(doc.read_int("Overlay0", "Width", 0), 16);
        assert_eq!(doc.read_string("Overlay0", "Name", ""), "Dashboard");

        // Missing section, missing key
        assert_eq!(doc.read_int("Nope", "Width", 42), 42);
        assert!(doc.read_bool("Overlay0", "Enabled", true));
    }

    #[test]
    fn test_malformed_values_use_default() {
        let doc = IniDocument::parse("[A]\nInt=12abc\nFloatish=3.5\nBool=maybe\nHuge=99999999999\n");

        assert_eq!(doc.read_int("A", "Int", -1), -1);
        assert_eq!(doc.read_int("A", "Floatish", 7), 7);
        assert_eq!(doc.read_int("A", "Huge", 5), 5);
        assert!(doc.read_bool("A", "Bool", true));
        assert!(!doc.read_bool("A", "Bool", false));
    }

    #[test]
    fn test_bool_spellings() {
        let doc = IniDocument::parse("[B]\na=Yes\nb=off\nc=ON\nd=0\ne=TRUE\n");

        assert!(doc.read_bool("B", "a", false));
        assert!(!doc.read_bool("B", "b", true));
        assert!(doc.read_bool("B", "c", false));
        assert!(!doc.read_bool("B", "d", true));
        assert!(doc.read_bool("B", "e", false));
    }

    #[test]
    fn test_negative_int() {
        let doc = IniDocument::parse("[C]\nDesktopID=-2\n");
        assert_eq!(doc.read_int("C", "DesktopID", 0), -2);
    }

    #[test]
    fn test_write_replaces_in_place_and_keeps_comments() {
        let mut doc = IniDocument::parse(SAMPLE);
        doc.write_int("Interface", "OverlayCurrentID", 1);
        doc.write_bool("Interface", "NoUIAutoLaunch", true);
        doc.write_string("Misc", "NoSteam", "false");

        let text = doc.to_string();
        assert!(text.starts_with("; generated\r\n"));
        assert!(text.contains("OverlayCurrentID=1\r\nNoUIAutoLaunch=true\r\n\r\n[Overlay0]"));
        assert!(text.ends_with("[Misc]\r\nNoSteam=false\r\n"));

        // Parsing the output again gives the same document
        assert_eq!(IniDocument::parse(&text), doc);
    }

    #[test]
    fn test_remove_section() {
        let mut doc = IniDocument::parse(SAMPLE);

        assert!(doc.remove_section("Overlay0"));
        assert!(!doc.remove_section("Overlay0"));
        assert!(!doc.section_exists("Overlay0"));
        assert!(!doc.to_string().contains("Dashboard"));
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let doc = IniDocument::parse("\u{feff}[Interface]\r\nDisplaySizeLarge=true\r\n");
        assert!(doc.section_exists("Interface"));
        assert!(doc.read_bool("Interface", "DisplaySizeLarge", false));
    }

    #[test]
    fn test_duplicate_headers_merge() {
        let doc = IniDocument::parse("[A]\nx=1\n[B]\ny=2\n[A]\nx=3\nz=4\n");

        assert_eq!(doc.section_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(doc.read_int("A", "x", 0), 3);
        assert_eq!(doc.read_int("A", "z", 0), 4);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let doc = IniDocument::load(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(doc, IniDocument::new());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles/overlays/test.ini");

        let mut doc = IniDocument::new();
        doc.write_string("Overlay", "Name", "Test");
        doc.save(&path).unwrap();

        let loaded = IniDocument::load(&path).unwrap();
        assert_eq!(loaded.read_string("Overlay", "Name", ""), "Test");
    }
}

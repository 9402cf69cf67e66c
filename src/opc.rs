// ABOUTME: Minimal Open Packaging Conventions reader shared by the DOCX and PPTX readers
// ABOUTME: Opens the zip container, reads parts and resolves relationship targets

use crate::errors::{DeckError, Result};
use crate::utils;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// A `<Relationship>` entry from a `.rels` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// An OPC package opened from disk
pub struct Package {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl Package {
    /// Open a package, distinguishing a missing file from a file that is not a zip
    pub fn open(path: &Path) -> Result<Self> {
        utils::validate_file_exists(path)?;
        let file = File::open(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
            ZipError::Io(io) => DeckError::Io(io),
            other => DeckError::invalid(path, format!("not a zip package: {}", other)),
        })?;
        debug!("Opened package {:?} with {} entries", path, archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Read a part as UTF-8 text, `None` if the package has no such part
    pub fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let mut entry = match self.archive.by_name(name.trim_start_matches('/')) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(DeckError::invalid(&self.path, e.to_string())),
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| DeckError::invalid(&self.path, format!("part {} is not UTF-8", name)))
    }

    /// Like `read_part` but a missing part is a format error
    pub fn require_part(&mut self, name: &str) -> Result<String> {
        self.read_part(name)?
            .ok_or_else(|| DeckError::invalid(&self.path, format!("missing part {}", name)))
    }

    /// Relationships whose source is `part` ("" for the package itself)
    pub fn relationships(&mut self, part: &str) -> Result<Vec<Relationship>> {
        let rels_name = rels_part_name(part);
        match self.read_part(&rels_name)? {
            Some(xml) => parse_relationships(&xml)
                .map_err(|e| DeckError::invalid(&self.path, format!("{}: {}", rels_name, e))),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve the first internal relationship of `rel_type` from `part`
    pub fn related_part(&mut self, part: &str, rel_type: &str) -> Result<Option<String>> {
        let rels = self.relationships(part)?;
        Ok(rels
            .into_iter()
            .find(|r| r.rel_type == rel_type && !r.external)
            .map(|r| resolve_target(part, &r.target)))
    }
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`, "" -> `_rels/.rels`
pub fn rels_part_name(part: &str) -> String {
    let part = part.trim_start_matches('/');
    match part.rfind('/') {
        Some(idx) => format!("{}/_rels/{}.rels", &part[..idx], &part[idx + 1..]),
        None if part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the directory of its source part
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let source_part = source_part.trim_start_matches('/');
    let mut segments: Vec<&str> = match source_part.rfind('/') {
        Some(idx) => source_part[..idx].split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

pub fn parse_relationships(xml: &str) -> std::result::Result<Vec<Relationship>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut rels = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Empty(ref e) | Event::Start(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                    external: false,
                };
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value()?.into_owned();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" => rel.external = value == "External",
                        _ => {}
                    }
                }
                rels.push(rel);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rels)
}

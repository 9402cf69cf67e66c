// ABOUTME: DOCX metadata inspector for the docdeck application
// ABOUTME: Extracts paragraph count, margins and Normal style formatting from a Word document

use crate::errors::{DeckError, Result};
use crate::opc::{self, Package};
use crate::units;
use crate::utils::quoted;
use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const DEFAULT_STYLES_PART: &str = "word/styles.xml";
const NORMAL_STYLE: &str = "Normal";

/// Line spacing of a paragraph style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpacing {
    /// Multiple of single spacing (`lineRule="auto"`)
    Multiple(f64),
    /// Fixed height in twips
    Exact(i64),
    /// Minimum height in twips
    AtLeast(i64),
}

impl fmt::Display for LineSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSpacing::Multiple(m) => write!(f, "{:?}", m),
            // Fixed heights print as EMU lengths
            LineSpacing::Exact(twips) | LineSpacing::AtLeast(twips) => {
                write!(f, "{}", units::twips_to_emu(*twips))
            }
        }
    }
}

/// Page margins in centimetres, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginsCm {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Formatting statistics for one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub file: PathBuf,
    pub paragraphs: usize,
    pub margins_cm: MarginsCm,
    pub font: Option<String>,
    pub font_size_pt: Option<f64>,
    pub line_spacing: Option<LineSpacing>,
    pub different_first_page: bool,
}

fn fmt_optional<T>(value: &Option<T>, render: impl Fn(&T) -> String) -> String {
    value.as_ref().map(render).unwrap_or_else(|| "None".to_string())
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.margins_cm;
        write!(
            f,
            "{{'file': {}, 'paragraphs': {}, 'margins_cm': ({:?}, {:?}, {:?}, {:?}), 'font': {}, \
             'font_size_pt': {}, 'line_spacing': {}, 'different_first_page': {}}}",
            quoted(&self.file.display().to_string()),
            self.paragraphs,
            m.left,
            m.right,
            m.top,
            m.bottom,
            fmt_optional(&self.font, |s| quoted(s)),
            fmt_optional(&self.font_size_pt, |pt| format!("{:?}", pt)),
            fmt_optional(&self.line_spacing, |ls| ls.to_string()),
            if self.different_first_page { "True" } else { "False" },
        )
    }
}

/// Inspect a DOCX file and summarise its formatting
pub fn docx_summary(path: &Path) -> Result<DocumentSummary> {
    info!("Inspecting DOCX {:?}", path);
    let mut package = Package::open(path)?;

    let document_part = package
        .related_part("", opc::REL_OFFICE_DOCUMENT)?
        .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());
    let document_xml = package.require_part(&document_part)?;
    let body = scan_body(&document_xml).map_err(|e| DeckError::invalid(path, e))?;

    let section = body
        .first_section
        .ok_or_else(|| DeckError::invalid(path, "document has no section properties"))?;
    let margins = section
        .margins_cm()
        .ok_or_else(|| DeckError::invalid(path, "first section has no page margins"))?;

    let styles_part = package
        .related_part(&document_part, opc::REL_STYLES)?
        .unwrap_or_else(|| DEFAULT_STYLES_PART.to_string());
    let normal = match package.read_part(&styles_part)? {
        Some(xml) => {
            find_paragraph_style(&xml, NORMAL_STYLE).map_err(|e| DeckError::invalid(path, e))?
        }
        None => None,
    };
    if normal.is_none() {
        debug!("{:?} has no {} paragraph style", path, NORMAL_STYLE);
    }
    let normal = normal.unwrap_or_default();
    let line_spacing = normal.line_spacing();

    Ok(DocumentSummary {
        file: path.to_path_buf(),
        paragraphs: body.paragraphs,
        margins_cm: margins,
        font: normal.font,
        font_size_pt: normal.size_half_points.map(|half| half as f64 / 2.0),
        line_spacing,
        different_first_page: section.title_page,
    })
}

/// Render the bracketed check block printed before the deck is generated
pub fn render_check_block(summaries: &[DocumentSummary]) -> String {
    let mut out = String::from("DOCX_CHECK_START\n");
    for summary in summaries {
        out.push_str(&summary.to_string());
        out.push('\n');
    }
    out.push_str("DOCX_CHECK_END\n");
    out
}

#[derive(Debug, Default)]
struct SectionProps {
    left: Option<i64>,
    right: Option<i64>,
    top: Option<i64>,
    bottom: Option<i64>,
    title_page: bool,
}

impl SectionProps {
    fn margins_cm(&self) -> Option<MarginsCm> {
        let cm = |twips: i64| units::round_to(units::emu_to_cm(units::twips_to_emu(twips)), 2);
        Some(MarginsCm {
            left: cm(self.left?),
            right: cm(self.right?),
            top: cm(self.top?),
            bottom: cm(self.bottom?),
        })
    }
}

#[derive(Debug, Default)]
struct BodyScan {
    paragraphs: usize,
    first_section: Option<SectionProps>,
}

fn local(e: &BytesStart<'_>) -> Vec<u8> {
    e.local_name().as_ref().to_vec()
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// On/off properties: present without `w:val`, or with a truthy one
fn on_off(e: &BytesStart<'_>) -> bool {
    match attr(e, b"val") {
        None => true,
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// Parse a twips measure, accepting the universal-measure units Word also writes
fn parse_twips(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let split = value.len().checked_sub(2)?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().ok()?;
    let twips = match unit {
        "mm" => number * 1440.0 / 25.4,
        "cm" => number * 1440.0 / 2.54,
        "in" => number * 1440.0,
        "pt" => number * 20.0,
        "pc" | "pi" => number * 240.0,
        _ => return None,
    };
    Some(twips.round() as i64)
}

/// Count top-level paragraphs and capture the first section's properties.
///
/// Sections live either in a top-level paragraph's `w:pPr` or directly in
/// `w:body`; the first one in document order is the first section.
fn scan_body(xml: &str) -> std::result::Result<BodyScan, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut scan = BodyScan::default();
    let mut section: Option<(usize, SectionProps)> = None;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        let (e, is_empty) = match &event {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                if let Some((depth, _)) = &section {
                    if stack.len() == *depth {
                        if let Some((_, props)) = section.take() {
                            scan.first_section = Some(props);
                        }
                    }
                }
                stack.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };
        let name = local(e);

        if name == b"p" && stack.last().map_or(false, |parent| parent == b"body") {
            scan.paragraphs += 1;
        }

        if name == b"sectPr"
            && scan.first_section.is_none()
            && section.is_none()
            && is_section_host(&stack)
        {
            if is_empty {
                scan.first_section = Some(SectionProps::default());
            } else {
                section = Some((stack.len() + 1, SectionProps::default()));
            }
        } else if let Some((depth, props)) = section.as_mut() {
            if stack.len() == *depth {
                match name.as_slice() {
                    b"pgMar" => {
                        props.left = attr(e, b"left").and_then(|v| parse_twips(&v));
                        props.right = attr(e, b"right").and_then(|v| parse_twips(&v));
                        props.top = attr(e, b"top").and_then(|v| parse_twips(&v));
                        props.bottom = attr(e, b"bottom").and_then(|v| parse_twips(&v));
                    }
                    b"titlePg" => props.title_page = on_off(e),
                    _ => {}
                }
            }
        }

        if !is_empty {
            stack.push(name);
        }
    }

    Ok(scan)
}

fn is_section_host(stack: &[Vec<u8>]) -> bool {
    match stack {
        [.., body, p, ppr] if body == b"body" && p == b"p" && ppr == b"pPr" => true,
        [.., body] => body == b"body",
        [] => false,
    }
}

#[derive(Debug, Default, Clone)]
struct StyleProps {
    name: Option<String>,
    font: Option<String>,
    size_half_points: Option<u32>,
    line: Option<i64>,
    line_rule: Option<String>,
}

impl StyleProps {
    fn line_spacing(&self) -> Option<LineSpacing> {
        let line = self.line?;
        Some(match self.line_rule.as_deref() {
            Some("exact") => LineSpacing::Exact(line),
            Some("atLeast") => LineSpacing::AtLeast(line),
            _ => LineSpacing::Multiple(line as f64 / 240.0),
        })
    }
}

/// Find the paragraph style whose display name is `wanted`
fn find_paragraph_style(
    xml: &str,
    wanted: &str,
) -> std::result::Result<Option<StyleProps>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<StyleProps> = None;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        let (e, is_empty) = match &event {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(end) => {
                if end.local_name().as_ref() == b"style" {
                    if let Some(style) = current.take() {
                        if style.name.as_deref() == Some(wanted) {
                            return Ok(Some(style));
                        }
                    }
                }
                stack.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };
        let name = local(e);
        let parent = stack.last().map(Vec::as_slice);

        match (parent, name.as_slice()) {
            (Some(b"styles"), b"style") => {
                let is_paragraph = attr(e, b"type").as_deref() == Some("paragraph");
                if is_paragraph && !is_empty {
                    current = Some(StyleProps::default());
                }
            }
            (Some(b"style"), b"name") => {
                if let Some(style) = current.as_mut() {
                    style.name = attr(e, b"val");
                }
            }
            (Some(b"rPr"), b"rFonts") if in_style_props(&stack) => {
                if let Some(style) = current.as_mut() {
                    style.font = attr(e, b"ascii");
                }
            }
            (Some(b"rPr"), b"sz") if in_style_props(&stack) => {
                if let Some(style) = current.as_mut() {
                    style.size_half_points = attr(e, b"val").and_then(|v| v.parse().ok());
                }
            }
            (Some(b"pPr"), b"spacing") if in_style_props(&stack) => {
                if let Some(style) = current.as_mut() {
                    style.line = attr(e, b"line").and_then(|v| parse_twips(&v));
                    style.line_rule = attr(e, b"lineRule");
                }
            }
            _ => {}
        }

        if !is_empty {
            stack.push(name);
        }
    }

    Ok(None)
}

/// True when the innermost open element is a `pPr`/`rPr` directly under `w:style`
fn in_style_props(stack: &[Vec<u8>]) -> bool {
    stack.len() >= 2 && stack[stack.len() - 2] == b"style"
}

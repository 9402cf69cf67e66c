// ABOUTME: Reads the text outline back out of a PPTX file
// ABOUTME: Lists title runs, body runs and embedded images per slide, in slide order

use crate::errors::{DeckError, Result};
use crate::opc::{self, Package};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::path::Path;

/// Text and picture content of one slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideOutline {
    pub title_runs: Vec<String>,
    pub body_runs: Vec<String>,
    pub body_paragraphs: usize,
    /// Package part names of the embedded images
    pub image_parts: Vec<String>,
}

impl SlideOutline {
    pub fn title(&self) -> String {
        self.title_runs.concat()
    }
}

impl fmt::Display for SlideOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        for run in &self.body_runs {
            writeln!(f, "  - {}", run)?;
        }
        for image in &self.image_parts {
            writeln!(f, "  [{}]", image)?;
        }
        Ok(())
    }
}

/// Read every slide of a presentation in `sldIdLst` order
pub fn read_outline(path: &Path) -> Result<Vec<SlideOutline>> {
    let mut package = Package::open(path)?;
    let presentation = package
        .related_part("", opc::REL_OFFICE_DOCUMENT)?
        .ok_or_else(|| DeckError::invalid(path, "no presentation part"))?;
    let presentation_xml = package.require_part(&presentation)?;
    let rels = package.relationships(&presentation)?;

    let slide_rel_ids =
        slide_id_order(&presentation_xml).map_err(|e| DeckError::invalid(path, e.to_string()))?;
    let mut outlines = Vec::with_capacity(slide_rel_ids.len());

    for rel_id in slide_rel_ids {
        let rel = rels
            .iter()
            .find(|r| r.id == rel_id && r.rel_type == opc::REL_SLIDE)
            .ok_or_else(|| {
                DeckError::invalid(path, format!("dangling slide relationship {}", rel_id))
            })?;
        let slide_part = opc::resolve_target(&presentation, &rel.target);
        debug!("Reading {}", slide_part);

        let slide_xml = package.require_part(&slide_part)?;
        let slide_rels = package.relationships(&slide_part)?;
        let mut outline =
            parse_slide(&slide_xml).map_err(|e| DeckError::invalid(path, e.to_string()))?;
        outline.image_parts = outline
            .image_parts
            .iter()
            .filter_map(|embed| slide_rels.iter().find(|r| &r.id == embed))
            .map(|r| opc::resolve_target(&slide_part, &r.target))
            .collect();
        outlines.push(outline);
    }

    Ok(outlines)
}

fn slide_id_order(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"sldId" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"r:id" {
                        ids.push(attr.unescape_value()?.into_owned());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

#[derive(Clone, Copy, PartialEq)]
enum Placeholder {
    Title,
    Body,
    Other,
}

/// Collect runs from the title and body placeholders and the `r:embed` ids
/// of pictures (resolved to part names by the caller)
fn parse_slide(xml: &str) -> std::result::Result<SlideOutline, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut outline = SlideOutline::default();
    let mut shape: Option<Placeholder> = None;
    let mut in_text = false;
    let mut run_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"sp" => shape = Some(Placeholder::Other),
                b"p" if shape == Some(Placeholder::Body) => outline.body_paragraphs += 1,
                b"t" => {
                    in_text = true;
                    run_text.clear();
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"ph" if shape.is_some() => {
                    let mut kind = Placeholder::Body;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"type" {
                            kind = match attr.value.as_ref() {
                                b"title" | b"ctrTitle" => Placeholder::Title,
                                b"body" | b"obj" => Placeholder::Body,
                                _ => Placeholder::Other,
                            };
                        }
                    }
                    shape = Some(kind);
                }
                b"p" if shape == Some(Placeholder::Body) => outline.body_paragraphs += 1,
                b"blip" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"r:embed" {
                            outline.image_parts.push(attr.unescape_value()?.into_owned());
                        }
                    }
                }
                _ => {}
            },
            Event::Text(ref t) if in_text => run_text.push_str(&t.unescape()?),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => {
                    in_text = false;
                    match shape {
                        Some(Placeholder::Title) => outline.title_runs.push(run_text.clone()),
                        Some(Placeholder::Body) => outline.body_runs.push(run_text.clone()),
                        _ => {}
                    }
                }
                b"sp" => shape = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slide_separates_title_and_body() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:r="r" xmlns:p="p"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/><a:p><a:r><a:rPr/><a:t>Hello &amp; bye</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:cNvPr id="3" name="Body"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
<p:txBody><a:bodyPr/><a:p><a:r><a:t>one</a:t></a:r></a:p><a:p><a:r><a:t>two</a:t></a:r></a:p><a:p/></p:txBody></p:sp>
<p:pic><p:blipFill><a:blip r:embed="rId2"/></p:blipFill></p:pic>
</p:spTree></p:cSld></p:sld>"#;
        let outline = parse_slide(xml).unwrap();
        assert_eq!(outline.title_runs, vec!["Hello & bye"]);
        assert_eq!(outline.body_runs, vec!["one", "two"]);
        assert_eq!(outline.body_paragraphs, 3);
        assert_eq!(outline.image_parts, vec!["rId2"]);
    }

    #[test]
    fn test_slide_id_order() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst><p:sldId id="257" r:id="rId4"/><p:sldId id="256" r:id="rId3"/></p:sldIdLst></p:presentation>"#;
        assert_eq!(slide_id_order(xml).unwrap(), vec!["rId4", "rId3"]);
    }
}

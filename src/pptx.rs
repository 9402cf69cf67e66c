// ABOUTME: PPTX generation module for the docdeck application
// ABOUTME: Builds slides with a title, a bulleted body and a picture, then writes the package

use crate::config::DeckStyle;
use crate::content::SlideSpec;
use crate::errors::{DeckError, Result};
use crate::opc;
use crate::units;
use crate::utils::{self, xml_escape};
use image::io::Reader as ImageReader;
use image::Rgb;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, ZipWriter};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Horizontal paragraph alignment; the deck only ever left-aligns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
}

impl Alignment {
    fn as_attr(self) -> &'static str {
        match self {
            Alignment::Left => "l",
        }
    }
}

/// Character formatting of a run; `None` inherits from the layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFont {
    pub family: Option<String>,
    pub bold: Option<bool>,
    pub size_pt: Option<f64>,
    pub color: Option<Rgb<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: RunFont,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub level: u32,
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    /// Replace the paragraph's runs with a single run, or none for empty text
    pub fn set_text(&mut self, text: &str) {
        self.runs.clear();
        if !text.is_empty() {
            self.runs.push(Run {
                text: text.to_string(),
                font: RunFont::default(),
            });
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Apply `font` to every run and return how many runs were formatted.
    ///
    /// A paragraph without runs has nothing to carry the formatting; that is
    /// reported rather than silently ignored.
    pub fn format_runs(&mut self, font: &RunFont) -> usize {
        if self.runs.is_empty() {
            warn!("Formatting requested on a paragraph with no runs; nothing applied");
        }
        for run in &mut self.runs {
            run.font = font.clone();
        }
        self.runs.len()
    }
}

/// Text body of a shape; always holds at least one paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }
}

impl TextFrame {
    /// Remove everything but one empty paragraph
    pub fn clear(&mut self) {
        self.paragraphs.truncate(1);
        if let Some(first) = self.paragraphs.first_mut() {
            *first = Paragraph::default();
        } else {
            self.paragraphs.push(Paragraph::default());
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.first_paragraph_mut().set_text(text);
    }

    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        &mut self.paragraphs[0]
    }

    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn run_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.runs.len()).sum()
    }
}

/// An image embedded at a fixed frame; the frame is not fitted to the image
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub source: PathBuf,
    pub data: Vec<u8>,
    pub extension: String,
    pub pixel_size: (u32, u32),
    pub offset: (i64, i64),
    pub size: (i64, i64),
}

/// A slide built from the title-and-content layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub title: TextFrame,
    pub body: TextFrame,
    pub pictures: Vec<Picture>,
}

impl Slide {
    /// Read and embed an image file. The file must exist and decode.
    pub fn add_picture(
        &mut self,
        path: &Path,
        offset: (i64, i64),
        size: (i64, i64),
    ) -> Result<&Picture> {
        utils::validate_file_exists(path)?;
        let data = fs::read(path)?;

        let reader = ImageReader::new(Cursor::new(&data)).with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| {
                DeckError::ValidationError(format!("Unrecognised image format: {:?}", path))
            })?;
        let extension = format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("png")
            .to_string();
        let pixel_size = reader.into_dimensions()?;
        debug!("Embedding {:?} ({}x{} {})", path, pixel_size.0, pixel_size.1, extension);

        self.pictures.push(Picture {
            source: path.to_path_buf(),
            data,
            extension,
            pixel_size,
            offset,
            size,
        });
        Ok(&self.pictures[self.pictures.len() - 1])
    }
}

/// An in-memory presentation, written out in one piece by `save`
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub title: String,
    pub slide_size: (i64, i64),
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(slide_size: (i64, i64)) -> Self {
        Self {
            title: "Presentation".to_string(),
            slide_size,
            slides: Vec::new(),
        }
    }

    /// Append a slide using the title-and-content layout
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::default());
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Serialise the whole package in memory, then write it with a single call
    pub fn save(&self, output_file: &Path) -> Result<()> {
        info!("Writing PPTX with {} slides to {:?}", self.slides.len(), output_file);
        let bytes = self.to_bytes()?;
        utils::ensure_parent_directory_exists(output_file)?;
        fs::write(output_file, bytes)?;
        info!("PPTX file created at {:?}", output_file);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let media = self.media_names();

        debug!("Creating PPTX structure: [Content_Types].xml");
        add_part(&mut zip, "[Content_Types].xml", &self.content_types_xml(&media))?;
        add_part(&mut zip, "_rels/.rels", ROOT_RELS)?;
        add_part(&mut zip, "docProps/app.xml", &self.app_xml())?;
        add_part(&mut zip, "docProps/core.xml", &self.core_xml())?;

        debug!("Creating PPTX structure: ppt/presentation.xml");
        add_part(&mut zip, "ppt/_rels/presentation.xml.rels", &self.presentation_rels())?;
        add_part(&mut zip, "ppt/presentation.xml", &self.presentation_xml())?;
        add_part(&mut zip, "ppt/slideMasters/slideMaster1.xml", &self.slide_master_xml())?;
        add_part(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", MASTER_RELS)?;
        add_part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &self.slide_layout_xml())?;
        add_part(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", LAYOUT_RELS)?;
        add_part(&mut zip, "ppt/theme/theme1.xml", THEME_XML)?;

        for (i, slide) in self.slides.iter().enumerate() {
            let slide_num = i + 1;
            debug!("Creating slide XML: ppt/slides/slide{}.xml", slide_num);
            let names = &media[i];
            add_part(&mut zip, &format!("ppt/slides/slide{}.xml", slide_num), &slide_xml(slide))?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                &slide_rels(names),
            )?;
            for (picture, name) in slide.pictures.iter().zip(names) {
                zip.start_file(format!("ppt/media/{}", name), FileOptions::default())?;
                zip.write_all(&picture.data)?;
            }
        }

        debug!("Finalizing PPTX package");
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Media part names per slide, numbered across the whole deck
    fn media_names(&self) -> Vec<Vec<String>> {
        let mut counter = 0;
        self.slides
            .iter()
            .map(|slide| {
                slide
                    .pictures
                    .iter()
                    .map(|p| {
                        counter += 1;
                        format!("image{}.{}", counter, p.extension)
                    })
                    .collect()
            })
            .collect()
    }

    fn content_types_xml(&self, media: &[Vec<String>]) -> String {
        let extensions: BTreeSet<&str> = media
            .iter()
            .flatten()
            .filter_map(|name| name.rsplit('.').next())
            .collect();
        let defaults: String = extensions
            .iter()
            .map(|ext| {
                format!(
                    r#"<Default Extension="{}" ContentType="{}"/>"#,
                    ext,
                    image_content_type(ext)
                )
            })
            .collect();
        let slides: String = (1..=self.slides.len())
            .map(|n| {
                format!(
                    r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect();
        format!(
            r#"{XML_DECL}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{defaults}<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>{slides}</Types>"#
        )
    }

    fn app_xml(&self) -> String {
        format!(
            r#"{XML_DECL}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>docdeck</Application><Slides>{}</Slides></Properties>"#,
            self.slides.len()
        )
    }

    fn core_xml(&self) -> String {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            r#"{XML_DECL}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:creator>docdeck</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified><cp:revision>1</cp:revision></cp:coreProperties>"#,
            title = xml_escape(&self.title),
        )
    }

    fn presentation_rels(&self) -> String {
        let mut rels = format!(
            r#"{XML_DECL}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#
        );
        for n in 1..=self.slides.len() {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                n + 2,
                opc::REL_SLIDE,
                n
            ));
        }
        rels.push_str("</Relationships>");
        rels
    }

    fn presentation_xml(&self) -> String {
        let slide_ids = if self.slides.is_empty() {
            String::new()
        } else {
            let ids: String = (0..self.slides.len())
                .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3))
                .collect();
            format!("<p:sldIdLst>{}</p:sldIdLst>", ids)
        };
        format!(
            r#"{XML_DECL}
<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{slide_ids}<p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
            cx = self.slide_size.0,
            cy = self.slide_size.1,
        )
    }

    /// Title band across the top, body column on the left under it
    fn placeholder_frames(&self) -> ((i64, i64, i64, i64), (i64, i64, i64, i64)) {
        let (width, height) = self.slide_size;
        let margin = units::inches(0.6);
        let title = (margin, units::inches(0.3), width - 2 * margin, units::inches(1.0));
        let body_top = units::inches(1.3);
        let body = (margin, body_top, width / 2 - margin, height - body_top - units::inches(0.5));
        (title, body)
    }

    fn slide_master_xml(&self) -> String {
        let (title, body) = self.placeholder_frames();
        format!(
            r#"{XML_DECL}
<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{group}{title_sp}{body_sp}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="4400"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="2800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle><p:otherStyle/></p:txStyles></p:sldMaster>"#,
            group = GROUP_SHAPE_PROPS,
            title_sp = master_placeholder(
                2,
                "Title Placeholder 1",
                r#"<p:ph type="title"/>"#,
                title,
                "Click to edit Master title style"
            ),
            body_sp = master_placeholder(
                3,
                "Text Placeholder 2",
                r#"<p:ph type="body" idx="1"/>"#,
                body,
                "Click to edit Master text styles"
            ),
        )
    }

    fn slide_layout_xml(&self) -> String {
        format!(
            r#"{XML_DECL}
<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="obj" preserve="1"><p:cSld name="Title and Content"><p:spTree>{group}{title_sp}{body_sp}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
            group = GROUP_SHAPE_PROPS,
            title_sp =
                placeholder_sp(2, "Title 1", r#"<p:ph type="title"/>"#, &TextFrame::default()),
            body_sp = placeholder_sp(
                3,
                "Content Placeholder 2",
                r#"<p:ph idx="1"/>"#,
                &TextFrame::default()
            ),
        )
    }
}

fn add_part<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &str,
) -> Result<()> {
    zip.start_file(name, FileOptions::default())?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn image_content_type(ext: &str) -> String {
    match ext {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "tif" | "tiff" => "image/tiff".to_string(),
        "bmp" => "image/bmp".to_string(),
        other => format!("image/{}", other),
    }
}

const GROUP_SHAPE_PROPS: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn master_placeholder(
    id: u32,
    name: &str,
    ph: &str,
    frame: (i64, i64, i64, i64),
    prompt: &str,
) -> String {
    let (x, y, cx, cy) = frame;
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>{prompt}</a:t></a:r></a:p></p:txBody></p:sp>"#
    )
}

fn placeholder_sp(id: u32, name: &str, ph: &str, frame: &TextFrame) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        paragraphs = frame.paragraphs.iter().map(paragraph_xml).collect::<String>(),
    )
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    let mut ppr = String::new();
    if paragraph.level > 0 {
        ppr.push_str(&format!(r#" lvl="{}""#, paragraph.level));
    }
    if let Some(alignment) = paragraph.alignment {
        ppr.push_str(&format!(r#" algn="{}""#, alignment.as_attr()));
    }
    let ppr = if ppr.is_empty() { String::new() } else { format!("<a:pPr{}/>", ppr) };
    let runs: String = paragraph.runs.iter().map(run_xml).collect();
    format!("<a:p>{}{}</a:p>", ppr, runs)
}

fn run_xml(run: &Run) -> String {
    let font = &run.font;
    let mut attrs = String::new();
    if let Some(size) = font.size_pt {
        attrs.push_str(&format!(r#" sz="{}""#, units::centipoints(size)));
    }
    if let Some(bold) = font.bold {
        attrs.push_str(if bold { r#" b="1""# } else { r#" b="0""# });
    }
    let mut children = String::new();
    if let Some(Rgb([r, g, b])) = font.color {
        children.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{:02X}{:02X}{:02X}"/></a:solidFill>"#,
            r, g, b
        ));
    }
    if let Some(family) = &font.family {
        children.push_str(&format!(r#"<a:latin typeface="{}"/>"#, xml_escape(family)));
    }
    format!(
        r#"<a:r><a:rPr{attrs} dirty="0">{children}</a:rPr><a:t>{text}</a:t></a:r>"#,
        text = xml_escape(&run.text)
    )
}

fn picture_xml(id: u32, rel_id: usize, picture: &Picture) -> String {
    let (x, y) = picture.offset;
    let (cx, cy) = picture.size;
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {n}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        n = id - 1,
    )
}

fn slide_xml(slide: &Slide) -> String {
    let pictures: String = slide
        .pictures
        .iter()
        .enumerate()
        .map(|(i, p)| picture_xml(4 + i as u32, 2 + i, p))
        .collect();
    format!(
        r#"{XML_DECL}
<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree>{group}{title}{body}{pictures}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        group = GROUP_SHAPE_PROPS,
        title = placeholder_sp(2, "Title 1", r#"<p:ph type="title"/>"#, &slide.title),
        body = placeholder_sp(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#, &slide.body),
    )
}

fn slide_rels(media_names: &[String]) -> String {
    let mut rels = format!(
        r#"{XML_DECL}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#
    );
    for (i, name) in media_names.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="../media/{}"/>"#,
            i + 2,
            opc::REL_IMAGE,
            name
        ));
    }
    rels.push_str("</Relationships>");
    rels
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

const LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;

/// Set the slide title as a single left-aligned run in the title font
pub fn set_title(slide: &mut Slide, text: &str, style: &DeckStyle) {
    slide.title.set_text(text);
    let paragraph = slide.title.first_paragraph_mut();
    paragraph.alignment = Some(Alignment::Left);
    paragraph.format_runs(&RunFont {
        family: Some(style.font_family.clone()),
        bold: Some(style.title_bold),
        size_pt: Some(style.title_size_pt),
        color: Some(style.title_color),
    });
}

/// Replace the body with one top-level, left-aligned paragraph per line
pub fn set_body(frame: &mut TextFrame, lines: &[&str], style: &DeckStyle) {
    frame.clear();
    let font = RunFont {
        family: Some(style.font_family.clone()),
        bold: None,
        size_pt: Some(style.body_size_pt),
        color: Some(style.body_color),
    };
    for (i, line) in lines.iter().enumerate() {
        let paragraph = if i == 0 {
            frame.first_paragraph_mut()
        } else {
            frame.add_paragraph()
        };
        paragraph.set_text(line);
        paragraph.level = 0;
        paragraph.alignment = Some(Alignment::Left);
        paragraph.format_runs(&font);
    }
}

/// Build one slide per spec, embedding `<assets_dir>/<spec.image>` on each.
///
/// Every image must already exist; nothing is written here.
pub fn assemble_deck(specs: &[SlideSpec], assets_dir: &Path, style: &DeckStyle) -> Result<Deck> {
    let mut deck = Deck::new(style.slide_size);
    if let Some(first) = specs.first() {
        deck.title = first.bullets.first().copied().unwrap_or(first.title).to_string();
    }

    for (i, spec) in specs.iter().enumerate() {
        info!("Processing slide {}: {}", i + 1, spec.title);
        let slide = deck.add_slide();
        set_title(slide, spec.title, style);
        set_body(&mut slide.body, spec.bullets, style);
        slide.add_picture(&assets_dir.join(spec.image), style.picture_offset, style.picture_size)?;
    }

    Ok(deck)
}

/// Assemble the deck and write it to `output_file`
pub fn generate_pptx(
    specs: &[SlideSpec],
    assets_dir: &Path,
    output_file: &Path,
    style: &DeckStyle,
) -> Result<Deck> {
    let deck = assemble_deck(specs, assets_dir, style)?;
    deck.save(output_file)?;
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_title_creates_one_formatted_run() {
        let style = DeckStyle::default();
        let mut slide = Slide::default();
        set_title(&mut slide, "Заключение", &style);
        assert_eq!(slide.title.paragraphs.len(), 1);
        let run = &slide.title.paragraphs[0].runs[0];
        assert_eq!(slide.title.run_count(), 1);
        assert_eq!(run.font.family.as_deref(), Some("Times New Roman"));
        assert_eq!(run.font.bold, Some(true));
        assert_eq!(run.font.size_pt, Some(36.0));
        assert_eq!(run.font.color, Some(Rgb([24, 24, 24])));
    }

    #[test]
    fn test_empty_title_has_no_runs_to_format() {
        let mut paragraph = Paragraph::default();
        paragraph.set_text("");
        assert_eq!(paragraph.format_runs(&RunFont::default()), 0);
    }

    #[test]
    fn test_set_body_replaces_previous_content() {
        let style = DeckStyle::default();
        let mut frame = TextFrame::default();
        set_body(&mut frame, &["old 1", "old 2", "old 3", "old 4"], &style);
        set_body(&mut frame, &["a", "b"], &style);
        assert_eq!(frame.paragraphs.len(), 2);
        assert_eq!(frame.run_count(), 2);
        assert_eq!(frame.paragraphs[1].text(), "b");
        assert!(frame
            .paragraphs
            .iter()
            .all(|p| p.level == 0 && p.alignment == Some(Alignment::Left)));
        assert_eq!(frame.paragraphs[0].runs[0].font.size_pt, Some(22.0));
        assert_eq!(frame.paragraphs[0].runs[0].font.bold, None);
    }

    #[test]
    fn test_clear_keeps_one_empty_paragraph() {
        let mut frame = TextFrame::default();
        frame.set_text("x");
        frame.add_paragraph().set_text("y");
        frame.clear();
        assert_eq!(frame.paragraphs, vec![Paragraph::default()]);
    }

    #[test]
    fn test_run_xml_formatting() {
        let run = Run {
            text: "A & B".to_string(),
            font: RunFont {
                family: Some("Times New Roman".to_string()),
                bold: Some(true),
                size_pt: Some(36.0),
                color: Some(Rgb([24, 24, 24])),
            },
        };
        assert_eq!(
            run_xml(&run),
            r#"<a:r><a:rPr sz="3600" b="1" dirty="0"><a:solidFill><a:srgbClr val="181818"/></a:solidFill><a:latin typeface="Times New Roman"/></a:rPr><a:t>A &amp; B</a:t></a:r>"#
        );
    }

    #[test]
    fn test_paragraph_xml_omits_default_level() {
        let mut paragraph = Paragraph::default();
        paragraph.alignment = Some(Alignment::Left);
        assert_eq!(paragraph_xml(&paragraph), r#"<a:p><a:pPr algn="l"/></a:p>"#);
        paragraph.level = 1;
        paragraph.alignment = None;
        assert_eq!(paragraph_xml(&paragraph), r#"<a:p><a:pPr lvl="1"/></a:p>"#);
    }

    #[test]
    fn test_missing_picture_is_not_found() {
        let mut slide = Slide::default();
        let err = slide
            .add_picture(Path::new("/nonexistent/01_title.png"), (0, 0), (1, 1))
            .unwrap_err();
        assert!(matches!(err, DeckError::NotFound(_)));
    }

    #[test]
    fn test_media_names_are_numbered_across_slides() {
        let picture = Picture {
            source: PathBuf::from("a.png"),
            data: Vec::new(),
            extension: "png".to_string(),
            pixel_size: (1, 1),
            offset: (0, 0),
            size: (1, 1),
        };
        let mut deck = Deck::new((1, 1));
        deck.add_slide().pictures.push(picture.clone());
        deck.add_slide().pictures.push(picture);
        assert_eq!(
            deck.media_names(),
            vec![vec!["image1.png".to_string()], vec!["image2.png".to_string()]]
        );
    }
}

//! Minimal WordprocessingML writer for summary reports.

use std::io::{Cursor, Write};

use chrono::NaiveDateTime;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::TallyError;
use crate::summary::SummaryReport;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:rPr><w:b/><w:sz w:val="52"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
</w:styles>"#;

enum Block<'a> {
    Title(&'a str),
    Heading(&'a str),
    Paragraph(&'a str),
}

/// Render a summary report as a .docx file.
///
/// Layout: title, generation timestamp, then "Summary", "Top Projects" and
/// "Notes" sections. Empty sections are omitted.
pub fn build_summary_docx(
    report: &SummaryReport,
    source_name: &str,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, TallyError> {
    let title = format!("Spreadsheet Summary: {source_name}");
    let generated = format!(
        "Generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    let project_lines: Vec<String> = report
        .top_projects
        .iter()
        .map(|p| match p.amount {
            Some(amount) => format!("{}: {amount}", p.name),
            None => p.name.clone(),
        })
        .collect();

    let mut blocks = vec![
        Block::Title(&title),
        Block::Paragraph(&generated),
        Block::Heading("Summary"),
        Block::Paragraph(&report.summary),
    ];
    if !project_lines.is_empty() {
        blocks.push(Block::Heading("Top Projects"));
        blocks.extend(project_lines.iter().map(|l| Block::Paragraph(l)));
    }
    if !report.notes.is_empty() {
        blocks.push(Block::Heading("Notes"));
        blocks.extend(report.notes.iter().map(|n| Block::Paragraph(n)));
    }

    let document = document_xml(&blocks)?;
    package(&document)
}

fn document_xml(blocks: &[Block<'_>]) -> Result<Vec<u8>, TallyError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORD_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        let (style, text) = match block {
            Block::Title(t) => (Some("Title"), *t),
            Block::Heading(t) => (Some("Heading1"), *t),
            Block::Paragraph(t) => (None, *t),
        };
        write_paragraph(&mut writer, style, text)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    style: Option<&str>,
    text: &str,
) -> Result<(), TallyError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    if let Some(style) = style {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        let mut p_style = BytesStart::new("w:pStyle");
        p_style.push_attribute(("w:val", style));
        writer.write_event(Event::Empty(p_style))?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    // One run per line, separated by explicit breaks.
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
        }
        let mut t = BytesStart::new("w:t");
        t.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(t))?;
        writer.write_event(Event::Text(BytesText::new(&xml_safe(line))))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

/// Drop characters XML 1.0 does not allow, even escaped.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            !matches!(
                c,
                '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
            )
        })
        .collect()
}

fn package(document: &[u8]) -> Result<Vec<u8>, TallyError> {
    let zip_err = |e: zip::result::ZipError| TallyError::Report(e.to_string());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/document.xml", document),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options).map_err(zip_err)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish().map_err(zip_err)?.into_inner())
}

//! DOCX file parser implementation.

use cv_core::{DocumentFormat, Error, ExtractedDocument, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Package-level relationships part.
const PACKAGE_RELS_PATH: &str = "_rels/.rels";

/// Conventional location of the main document part.
const DEFAULT_DOCUMENT_PATH: &str = "word/document.xml";

/// Parser for DOCX (Office Open XML) files.
pub struct DocxParser;

impl DocxParser {
    /// Create a new DOCX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a DOCX file from a reader, producing one fragment per body
    /// paragraph.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<ExtractedDocument> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let document_path = self.main_document_path(&mut archive)?;
        log::debug!("Main document part: {}", document_path);

        let content = self.read_file_from_archive(&mut archive, &document_path)?;
        let paragraphs = extract_body_paragraphs(&content)?;
        log::debug!("DOCX has {} body paragraphs", paragraphs.len());

        let mut extracted = ExtractedDocument::new(filename, DocumentFormat::Docx);
        for paragraph in paragraphs {
            extracted.push_fragment(paragraph);
        }

        Ok(extracted)
    }

    /// Resolve the main document part from the package relationships,
    /// falling back to `word/document.xml`.
    fn main_document_path<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<String> {
        if archive.by_name(PACKAGE_RELS_PATH).is_err() {
            log::debug!("No {} in package, using default document path", PACKAGE_RELS_PATH);
            return Ok(DEFAULT_DOCUMENT_PATH.to_string());
        }

        let rels_content = self.read_file_from_archive(archive, PACKAGE_RELS_PATH)?;
        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => {
                                rel_type = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            _ => {}
                        }
                    }

                    if rel_type.ends_with("/officeDocument") && !target.is_empty() {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing package relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        log::warn!("No officeDocument relationship found, using default document path");
        Ok(DEFAULT_DOCUMENT_PATH.to_string())
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the plain text of every paragraph that is a direct child of
/// `w:body`, in document order.
///
/// Runs count when they sit directly in the paragraph or in a hyperlink
/// directly under it. Paragraphs nested in tables, text boxes, or content
/// controls are skipped.
fn extract_body_paragraphs(xml_content: &str) -> Result<Vec<String>> {
    let mut paragraphs = Vec::new();
    let mut reader = Reader::from_str(xml_content);

    // Local names of the currently open elements.
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Stack depth inside the current body paragraph and run, when in one.
    let mut paragraph_depth: Option<usize> = None;
    let mut run_depth: Option<usize> = None;
    let mut current_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();

                match name.as_slice() {
                    b"p" if top_is(&stack, b"body") => {
                        current_text.clear();
                        paragraph_depth = Some(stack.len() + 1);
                    }
                    b"r" if opens_counted_run(&stack, paragraph_depth) => {
                        run_depth = Some(stack.len() + 1);
                    }
                    _ if run_depth == Some(stack.len()) => {
                        push_run_child(e, &mut current_text);
                    }
                    _ => {}
                }

                stack.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();

                if local_name(name.as_ref()) == b"p" && top_is(&stack, b"body") {
                    paragraphs.push(String::new());
                } else if run_depth == Some(stack.len()) {
                    push_run_child(e, &mut current_text);
                }
            }
            Ok(Event::Text(ref e)) => {
                let in_run_text =
                    run_depth.is_some_and(|depth| stack.len() == depth + 1) && top_is(&stack, b"t");
                if in_run_text {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::XmlError(format!("Invalid text content: {}", err)))?;
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                let depth = stack.len();
                if run_depth == Some(depth) {
                    run_depth = None;
                }
                if paragraph_depth == Some(depth) {
                    paragraph_depth = None;
                    paragraphs.push(std::mem::take(&mut current_text));
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Whether a `w:r` opening at the current stack position belongs to the
/// current body paragraph.
fn opens_counted_run(stack: &[Vec<u8>], paragraph_depth: Option<usize>) -> bool {
    let Some(depth) = paragraph_depth else {
        return false;
    };

    if stack.len() == depth {
        return true;
    }

    stack.len() == depth + 1 && top_is(stack, b"hyperlink")
}

/// Whether the innermost open element has the given local name.
fn top_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|top| top.as_slice() == name)
}

/// Append the text a run child element stands for. `w:t` content arrives
/// separately as text events.
fn push_run_child(element: &BytesStart, text: &mut String) {
    match local_name(element.name().as_ref()) {
        b"tab" | b"ptab" => text.push('\t'),
        b"br" if is_text_wrapping_break(element) => text.push('\n'),
        b"cr" => text.push('\n'),
        b"noBreakHyphen" => text.push('-'),
        _ => {}
    }
}

/// Whether a `w:br` is a plain line break. Page and column breaks carry no
/// text.
fn is_text_wrapping_break(element: &BytesStart) -> bool {
    element
        .attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == b"type")
        .map_or(true, |attr| attr.value.as_ref() == b"textWrapping")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
    }

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in parts {
            zip.start_file(*path, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn parse_body(body: &str) -> ExtractedDocument {
        let xml = document_xml(body);
        let bytes = build_docx(&[(PACKAGE_RELS_PATH, PACKAGE_RELS), (DEFAULT_DOCUMENT_PATH, &xml)]);
        DocxParser::new()
            .parse(Cursor::new(bytes), "resume.docx")
            .unwrap()
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"w:p"), b"p");
        assert_eq!(local_name(b"w:t"), b"t");
        assert_eq!(local_name(b"body"), b"body");
    }

    #[test]
    fn test_paragraphs_joined() {
        let body = format!("{}{}", paragraph("Name: Jane"), paragraph("Skills: Go"));
        let doc = parse_body(&body);

        assert_eq!(doc.format, DocumentFormat::Docx);
        assert_eq!(doc.fragment_count(), 2);
        assert_eq!(doc.text(), "Name: Jane\nSkills: Go");
    }

    #[test]
    fn test_runs_concatenated_and_whitespace_kept() {
        let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Jane </w:t></w:r><w:r><w:t>Doe</w:t></w:r></w:p>"#;
        let doc = parse_body(body);

        assert_eq!(doc.text(), "Jane Doe");
    }

    #[test]
    fn test_empty_paragraphs_kept() {
        let body = format!("{}<w:p/><w:p><w:pPr/></w:p>{}", paragraph("Top"), paragraph("Bottom"));
        let doc = parse_body(&body);

        assert_eq!(doc.fragment_count(), 4);
        assert_eq!(doc.text(), "Top\n\n\nBottom");
    }

    #[test]
    fn test_tabs_breaks_and_hyphens() {
        let body = "<w:p><w:r><w:t>2019</w:t><w:tab/><w:t>Acme</w:t><w:br/><w:t>Full</w:t><w:noBreakHyphen/><w:t>time</w:t></w:r></w:p>";
        let doc = parse_body(body);

        assert_eq!(doc.fragment_count(), 1);
        assert_eq!(doc.text(), "2019\tAcme\nFull-time");
    }

    #[test]
    fn test_page_and_column_breaks_add_no_text() {
        let body = r#"<w:p><w:r><w:t>Experience</w:t><w:br w:type="page"/><w:t>Acme</w:t><w:br w:type="column"/><w:t>2019</w:t><w:br w:type="textWrapping"/><w:t>2023</w:t></w:r></w:p>"#;
        let doc = parse_body(body);

        assert_eq!(doc.fragment_count(), 1);
        assert_eq!(doc.text(), "ExperienceAcme2019\n2023");
    }

    #[test]
    fn test_hyperlink_runs_included() {
        let body = r#"<w:p><w:r><w:t xml:space="preserve">Site: </w:t></w:r><w:hyperlink r:id="rId5" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:r><w:t>jane.dev</w:t></w:r></w:hyperlink></w:p>"#;
        let doc = parse_body(body);

        assert_eq!(doc.text(), "Site: jane.dev");
    }

    #[test]
    fn test_entities_unescaped() {
        let doc = parse_body(&paragraph("R&amp;D &lt;team&gt;"));
        assert_eq!(doc.text(), "R&D <team>");
    }

    #[test]
    fn test_table_paragraphs_excluded() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            paragraph("Experience"),
            paragraph("In a cell"),
            paragraph("Education")
        );
        let doc = parse_body(&body);

        assert_eq!(doc.text(), "Experience\nEducation");
    }

    #[test]
    fn test_deleted_and_textbox_text_excluded() {
        let body = r#"<w:p><w:del><w:r><w:delText>old</w:delText></w:r></w:del><w:r><w:t>new</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#;
        let doc = parse_body(body);

        assert_eq!(doc.fragment_count(), 1);
        assert_eq!(doc.text(), "new");
    }

    #[test]
    fn test_missing_package_rels_uses_default_path() {
        let xml = document_xml(&paragraph("Only"));
        let bytes = build_docx(&[(DEFAULT_DOCUMENT_PATH, &xml)]);
        let doc = DocxParser::new().parse(Cursor::new(bytes), "cv.docx").unwrap();

        assert_eq!(doc.text(), "Only");
    }

    #[test]
    fn test_document_path_from_rels() {
        let rels = PACKAGE_RELS.replace("word/document.xml", "/word/document2.xml");
        let xml = document_xml(&paragraph("Relocated"));
        let bytes = build_docx(&[(PACKAGE_RELS_PATH, &rels), ("word/document2.xml", &xml)]);
        let doc = DocxParser::new().parse(Cursor::new(bytes), "cv.docx").unwrap();

        assert_eq!(doc.text(), "Relocated");
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxParser::new().parse(Cursor::new(b"%PDF-1.5 not a zip".to_vec()), "cv.docx");
        assert!(matches!(result, Err(Error::ZipError(_))));
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = build_docx(&[("word/styles.xml", "<w:styles/>")]);
        let result = DocxParser::new().parse(Cursor::new(bytes), "cv.docx");
        assert!(matches!(result, Err(Error::ZipError(_))));
    }

    #[test]
    fn test_malformed_document_xml() {
        let bytes = build_docx(&[(DEFAULT_DOCUMENT_PATH, "<w:document><w:body><w:p></w:body>")]);
        let result = DocxParser::new().parse(Cursor::new(bytes), "cv.docx");
        assert!(matches!(result, Err(Error::XmlError(_))));
    }
}

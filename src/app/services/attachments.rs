//! Files embedded in a PDF as attachments
//!
//! The NPL report carries its delimited export as an attachment. Attached
//! files are listed in the catalog's `/Names /EmbeddedFiles` name tree,
//! keyed by file name, each value a file specification whose `/EF /F`
//! stream holds the bytes.

use crate::{Error, Result};
use lopdf::{Dictionary, Document, Object};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name trees deeper than this are treated as malformed
const MAX_TREE_DEPTH: usize = 32;

/// One embedded file
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

/// Decode a PDF text string: UTF-16BE with a byte-order mark, else one byte per char
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Last path component of an attachment name, `None` if nothing usable remains
pub fn attachment_file_name(name: &str) -> Option<&str> {
    name.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    doc.dereference(object)
        .map(|(_, resolved)| resolved)
        .map_err(|e| Error::pdf("Unresolvable object reference", e))
}

fn resolve_dict<'a>(doc: &'a Document, object: &'a Object, what: &str) -> Result<&'a Dictionary> {
    resolve(doc, object)?
        .as_dict()
        .map_err(|e| Error::pdf(format!("{} is not a dictionary", what), e))
}

fn resolve_array<'a>(doc: &'a Document, object: &'a Object, what: &str) -> Result<&'a Vec<Object>> {
    resolve(doc, object)?
        .as_array()
        .map_err(|e| Error::pdf(format!("{} is not an array", what), e))
}

/// Root of the embedded-files name tree, if the document has one
fn embedded_files_root(doc: &Document) -> Result<Option<&Dictionary>> {
    let root = doc
        .trailer
        .get(b"Root")
        .map_err(|e| Error::pdf("Document has no catalog", e))?;
    let catalog = resolve_dict(doc, root, "Catalog")?;

    let Ok(names) = catalog.get(b"Names") else {
        return Ok(None);
    };
    let names = resolve_dict(doc, names, "Names dictionary")?;

    let Ok(files) = names.get(b"EmbeddedFiles") else {
        return Ok(None);
    };
    resolve_dict(doc, files, "EmbeddedFiles tree").map(Some)
}

fn embedded_bytes(doc: &Document, spec: &Dictionary, name: &str) -> Result<Vec<u8>> {
    let ef = spec
        .get(b"EF")
        .map_err(|e| Error::pdf(format!("Attachment {} has no embedded file", name), e))?;
    let ef = resolve_dict(doc, ef, "Embedded file dictionary")?;

    let file = ef
        .get(b"F")
        .or_else(|_| ef.get(b"UF"))
        .map_err(|e| Error::pdf(format!("Attachment {} has no file stream", name), e))?;
    let stream = resolve(doc, file)?
        .as_stream()
        .map_err(|e| Error::pdf(format!("Attachment {} is not a stream", name), e))?;

    if stream.dict.has(b"Filter") {
        stream
            .decompressed_content()
            .map_err(|e| Error::pdf(format!("Failed to decode attachment {}", name), e))
    } else {
        Ok(stream.content.clone())
    }
}

fn collect_name_tree(
    doc: &Document,
    node: &Dictionary,
    depth: usize,
    attachments: &mut Vec<Attachment>,
) -> Result<()> {
    if depth > MAX_TREE_DEPTH {
        return Err(Error::extraction_failed(
            "EmbeddedFiles name tree is nested too deeply",
        ));
    }

    if let Ok(kids) = node.get(b"Kids") {
        for kid in resolve_array(doc, kids, "Name tree Kids")? {
            let kid = resolve_dict(doc, kid, "Name tree node")?;
            collect_name_tree(doc, kid, depth + 1, attachments)?;
        }
    }

    if let Ok(names) = node.get(b"Names") {
        // Alternating key, file specification
        for pair in resolve_array(doc, names, "Name tree Names")?.chunks_exact(2) {
            let key = resolve(doc, &pair[0])?
                .as_str()
                .map_err(|e| Error::pdf("Embedded file key is not a string", e))?;
            let name = decode_pdf_string(key);
            let spec = resolve_dict(doc, &pair[1], "File specification")?;

            let data = embedded_bytes(doc, spec, &name)?;
            debug!("Found attachment {} ({} bytes)", name, data.len());
            attachments.push(Attachment { name, data });
        }
    }

    Ok(())
}

/// Read every embedded file of a PDF, in name-tree order
pub fn read_attachments(path: &Path) -> Result<Vec<Attachment>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let doc = Document::load(path)
        .map_err(|e| Error::pdf(format!("Failed to load {}", path.display()), e))?;

    let mut attachments = Vec::new();
    match embedded_files_root(&doc)? {
        Some(root) => collect_name_tree(&doc, root, 0, &mut attachments)?,
        None => debug!("{} has no embedded files", path.display()),
    }

    Ok(attachments)
}

/// Write every attachment of a PDF into `output_dir`, returning the written paths
///
/// Existing files of the same name are overwritten. Names are reduced to
/// their last path component.
pub fn extract_attachments(path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let attachments = read_attachments(path)?;

    fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(format!("Failed to create directory {}", output_dir.display()), e)
    })?;

    let mut written = Vec::with_capacity(attachments.len());
    for (index, attachment) in attachments.iter().enumerate() {
        let Some(file_name) = attachment_file_name(&attachment.name) else {
            warn!(
                "Skipping attachment {} with unusable name {:?}",
                index + 1,
                attachment.name
            );
            continue;
        };

        let output = output_dir.join(file_name);
        fs::write(&output, &attachment.data)
            .map_err(|e| Error::io(format!("Failed to write {}", output.display()), e))?;
        info!("Extracted attachment {}: {}", index + 1, output.display());
        written.push(output);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Stream, dictionary};
    use tempfile::TempDir;

    /// Save a one-page-tree PDF with the given files attached
    fn pdf_with_attachments(path: &Path, files: &[(&str, &[u8])], compress: bool) {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0_i64,
        });

        let mut names: Vec<Object> = Vec::new();
        for (name, data) in files {
            let mut stream = Stream::new(dictionary! { "Type" => "EmbeddedFile" }, data.to_vec());
            if compress {
                let _ = stream.compress();
            }
            let stream_id = doc.add_object(stream);
            let spec_id = doc.add_object(dictionary! {
                "Type" => "Filespec",
                "F" => Object::string_literal(*name),
                "EF" => dictionary! { "F" => stream_id },
            });
            names.push(Object::string_literal(*name));
            names.push(spec_id.into());
        }

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if !files.is_empty() {
            catalog.set(
                "Names",
                dictionary! { "EmbeddedFiles" => dictionary! { "Names" => names } },
            );
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        doc.save(path).unwrap();
    }

    #[test]
    fn test_embedded_files_extracted() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("npl.pdf");
        let export = b"REGION,STATE,SITE_NAME\n01,MA,Acme Landfill\n".repeat(20);
        pdf_with_attachments(
            &pdf,
            &[
                ("nplfinalbydate.txt", export.as_slice()),
                ("notes.txt", &b"as of 2025-11-10"[..]),
            ],
            true,
        );

        let out = dir.path().join("data");
        let written = extract_attachments(&pdf, &out).unwrap();

        assert_eq!(written, vec![out.join("nplfinalbydate.txt"), out.join("notes.txt")]);
        assert_eq!(fs::read(&written[0]).unwrap(), export);
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), "as of 2025-11-10");
    }

    #[test]
    fn test_pdf_without_attachments() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("plain.pdf");
        pdf_with_attachments(&pdf, &[], false);

        assert!(read_attachments(&pdf).unwrap().is_empty());
        assert!(extract_attachments(&pdf, dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_attachment_names_cannot_escape_output_dir() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("npl.pdf");
        pdf_with_attachments(&pdf, &[("../../evil.txt", &b"x"[..]), ("..", &b"y"[..])], false);

        let out = dir.path().join("out");
        let written = extract_attachments(&pdf, &out).unwrap();
        assert_eq!(written, vec![out.join("evil.txt")]);
    }

    #[test]
    fn test_attachment_file_name() {
        assert_eq!(attachment_file_name("nplfinalbydate.txt"), Some("nplfinalbydate.txt"));
        assert_eq!(attachment_file_name("C:\\exports\\npl.txt"), Some("npl.txt"));
        assert_eq!(attachment_file_name("dir/"), None);
        assert_eq!(attachment_file_name(".."), None);
    }

    #[test]
    fn test_decode_pdf_string() {
        assert_eq!(decode_pdf_string(b"npl.txt"), "npl.txt");
        assert_eq!(decode_pdf_string(b"Cata\xf1o.txt"), "Cata\u{f1}o.txt");
        assert_eq!(decode_pdf_string(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0xF1]), "A\u{f1}");
    }

    #[test]
    fn test_missing_pdf() {
        let err = read_attachments(Path::new("/nonexistent/npl.pdf")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_unreadable_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf").unwrap();

        let err = read_attachments(&path).unwrap_err();
        assert!(matches!(err, Error::Pdf { .. }));
    }
}

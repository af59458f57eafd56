// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document codec adapter — load PDF bytes into a page-addressable document,
// copy page subsets between documents, and serialise back to bytes, using
// the `lopdf` crate.

use std::collections::{HashMap, HashSet};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, SaveOptions, Stream, dictionary};
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, instrument, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed page trees whose /Parent chain loops.
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when a page carries no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Resource name of the full-page image on rasterised pages.
const PAGE_IMAGE_NAME: &[u8] = b"Im0";

/// Structural encoding used when serialising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Classic cross-reference table, every object written on its own.
    Plain,
    /// Objects grouped into compressed object streams with an xref stream.
    #[default]
    ObjectStreams,
}

/// A loaded, read-only source PDF.
pub struct SourceDocument {
    document: Document,
    /// Page object ids in page order.
    page_ids: Vec<ObjectId>,
    /// Size of the bytes the document was loaded from.
    byte_len: usize,
}

impl SourceDocument {
    /// Parse PDF bytes.
    ///
    /// Documents encrypted with an empty user password are decrypted in
    /// memory and their /Encrypt entry is dropped, so every output written
    /// from them is a plain copy. Documents that need a password fail with
    /// `Parse`.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data)
            .map_err(|err| SeitenwerkError::Parse(format!("failed to load PDF: {}", err)))?;

        if document.is_encrypted() {
            if document.encryption_state.is_none() {
                return Err(SeitenwerkError::Parse(
                    "document is password protected".to_string(),
                ));
            }
            warn!("document is encrypted with an empty password, writing a decrypted copy");
            drop_encryption(&mut document);
        }

        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        let declared = declared_page_count(&document);
        if page_ids.is_empty() && declared > 0 {
            return Err(SeitenwerkError::Parse(format!(
                "page tree declares {} pages but none could be read",
                declared
            )));
        }
        debug!(pages = page_ids.len(), "PDF loaded");

        Ok(Self {
            document,
            page_ids,
            byte_len: data.len(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Size in bytes of the buffer this document was parsed from.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Give up the page index and hand back the underlying document, e.g. to
    /// rewrite it in place.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Object id of the page at a 0-based index.
    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            SeitenwerkError::PdfError(format!(
                "page index {} out of range (document has {} pages)",
                index,
                self.page_ids.len()
            ))
        })
    }

    /// Displayed size of a page in PDF points, with /Rotate applied.
    pub fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        let page_id = self.page_id(index)?;
        let (width, height) = inherited_attribute(&self.document, page_id, b"MediaBox")
            .and_then(|object| resolve(&self.document, object))
            .and_then(|object| rect_size(&self.document, object))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let rotation = inherited_attribute(&self.document, page_id, b"Rotate")
            .and_then(|object| object.as_i64().ok())
            .unwrap_or(0)
            .rem_euclid(360);

        if rotation == 90 || rotation == 270 {
            Ok((height, width))
        } else {
            Ok((width, height))
        }
    }
}

/// A page copied into an [`OutputDocument`] but not yet placed in its page
/// tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedPage {
    id: ObjectId,
}

/// A fresh document that engines append pages to.
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::create()
    }
}

impl OutputDocument {
    /// An empty document: catalog plus a page tree with no kids.
    pub fn create() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Copy pages (0-based indices, in the given order) from `source` into
    /// this document. The copies are not part of the page tree until passed
    /// to [`OutputDocument::add_page`].
    ///
    /// Objects shared between the copied pages are copied once. References to
    /// source pages outside `indices` become `null`.
    #[instrument(skip_all, fields(requested = indices.len()))]
    pub fn copy_pages(
        &mut self,
        source: &SourceDocument,
        indices: &[usize],
    ) -> Result<Vec<CopiedPage>> {
        let page_ids = indices
            .iter()
            .map(|&index| source.page_id(index))
            .collect::<Result<Vec<_>>>()?;

        let mut copier = ObjectCopier::new(&source.document, &source.page_ids);
        for &page_id in &page_ids {
            copier.reserve(&mut self.document, page_id);
        }

        let mut copied = Vec::with_capacity(page_ids.len());
        let mut seen = HashSet::new();
        for &page_id in &page_ids {
            let id = if seen.insert(page_id) {
                copier.copy_page(&mut self.document, page_id)?
            } else {
                let existing = copier.reserve(&mut self.document, page_id);
                self.duplicate_page(existing)?
            };
            copied.push(CopiedPage { id });
        }

        debug!(copied = copied.len(), "pages copied");
        Ok(copied)
    }

    /// Append a copied page to the end of the page tree.
    pub fn add_page(&mut self, page: CopiedPage) -> Result<()> {
        let pages_id = self.pages_id;

        let page_dict = self
            .document
            .get_object_mut(page.id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| {
                SeitenwerkError::PdfError(format!("copied page {:?} missing: {}", page.id, err))
            })?;
        page_dict.set("Parent", Object::Reference(pages_id));

        let pages = self
            .document
            .get_object_mut(pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| SeitenwerkError::PdfError(format!("page tree missing: {}", err)))?;
        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => kids.push(Object::Reference(page.id)),
            _ => {
                return Err(SeitenwerkError::PdfError(
                    "page tree has no /Kids array".to_string(),
                ));
            }
        }
        self.page_count += 1;
        pages.set("Count", self.page_count as i64);
        Ok(())
    }

    /// Copy and append in one step, preserving the order of `indices`.
    pub fn append_pages(&mut self, source: &SourceDocument, indices: &[usize]) -> Result<()> {
        for page in self.copy_pages(source, indices)? {
            self.add_page(page)?;
        }
        Ok(())
    }

    /// Append a page whose only content is a JPEG image covering the whole
    /// page.
    pub fn add_image_page(
        &mut self,
        jpeg: Vec<u8>,
        pixel_width: u32,
        pixel_height: u32,
        width_pt: f32,
        height_pt: f32,
    ) -> Result<()> {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => pixel_width as i64,
                "Height" => pixel_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false);
        let image_id = self.document.add_object(image);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width_pt.into(),
                        0.into(),
                        0.into(),
                        height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(PAGE_IMAGE_NAME.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|err| {
            SeitenwerkError::PdfError(format!("failed to encode page content: {}", err))
        })?;
        let content_id = self.document.add_object(Stream::new(Dictionary::new(), encoded));

        let mut xobjects = Dictionary::new();
        xobjects.set(PAGE_IMAGE_NAME.to_vec(), Object::Reference(image_id));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });

        self.add_page(CopiedPage { id: page_id })
    }

    /// Serialise the document.
    pub fn save(&mut self, mode: SaveMode) -> Result<Vec<u8>> {
        save_document(&mut self.document, mode)
    }

    /// Give the already-copied page dictionary a second identity so the same
    /// source page can appear twice.
    fn duplicate_page(&mut self, existing: ObjectId) -> Result<ObjectId> {
        let object = self.document.get_object(existing).cloned().map_err(|err| {
            SeitenwerkError::PdfError(format!("cannot duplicate page {:?}: {}", existing, err))
        })?;
        Ok(self.document.add_object(object))
    }
}

/// Remove the /Encrypt trailer entry and its dictionary from a document whose
/// objects are already decrypted.
fn drop_encryption(document: &mut Document) {
    if let Some(Object::Reference(id)) = document.trailer.remove(b"Encrypt") {
        document.objects.remove(&id);
    }
    document.encryption_state = None;
}

/// /Count of the root page tree node, 0 when it cannot be read.
fn declared_page_count(document: &Document) -> i64 {
    document
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .and_then(|id| document.get_dictionary(id))
        .and_then(|pages| pages.get(b"Count"))
        .and_then(Object::as_i64)
        .unwrap_or(0)
}

/// Serialise any lopdf document under the given mode.
pub fn save_document(document: &mut Document, mode: SaveMode) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    match mode {
        SaveMode::Plain => document.save_to(&mut output).map_err(|err| {
            SeitenwerkError::Serialize(format!("plain save failed: {}", err))
        })?,
        SaveMode::ObjectStreams => {
            let options = SaveOptions::builder()
                .use_object_streams(true)
                .use_xref_streams(true)
                .build();
            document
                .save_with_options(&mut output, options)
                .map_err(|err| {
                    SeitenwerkError::Serialize(format!("object-stream save failed: {}", err))
                })?
        }
    }
    debug!(?mode, output_bytes = output.len(), "document serialised");
    Ok(output)
}

// -- Object graph copying -----------------------------------------------------

/// Copies objects from one document into another, remembering every
/// reference it has already copied so shared resources are written once and
/// reference cycles terminate.
struct ObjectCopier<'a> {
    source: &'a Document,
    source_pages: HashSet<ObjectId>,
    mapped: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, source_pages: &[ObjectId]) -> Self {
        Self {
            source,
            source_pages: source_pages.iter().copied().collect(),
            mapped: HashMap::new(),
        }
    }

    /// Target id for a source object, allocating one on first use.
    fn reserve(&mut self, target: &mut Document, source_id: ObjectId) -> ObjectId {
        *self
            .mapped
            .entry(source_id)
            .or_insert_with(|| target.new_object_id())
    }

    fn copy_page(&mut self, target: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
        let source = self.source;
        let page = source.get_dictionary(page_id).map_err(|err| {
            SeitenwerkError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
        })?;

        let mut copy = Dictionary::new();
        for (key, value) in page.iter() {
            // The target's own page tree becomes the parent.
            if key.as_slice() == b"Parent" {
                continue;
            }
            let value = self.copy_object(target, value);
            copy.set(key.clone(), value);
        }

        for key in INHERITABLE_KEYS {
            if copy.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page_id, key) {
                let value = self.copy_object(target, value);
                copy.set(key.to_vec(), value);
            }
        }

        let new_id = self.reserve(target, page_id);
        target.objects.insert(new_id, Object::Dictionary(copy));
        Ok(new_id)
    }

    fn copy_object(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(target, *id),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(target, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(target, dict)),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dictionary(target, &stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            let value = self.copy_object(target, value);
            copy.set(key.clone(), value);
        }
        copy
    }

    fn copy_reference(&mut self, target: &mut Document, id: ObjectId) -> Object {
        if let Some(&mapped) = self.mapped.get(&id) {
            return Object::Reference(mapped);
        }
        // Links to pages we are not copying would pull in the whole source.
        if self.source_pages.contains(&id) {
            return Object::Null;
        }

        let source = self.source;
        let object = match source.get_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?id, %err, "cannot resolve reference, using null");
                return Object::Null;
            }
        };

        let new_id = target.new_object_id();
        self.mapped.insert(id, new_id);
        let copy = self.copy_object(target, object);
        target.objects.insert(new_id, copy);
        Object::Reference(new_id)
    }
}

// -- Page tree helpers --------------------------------------------------------

/// Look up `key` on a page, walking up /Parent links for inherited values.
fn inherited_attribute<'a>(
    document: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent_id = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = document.get_dictionary(parent_id).ok()?;
    }
    None
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Width and height of a PDF rectangle `[x1 y1 x2 y2]`.
fn rect_size(document: &Document, object: &Object) -> Option<(f32, f32)> {
    let values = object.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut coords = [0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = resolve(document, value)?.as_float().ok()?;
    }
    let width = (coords[2] - coords[0]).abs();
    let height = (coords[3] - coords[1]).abs();
    if width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encrypted_pdf, page_contents, page_widths, sample_pdf};

    #[test]
    fn loads_page_count() {
        let source = SourceDocument::load(&sample_pdf(4)).unwrap();
        assert_eq!(source.page_count(), 4);
        assert!(source.byte_len() > 0);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = SourceDocument::load(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, SeitenwerkError::Parse(_)));
    }

    #[test]
    fn password_protected_document_is_a_parse_error() {
        let err = SourceDocument::load(&encrypted_pdf(3, "secret")).err().unwrap();
        assert!(matches!(err, SeitenwerkError::Parse(msg) if msg.contains("password")));
    }

    #[test]
    fn empty_password_document_loads_decrypted() {
        let source = SourceDocument::load(&encrypted_pdf(3, "")).unwrap();
        assert_eq!(source.page_count(), 3);

        let document = source.into_document();
        assert!(!document.is_encrypted());
        assert!(document.trailer.get(b"Encrypt").is_err());
    }

    #[test]
    fn copies_from_empty_password_document_are_readable() {
        let source = SourceDocument::load(&encrypted_pdf(2, "")).unwrap();
        let mut output = OutputDocument::create();
        output.append_pages(&source, &[1, 0]).unwrap();
        let bytes = output.save(SaveMode::Plain).unwrap();

        let contents = page_contents(&bytes);
        assert!(contents[0].contains("(Page 2) Tj"));
        assert!(contents[1].contains("(Page 1) Tj"));
    }

    #[test]
    fn unreadable_page_tree_is_a_parse_error() {
        let mut document = Document::load_mem(&sample_pdf(2)).unwrap();
        let pages_id = document
            .catalog()
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap();
        document
            .get_object_mut(pages_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set("Kids", Vec::<Object>::new());
        let mut bytes = Vec::new();
        document.save_to(&mut bytes).unwrap();

        let err = SourceDocument::load(&bytes).err().unwrap();
        assert!(matches!(err, SeitenwerkError::Parse(msg) if msg.contains("declares 2 pages")));
    }

    #[test]
    fn empty_output_saves_and_reloads() {
        let mut output = OutputDocument::create();
        let bytes = output.save(SaveMode::Plain).unwrap();
        let reloaded = SourceDocument::load(&bytes).unwrap();
        assert_eq!(reloaded.page_count(), 0);
    }

    #[test]
    fn copy_preserves_requested_order() {
        let source = SourceDocument::load(&sample_pdf(5)).unwrap();
        let mut output = OutputDocument::create();
        output.append_pages(&source, &[4, 0, 2]).unwrap();
        assert_eq!(output.page_count(), 3);

        let bytes = output.save(SaveMode::default()).unwrap();
        assert_eq!(page_widths(&bytes), vec![105.0, 101.0, 103.0]);
    }

    #[test]
    fn copied_page_is_not_placed_until_added() {
        let source = SourceDocument::load(&sample_pdf(2)).unwrap();
        let mut output = OutputDocument::create();
        let copied = output.copy_pages(&source, &[1]).unwrap();
        assert_eq!(output.page_count(), 0);
        output.add_page(copied[0]).unwrap();
        assert_eq!(output.page_count(), 1);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let source = SourceDocument::load(&sample_pdf(2)).unwrap();
        let mut output = OutputDocument::create();
        let err = output.copy_pages(&source, &[2]).unwrap_err();
        assert!(matches!(err, SeitenwerkError::PdfError(_)));
    }

    #[test]
    fn duplicate_indices_produce_distinct_pages() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        let mut output = OutputDocument::create();
        output.append_pages(&source, &[1, 1]).unwrap();
        let bytes = output.save(SaveMode::Plain).unwrap();
        assert_eq!(page_widths(&bytes), vec![102.0, 102.0]);
    }

    #[test]
    fn shared_font_is_copied_once() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        let mut output = OutputDocument::create();
        output.append_pages(&source, &[0, 1, 2]).unwrap();
        let bytes = output.save(SaveMode::Plain).unwrap();

        let reloaded = Document::load_mem(&bytes).unwrap();
        let fonts = reloaded
            .objects
            .values()
            .filter(|object| {
                object
                    .as_dict()
                    .ok()
                    .and_then(|dict| dict.get(b"Type").ok())
                    .and_then(|ty| ty.as_name().ok())
                    == Some(b"Font".as_slice())
            })
            .count();
        assert_eq!(fonts, 1);
    }

    #[test]
    fn inherited_media_box_is_materialised() {
        let source = SourceDocument::load(&crate::test_support::inherited_media_box_pdf()).unwrap();
        assert_eq!(source.page_size(0).unwrap(), (300.0, 400.0));

        let mut output = OutputDocument::create();
        output.append_pages(&source, &[0]).unwrap();
        let bytes = output.save(SaveMode::Plain).unwrap();
        let reloaded = SourceDocument::load(&bytes).unwrap();
        assert_eq!(reloaded.page_size(0).unwrap(), (300.0, 400.0));
    }

    #[test]
    fn both_save_modes_reload() {
        let source = SourceDocument::load(&sample_pdf(3)).unwrap();
        let mut output = OutputDocument::create();
        output.append_pages(&source, &[0, 1, 2]).unwrap();

        for mode in [SaveMode::Plain, SaveMode::ObjectStreams] {
            let bytes = output.save(mode).unwrap();
            assert_eq!(SourceDocument::load(&bytes).unwrap().page_count(), 3);
        }
    }

    #[test]
    fn image_page_has_requested_size() {
        let mut output = OutputDocument::create();
        output
            .add_image_page(crate::test_support::tiny_jpeg(), 4, 4, 200.0, 300.0)
            .unwrap();
        let bytes = output.save(SaveMode::ObjectStreams).unwrap();
        let reloaded = SourceDocument::load(&bytes).unwrap();
        assert_eq!(reloaded.page_count(), 1);
        assert_eq!(reloaded.page_size(0).unwrap(), (200.0, 300.0));
    }
}

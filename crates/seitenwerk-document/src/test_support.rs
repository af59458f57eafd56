// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory PDF fixtures for unit tests.
//
// Page N (1-based) of `sample_pdf` is `100 + N` points wide, so tests can read
// page order back from the MediaBox widths of an output document.

use lopdf::content::{Content, Operation};
use lopdf::{
    Dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream,
    dictionary,
};

use crate::pdf::codec::SourceDocument;

/// An `n`-page PDF whose pages share one font object.
pub fn sample_pdf(page_count: usize) -> Vec<u8> {
    sample_pdf_with_info(page_count, false)
}

/// Like [`sample_pdf`], optionally carrying a populated /Info dictionary.
pub fn sample_pdf_with_info(page_count: usize, with_info: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for number in 1..=page_count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![10.into(), 10.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {}", number))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("fixture content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (100 + number as i64).into(), 200.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if with_info {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Quarterly report, final draft"),
            "Author" => Object::string_literal("Someone Who Writes Long Author Names"),
            "Subject" => Object::string_literal("Numbers"),
            "Keywords" => Object::string_literal("finance, quarterly, internal, draft"),
            "Producer" => Object::string_literal("An Editor That Injects Metadata 12.3.4"),
            "Creator" => Object::string_literal("Some Word Processor"),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture saves");
    bytes
}

/// [`sample_pdf`] encrypted with RC4-128 under `user_password`. An empty
/// user password gives a permissions-only document anyone can open.
pub fn encrypted_pdf(page_count: usize, user_password: &str) -> Vec<u8> {
    let mut doc = Document::load_mem(&sample_pdf(page_count)).expect("fixture reloads");
    let file_id = Object::string_literal(b"seitenwerk-fixture".to_vec());
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    })
    .expect("encryption state builds");
    doc.encrypt(&state).expect("fixture encrypts");

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture saves");
    bytes
}

/// Decoded content stream of every page, in page order.
pub fn page_contents(pdf: &[u8]) -> Vec<String> {
    let document = Document::load_mem(pdf).expect("output reloads");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let content = document.get_page_content(page_id).expect("page has content");
            String::from_utf8_lossy(&content).into_owned()
        })
        .collect()
}

/// One page whose MediaBox (300 x 400) lives only on the /Pages node.
pub fn inherited_media_box_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 300.into(), 400.into()],
            "Resources" => Dictionary::new(),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture saves");
    bytes
}

/// MediaBox widths of every page, in page order.
pub fn page_widths(pdf: &[u8]) -> Vec<f32> {
    let source = SourceDocument::load(pdf).expect("output reloads");
    (0..source.page_count())
        .map(|index| source.page_size(index).expect("page has a size").0)
        .collect()
}

/// A 4x4 grey JPEG.
pub fn tiny_jpeg() -> Vec<u8> {
    let image = ::image::RgbImage::from_pixel(4, 4, ::image::Rgb([128, 128, 128]));
    let mut buffer = Vec::new();
    let encoder = ::image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 80);
    image.write_with_encoder(encoder).expect("jpeg encodes");
    buffer
}

//! # File Scanning Round Trips
//!
//! These tests build complete synthetic storage units on disk, byte by
//! byte, and drive the public `File` handle through them: label reading,
//! sequential indexing, chain assembly across visible record boundaries,
//! trailer stripping, the encrypted-segment gate, and the equivalence of
//! handle-level and standalone parsing.

use std::io::Write;

use dlis::{parse_eflr, Bookmark, CollectSink, DlisError, File, Layout, Obname, Value};

// segment attribute bytes, MSB first:
// eflr 0x80, predecessor 0x40, successor 0x20, encrypted 0x10,
// checksum 0x04, trailing length 0x02, padding 0x01
const EFLR: u8 = 0x80;
const EFLR_SUCC: u8 = 0xA0;
const EFLR_PRED: u8 = 0xC0;
const IFLR: u8 = 0x00;

fn sul_bytes(id: &str) -> Vec<u8> {
    let mut label = String::from("   1V1.00RECORD 8192");
    for _ in 0..(60 - id.len()) {
        label.push(' ');
    }
    label.push_str(id);
    assert_eq!(label.len(), 80);
    label.into_bytes()
}

fn segment(attrs: u8, record_type: u8, body: &[u8]) -> Vec<u8> {
    let mut out = ((body.len() + 4) as u16).to_be_bytes().to_vec();
    out.push(attrs);
    out.push(record_type);
    out.extend_from_slice(body);
    out
}

fn visible_record_v(segments: &[Vec<u8>], version: u8) -> Vec<u8> {
    let payload: usize = segments.iter().map(|s| s.len()).sum();
    let mut out = ((payload + 4) as u16).to_be_bytes().to_vec();
    out.push(0xFF);
    out.push(version);
    for seg in segments {
        out.extend_from_slice(seg);
    }
    out
}

fn visible_record(segments: &[Vec<u8>]) -> Vec<u8> {
    visible_record_v(segments, 1)
}

fn write_file(chunks: &[&[u8]]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for chunk in chunks {
        file.write_all(chunk).unwrap();
    }
    file.flush().unwrap();
    file
}

fn ident_bytes(s: &str) -> Vec<u8> {
    let mut out = vec![s.len() as u8];
    out.extend_from_slice(s.as_bytes());
    out
}

/// SET "FILE" "MAIN" / template [DESCR] / object (0,0,EXT) DESCR="NAME".
fn minimal_eflr_payload() -> Vec<u8> {
    let mut payload = vec![0xF8];
    payload.extend(ident_bytes("FILE"));
    payload.extend(ident_bytes("MAIN"));
    payload.push(0x30);
    payload.extend(ident_bytes("DESCR"));
    payload.push(0x70);
    payload.extend([0x00, 0x00]); // obname origin 0, copy 0
    payload.extend(ident_bytes("EXT"));
    payload.push(0x21);
    payload.extend(ident_bytes("NAME"));
    payload
}

#[test]
fn storage_unit_label_fields() {
    let fixture = write_file(&[&sul_bytes("storage-id")]);
    let mut file = File::open(fixture.path()).unwrap();

    let sul = file.sul().unwrap();
    assert_eq!(sul.sequence, 1);
    assert_eq!(sul.version(), "1.0");
    assert_eq!(sul.layout, Layout::Record);
    assert_eq!(sul.maxlen, 8192);
    assert_eq!(sul.id, "storage-id");
}

#[test]
fn sequential_indexing_traverses_the_whole_file() {
    let eflr_payload = minimal_eflr_payload();
    let vr1 = visible_record(&[
        segment(EFLR, 0, &eflr_payload),
        segment(IFLR, 1, &[0u8; 12]),
    ]);
    let vr2 = visible_record(&[segment(IFLR, 1, &[1u8; 20])]);
    let fixture = write_file(&[&sul_bytes("storage-id"), &vr1, &vr2]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let mut residual = 0;
    let mut bookmarks = Vec::new();
    while !file.eof().unwrap() {
        let (bookmark, next) = file.index_next(residual).unwrap();
        residual = next;
        bookmarks.push(bookmark);
    }

    assert_eq!(bookmarks.len(), 3);
    assert_eq!(residual, 0);

    // the first record starts at the first visible record label
    assert_eq!(
        bookmarks[0],
        Bookmark {
            position: 80,
            residual: 0,
            is_eflr: true
        }
    );

    // the second starts inside VR1: a residual bookmark points at a
    // segment header, not a label
    let first_segment_len = (4 + eflr_payload.len()) as u64;
    assert_eq!(bookmarks[1].position, 80 + 4 + first_segment_len);
    assert_eq!(bookmarks[1].residual, 16);
    assert!(!bookmarks[1].is_eflr);

    // the third opens VR2
    assert_eq!(bookmarks[2].residual, 0);
    assert!(!bookmarks[2].is_eflr);
}

#[test]
fn chains_cross_visible_record_boundaries() {
    let vr1 = visible_record(&[segment(EFLR_SUCC, 0, b"hello, ")]);
    let vr2 = visible_record(&[segment(EFLR_PRED, 0, b"world"), segment(IFLR, 1, b"tail")]);
    let fixture = write_file(&[&sul_bytes("chains"), &vr1, &vr2]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let (bookmark, residual) = file.index_next(0).unwrap();
    assert_eq!(bookmark.position, 80);
    assert!(bookmark.is_eflr);
    // the chain ends inside VR2 with the tail record still unread
    assert_eq!(residual, 8);

    let record = file.assemble(&bookmark).unwrap();
    assert_eq!(record.data, b"hello, world");
    assert!(record.is_eflr);

    // indexing resumes mid-VR and drains the file
    let (tail, residual) = file.index_next(residual).unwrap();
    assert_eq!(tail.residual, 8);
    assert_eq!(residual, 0);
    assert!(file.eof().unwrap());
}

#[test]
fn assembly_strips_all_three_trailers() {
    // wire body: payload, pad bytes (count byte included in its count),
    // checksum, trailing length copy
    let mut body = b"ABCDEF".to_vec();
    body.extend([0xEE, 0xEE, 0x03]);
    body.extend([0xBE, 0xEF]);
    body.extend([0x00, 0x11]);
    let vr = visible_record(&[segment(EFLR | 0x07, 0, &body)]);
    let fixture = write_file(&[&sul_bytes("trailers"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let (bookmark, _) = file.index_next(0).unwrap();
    let record = file.assemble(&bookmark).unwrap();
    assert_eq!(record.data, b"ABCDEF");
}

#[test]
fn padding_only_drops_counted_bytes() {
    let mut body = b"payload!".to_vec();
    body.extend([0xAA, 0xAA, 0x03]);
    let vr = visible_record(&[segment(EFLR | 0x01, 0, &body)]);
    let fixture = write_file(&[&sul_bytes("padding"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let (bookmark, _) = file.index_next(0).unwrap();
    assert_eq!(file.assemble(&bookmark).unwrap().data, b"payload!");
}

#[test]
fn zero_pad_count_is_framing() {
    // the pad count includes its own byte, so zero is malformed and must
    // not leak the count byte into the payload
    let mut body = b"payload!".to_vec();
    body.push(0x00);
    let vr = visible_record(&[segment(EFLR | 0x01, 0, &body)]);
    let fixture = write_file(&[&sul_bytes("zeropad"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let (bookmark, _) = file.index_next(0).unwrap();
    let err = file.assemble(&bookmark).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DlisError>(),
        Some(DlisError::Framing(_))
    ));
}

#[test]
fn encrypted_segments_need_opt_in() {
    let vr = visible_record(&[segment(EFLR | 0x10, 0, b"secret01")]);
    let fixture = write_file(&[&sul_bytes("locked"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();
    let (bookmark, _) = file.index_next(0).unwrap();

    let err = file.assemble(&bookmark).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DlisError>(),
        Some(DlisError::Encrypted)
    ));

    // raw retrieval preserves the undecoded bytes
    let record = file.assemble_raw(&bookmark).unwrap();
    assert_eq!(record.data, b"secret01");
}

#[test]
fn successor_disagreeing_on_formatting_fails() {
    let vr = visible_record(&[
        segment(EFLR_SUCC, 0, b"aaaa"),
        segment(0x40, 0, b"bbbb"), // predecessor set, eflr clear
    ]);
    let fixture = write_file(&[&sul_bytes("mismatch"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let err = file.index_next(0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DlisError>(),
        Some(DlisError::ChainMismatch)
    ));
}

#[test]
fn segment_overrunning_its_visible_record_fails() {
    // the label admits 4 payload bytes, the segment claims 12
    let bytes: &[u8] = &[0x00, 0x08, 0xFF, 0x01, 0x00, 0x0C, 0x80, 0x00];
    let fixture = write_file(&[&sul_bytes("overrun"), bytes]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    let err = file.index_next(0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DlisError>(),
        Some(DlisError::Framing(_))
    ));
}

#[test]
fn truncation_is_never_recovered() {
    // the segment claims a 24-byte body but the file ends after 4
    let bytes: &[u8] = &[
        0x00, 0x20, 0xFF, 0x01, // VRL: 28 payload bytes
        0x00, 0x1C, 0x80, 0x00, // LRSH: 24-byte body
        0x00, 0x00, 0x00, 0x00,
    ];
    let fixture = write_file(&[&sul_bytes("truncated"), bytes]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();

    // indexing merely seeks, so the hole is only hit on assembly
    let (bookmark, _) = file.index_next(0).unwrap();
    let err = file.assemble(&bookmark).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DlisError>(),
        Some(DlisError::UnexpectedEof(_))
    ));
}

#[test]
fn handle_parse_matches_standalone_parse() {
    let payload = minimal_eflr_payload();
    let vr = visible_record(&[segment(EFLR, 0, &payload)]);
    let fixture = write_file(&[&sul_bytes("equivalence"), &vr]);

    let mut file = File::open(fixture.path()).unwrap();
    file.sul().unwrap();
    let (bookmark, _) = file.index_next(0).unwrap();

    let assembled = file.assemble(&bookmark).unwrap();
    assert_eq!(assembled.data, payload);

    let direct = parse_eflr(&assembled.data).unwrap();
    let via_handle = file.parse_eflr(&bookmark).unwrap();

    assert_eq!(direct.set_type, via_handle.set_type);
    assert_eq!(direct.set_name, via_handle.set_name);
    assert_eq!(direct.template, via_handle.template);
    assert_eq!(direct.invariants, via_handle.invariants);
    assert_eq!(direct.objects(), via_handle.objects());

    let row = via_handle.object(&Obname::new(0, 0, "EXT")).unwrap();
    assert_eq!(
        row.attribute("DESCR").unwrap().scalar(),
        Some(&Value::Text("NAME".into()))
    );
}

#[test]
fn mapped_and_stream_sources_agree() {
    let payload = minimal_eflr_payload();
    let vr1 = visible_record(&[segment(EFLR_SUCC, 0, &payload[..10])]);
    let vr2 = visible_record(&[segment(EFLR_PRED, 0, &payload[10..])]);
    let fixture = write_file(&[&sul_bytes("mapped"), &vr1, &vr2]);

    let mut stream = File::open(fixture.path()).unwrap();
    let mut mapped = File::open_mapped(fixture.path()).unwrap();

    assert_eq!(stream.sul().unwrap(), mapped.sul().unwrap());

    let (b1, r1) = stream.index_next(0).unwrap();
    let (b2, r2) = mapped.index_next(0).unwrap();
    assert_eq!(b1, b2);
    assert_eq!(r1, r2);

    let from_stream = stream.assemble(&b1).unwrap();
    let from_map = mapped.assemble(&b2).unwrap();
    assert_eq!(from_stream, from_map);
    assert_eq!(from_stream.data, payload);

    assert!(stream.eof().unwrap());
    assert!(mapped.eof().unwrap());
}

#[test]
fn version_two_visible_records_warn_but_index() {
    let vr = visible_record_v(&[segment(EFLR, 0, &minimal_eflr_payload())], 2);
    let fixture = write_file(&[&sul_bytes("vintage"), &vr]);

    let sink = CollectSink::new();
    let mut file = File::with_sink(fixture.path(), Box::new(sink.clone())).unwrap();
    file.sul().unwrap();

    let (bookmark, _) = file.index_next(0).unwrap();
    assert!(bookmark.is_eflr);
    assert_eq!(sink.warnings().len(), 1);
    assert!(sink.warnings()[0].contains("version 2"));
}

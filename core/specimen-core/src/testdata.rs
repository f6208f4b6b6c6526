//! Synthetic OpenType buffers for tests.
//!
//! Only std is used here so the file can be pulled into integration tests
//! with `#[path]` as well as compiled as a unit-test module.
#![allow(dead_code)]

pub type Table = ([u8; 4], Vec<u8>);

pub struct NameEntry {
    pub platform: u16,
    pub encoding: u16,
    pub language: u16,
    pub name_id: u16,
    pub bytes: Vec<u8>,
}

pub struct Instance {
    pub subfamily_name_id: u16,
    pub coords: Vec<i32>,
    pub postscript_name_id: Option<u16>,
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Windows / Unicode BMP / en-US record.
pub fn win_name(name_id: u16, text: &str) -> NameEntry {
    NameEntry {
        platform: 3,
        encoding: 1,
        language: 0x409,
        name_id,
        bytes: utf16(text),
    }
}

/// Macintosh / Roman / English record.
pub fn mac_name(name_id: u16, bytes: &[u8]) -> NameEntry {
    NameEntry {
        platform: 1,
        encoding: 0,
        language: 0,
        name_id,
        bytes: bytes.to_vec(),
    }
}

pub fn name_table(version: u16, entries: &[NameEntry]) -> Vec<u8> {
    let lang_tag_len = if version == 1 { 2 } else { 0 };
    let storage = 6 + entries.len() * 12 + lang_tag_len;

    let mut out = Vec::new();
    push16(&mut out, version);
    push16(&mut out, entries.len() as u16);
    push16(&mut out, storage as u16);

    let mut strings = Vec::new();
    for entry in entries {
        push16(&mut out, entry.platform);
        push16(&mut out, entry.encoding);
        push16(&mut out, entry.language);
        push16(&mut out, entry.name_id);
        push16(&mut out, entry.bytes.len() as u16);
        push16(&mut out, strings.len() as u16);
        strings.extend_from_slice(&entry.bytes);
    }
    if version == 1 {
        push16(&mut out, 0);
    }
    out.extend_from_slice(&strings);
    out
}

pub fn fvar_table(axis_count: u16, instances: &[Instance], with_postscript: bool) -> Vec<u8> {
    const AXIS_SIZE: u16 = 20;
    let instance_size = axis_count * 4 + if with_postscript { 6 } else { 4 };

    let mut out = Vec::new();
    push16(&mut out, 1);
    push16(&mut out, 0);
    push16(&mut out, 16);
    push16(&mut out, 2);
    push16(&mut out, axis_count);
    push16(&mut out, AXIS_SIZE);
    push16(&mut out, instances.len() as u16);
    push16(&mut out, instance_size);

    for _ in 0..axis_count {
        out.extend_from_slice(b"wght");
        out.extend_from_slice(&[0; AXIS_SIZE as usize - 4]);
    }
    for instance in instances {
        push16(&mut out, instance.subfamily_name_id);
        push16(&mut out, 0);
        for coord in &instance.coords {
            out.extend_from_slice(&coord.to_be_bytes());
        }
        if with_postscript {
            push16(&mut out, instance.postscript_name_id.unwrap_or(0xFFFF));
        }
    }
    out
}

/// A single-font `\0\x01\0\0` file holding `tables`.
pub fn sfnt(tables: &[Table]) -> Vec<u8> {
    assemble(&[tables], 0).1
}

/// A `ttcf` collection with one table directory per entry of `fonts`.
pub fn collection(fonts: &[&[Table]]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let (offsets, mut out) = assemble(fonts, header_len);
    out[0..4].copy_from_slice(b"ttcf");
    out[4..8].copy_from_slice(&0x0001_0000u32.to_be_bytes());
    out[8..12].copy_from_slice(&(fonts.len() as u32).to_be_bytes());
    for (i, offset) in offsets.iter().enumerate() {
        let at = 12 + i * 4;
        out[at..at + 4].copy_from_slice(&offset.to_be_bytes());
    }
    out
}

/// Family/style-only font, the most common fixture.
pub fn simple_font(family: &str, style: &str) -> Vec<u8> {
    let name = name_table(1, &[win_name(1, family), win_name(2, style)]);
    sfnt(&[(*b"name", name)])
}

fn assemble(fonts: &[&[Table]], header_len: usize) -> (Vec<u32>, Vec<u8>) {
    let mut offsets = Vec::with_capacity(fonts.len());
    let mut cursor = header_len;
    for tables in fonts {
        offsets.push(cursor as u32);
        cursor += 12 + 16 * tables.len();
    }

    let mut out = vec![0u8; cursor];
    for (tables, &dir) in fonts.iter().zip(&offsets) {
        let dir = dir as usize;
        out[dir..dir + 4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        out[dir + 4..dir + 6].copy_from_slice(&(tables.len() as u16).to_be_bytes());
        for (i, (tag, data)) in tables.iter().enumerate() {
            let offset = out.len();
            out.extend_from_slice(data);
            while out.len() % 4 != 0 {
                out.push(0);
            }
            let rec = dir + 12 + i * 16;
            out[rec..rec + 4].copy_from_slice(tag);
            out[rec + 8..rec + 12].copy_from_slice(&(offset as u32).to_be_bytes());
            out[rec + 12..rec + 16].copy_from_slice(&(data.len() as u32).to_be_bytes());
        }
    }
    (offsets, out)
}

fn push16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

//! Program loaders.
//!
//! This module populates memory from a program image and records the entry
//! point and layout the core starts from. It provides:
//! 1. **ELF loading:** The authoritative loader; parses a 32-bit RISC-V ELF
//!    image, copies its loadable segments into memory, and reports the
//!    entry point.
//! 2. **Listing loading:** Reads a disassembly listing of address-prefixed
//!    hex words, using the `<main>:` symbol line as the entry point.
//! 3. **Map loading:** Reads linker-map section lines into the memory
//!    layout descriptor (which drives the initial stack pointer fallback).
//!
//! ELF images are little-endian on disk; program words are re-encoded into
//! the memory's internal byte order on ingest, so instruction fetch reads
//! them back intact.

use std::fs;

use object::{Architecture, Object, ObjectSection, ObjectSegment, SectionKind};

use crate::common::error::SimError;
use crate::memory::{Memory, Segment};

/// Loads a 32-bit RISC-V ELF image into memory.
///
/// Copies every PT_LOAD segment, fills the layout descriptor from the
/// section table, and records the ELF entry point. Regions a segment does
/// not cover stay zero, which also covers `.bss`.
///
/// # Arguments
///
/// * `mem` - The memory to populate.
/// * `path` - Path to the ELF file.
pub fn load_elf(mem: &mut Memory, path: &str) -> Result<(), SimError> {
    let data = fs::read(path)
        .map_err(|e| SimError::Loader(format!("could not read '{}': {}", path, e)))?;
    let file = object::File::parse(&*data)
        .map_err(|e| SimError::Loader(format!("bad ELF '{}': {}", path, e)))?;

    if file.architecture() != Architecture::Riscv32 {
        return Err(SimError::Loader(format!(
            "'{}' is not a 32-bit RISC-V image ({:?})",
            path,
            file.architecture()
        )));
    }

    for segment in file.segments() {
        let addr = to_u32(segment.address())?;
        let bytes = segment
            .data()
            .map_err(|e| SimError::Loader(format!("bad segment in '{}': {}", path, e)))?;
        write_program_bytes(mem, addr, bytes)?;
    }

    let mut layout = *mem.layout();
    for section in file.sections() {
        let seg = Segment {
            start: to_u32(section.address())?,
            size: to_u32(section.size())?,
        };
        match section.kind() {
            SectionKind::Text => layout.text = seg,
            SectionKind::Data => layout.data = seg,
            SectionKind::UninitializedData => layout.bss = seg,
            _ => {}
        }
    }
    mem.set_layout(layout);
    mem.set_entry_point(to_u32(file.entry())?);
    Ok(())
}

/// Loads a disassembly listing of address-prefixed hex words.
///
/// The line containing `<main>:` supplies the entry point; every following
/// `address: word` line stores one instruction word. Lines that do not
/// match the shape are skipped, as listings interleave labels and
/// mnemonics with the words.
pub fn load_listing(mem: &mut Memory, path: &str) -> Result<(), SimError> {
    let text = fs::read_to_string(path)
        .map_err(|e| SimError::Loader(format!("could not read '{}': {}", path, e)))?;

    let mut lines = text.lines();
    let mut entry = None;
    for line in lines.by_ref() {
        if line.contains("<main>:") {
            let addr_hex = line.split_whitespace().next().unwrap_or("");
            entry = u32::from_str_radix(addr_hex, 16).ok();
            break;
        }
    }
    let entry =
        entry.ok_or_else(|| SimError::Loader(format!("no <main> symbol in '{}'", path)))?;

    for line in lines {
        if line.is_empty() || line.contains("<main>") {
            continue;
        }
        let Some((prefix, rest)) = line.split_once(':') else {
            continue;
        };
        let Ok(addr) = u32::from_str_radix(prefix.trim(), 16) else {
            continue;
        };
        let Some(word_hex) = rest.split_whitespace().next() else {
            continue;
        };
        if word_hex.len() != 8 {
            continue;
        }
        let Ok(word) = u32::from_str_radix(word_hex, 16) else {
            continue;
        };
        mem.store_word(addr, word)
            .map_err(|e| SimError::Loader(format!("listing word outside memory: {}", e)))?;
    }

    mem.set_entry_point(entry);
    Ok(())
}

/// Loads linker-map section lines into the layout descriptor.
///
/// Recognizes `.text`, `.data`, `.bss`, and `.stack` lines of the form
/// `.name 0xSTART 0xSIZE`; everything else in the map is ignored.
pub fn load_map(mem: &mut Memory, path: &str) -> Result<(), SimError> {
    let text = fs::read_to_string(path)
        .map_err(|e| SimError::Loader(format!("could not read '{}': {}", path, e)))?;

    let mut layout = *mem.layout();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let (Some(name), Some(start), Some(size)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        let (Some(start), Some(size)) = (parse_hex(start), parse_hex(size)) else {
            continue;
        };
        let seg = Segment { start, size };
        match name {
            ".text" => layout.text = seg,
            ".data" => layout.data = seg,
            ".bss" => layout.bss = seg,
            ".stack" => layout.stack = seg,
            _ => {}
        }
    }

    mem.set_layout(layout);
    Ok(())
}

/// Writes little-endian program bytes into memory's internal byte order.
///
/// Whole words are re-encoded through the word codec; a trailing partial
/// word is stored byte-by-byte.
fn write_program_bytes(mem: &mut Memory, addr: u32, bytes: &[u8]) -> Result<(), SimError> {
    let mut chunks = bytes.chunks_exact(4);
    let mut at = addr;
    for chunk in chunks.by_ref() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        mem.store_word(at, word)
            .map_err(|_| image_too_large(addr, bytes.len()))?;
        at = at.wrapping_add(4);
    }
    for &byte in chunks.remainder() {
        mem.store_byte(at, byte)
            .map_err(|_| image_too_large(addr, bytes.len()))?;
        at = at.wrapping_add(1);
    }
    Ok(())
}

fn image_too_large(addr: u32, len: usize) -> SimError {
    SimError::Loader(format!(
        "segment at {:#010x} ({} bytes) does not fit in memory",
        addr, len
    ))
}

fn to_u32(v: u64) -> Result<u32, SimError> {
    u32::try_from(v).map_err(|_| SimError::Loader(format!("address {:#x} exceeds 32 bits", v)))
}

fn parse_hex(s: &str) -> Option<u32> {
    u32::from_str_radix(s.strip_prefix("0x")?, 16).ok()
}

use crate::cpu::InstructionDecoder;
use crate::notation;
use crate::profile::{Language, ProfileId};
use crate::resolver::ProfileRegistry;
use anyhow::{Result, anyhow, bail};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Instruction,
    /// Byte the decoder could not turn into an instruction.
    Data,
    Notation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub mnemonic: String,
    pub operand: String,
    pub comment: String,
    pub kind: LineKind,
}

impl ListingLine {
    fn data(address: u16, byte: u8) -> Self {
        Self {
            address,
            bytes: vec![byte],
            mnemonic: ".BYTE".to_string(),
            operand: format!("${:02X}", byte),
            comment: String::new(),
            kind: LineKind::Data,
        }
    }
}

impl std::fmt::Display for ListingLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LineKind::Instruction | LineKind::Data => {
                let line = format!(
                    "{:04X}  {} {}       {}",
                    self.address, self.mnemonic, self.operand, self.comment
                );
                write!(f, "{}", line.trim_end())
            }
            LineKind::Notation => {
                let bytes: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
                write!(
                    f,
                    "{:04X}  {}       {}",
                    self.address,
                    bytes.join(" "),
                    self.comment
                )
            }
        }
    }
}

/// Byte ranges covered by a scan from `start` to `end`.
///
/// `end < start` wraps around the end of the buffer. Bounds past the buffer
/// are clamped.
pub fn scan_segments(len: usize, start: usize, end: usize) -> Vec<Range<usize>> {
    let clamp = |bound: usize, name: &str| {
        if bound > len {
            log::warn!(
                "Scan {} {} is past the end of the buffer ({} bytes), clamping",
                name,
                bound,
                len
            );
            len
        } else {
            bound
        }
    };
    let start = clamp(start, "start");
    let end = clamp(end, "end");

    if start == end {
        Vec::new()
    } else if start < end {
        vec![start..end]
    } else {
        vec![start..len, 0..end]
    }
}

/// The bytes of a scan laid out in scan order, so a wrapped region decodes
/// across the end of the buffer.
pub fn scan_region(buffer: &[u8], start: usize, end: usize) -> Vec<u8> {
    scan_segments(buffer.len(), start, end)
        .into_iter()
        .flat_map(|segment| buffer[segment].iter().copied())
        .collect()
}

/// Produces annotated listings of a buffer, either as CPU instructions or as
/// Sidplayer notation.
pub struct ListingScanner<'a> {
    registry: &'a ProfileRegistry,
    profile: ProfileId,
    language: Language,
}

impl<'a> ListingScanner<'a> {
    pub fn new(registry: &'a ProfileRegistry, profile: ProfileId, language: Language) -> Self {
        Self {
            registry,
            profile,
            language,
        }
    }

    /// Disassembles `start..end` (see [`scan_region`]), `pc` being the
    /// address of the byte at `start`. Instructions never run past `end`.
    pub fn scan_instructions(
        &self,
        decoder: &dyn InstructionDecoder,
        buffer: &[u8],
        start: usize,
        end: usize,
        pc: u16,
    ) -> Result<Vec<ListingLine>> {
        let cpu = self
            .registry
            .get(&self.profile)
            .map(|p| p.cpu)
            .ok_or_else(|| anyhow!("Unknown profile {}", self.profile))?;
        if cpu != decoder.cpu() {
            bail!(
                "Profile {} runs on the {} but the decoder handles the {}",
                self.profile,
                cpu,
                decoder.cpu()
            );
        }

        let region = scan_region(buffer, start, end);
        let mut lines = Vec::new();
        let mut pc = pc;
        let mut pos = 0;
        for _ in 0..region.len() {
            if pos >= region.len() {
                break;
            }
            let line = match decoder.decode(&region, pos, pc) {
                Some(decoded) => {
                    let comment = self
                        .registry
                        .resolve(&self.profile, &decoded.operand, self.language)
                        .unwrap_or_default();
                    let width = decoded.width.clamp(1, region.len() - pos);
                    ListingLine {
                        address: pc,
                        bytes: region[pos..pos + width].to_vec(),
                        mnemonic: decoded.mnemonic.to_string(),
                        operand: decoded.operand_text,
                        comment: comment.to_string(),
                        kind: LineKind::Instruction,
                    }
                }
                None => ListingLine::data(pc, region[pos]),
            };
            pos += line.bytes.len();
            pc = pc.wrapping_add(line.bytes.len() as u16);
            lines.push(line);
        }

        log::debug!(
            "Scanned {} lines for {} ({})",
            lines.len(),
            self.profile,
            self.language
        );
        Ok(lines)
    }
}

/// Decodes `start..end` as a Sidplayer voice, two bytes per line.
pub fn scan_notation(buffer: &[u8], start: usize, end: usize, pc: u16) -> Vec<ListingLine> {
    let region = scan_region(buffer, start, end);
    let mut lines = Vec::new();
    let mut pc = pc;
    let mut pos = 0;
    for _ in 0..region.len() {
        if pos >= region.len() {
            break;
        }
        let token = notation::decode_token(&region, pos);
        let width = token.width.clamp(1, region.len() - pos);
        lines.push(ListingLine {
            address: pc,
            bytes: region[pos..pos + width].to_vec(),
            mnemonic: String::new(),
            operand: String::new(),
            comment: token.text,
            kind: LineKind::Notation,
        });
        pos += width;
        pc = pc.wrapping_add(width as u16);
    }
    lines
}

pub fn render(lines: &[ListingLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&line.to_string());
        output.push('\n');
    }
    output
}

/// Splits a PRG image into its load address and payload.
pub fn split_prg(data: &[u8]) -> Result<(u16, &[u8])> {
    match data {
        [lo, hi, payload @ ..] => Ok((u16::from_le_bytes([*lo, *hi]), payload)),
        _ => bail!("PRG file too short: {} bytes", data.len()),
    }
}

//! Decoder for Sidplayer music data.
//!
//! A voice is a stream of two-byte cells. When the low two bits of the first
//! byte are clear the cell is a note or rest with packed duration, dot, tie,
//! octave, pitch and accidental fields; otherwise it is a command, decoded in
//! [`commands`].

pub mod commands;

/// Text emitted for anything that doesn't decode.
pub const UNKNOWN: &str = "???";

/// Bytes in one cell.
pub const CELL_SIZE: usize = 2;

const DURATIONS: [(u8, &str); 6] = [
    (1, "WHOLE"),
    (2, "HALF"),
    (3, "QUARTER"),
    (4, "EIGHTH"),
    (5, "SIXTEENTH"),
    (6, "THIRTY-SECOND"),
];

// Octave bits are stored inverted.
const OCTAVES: [u8; 8] = [7, 6, 5, 4, 3, 2, 1, 0];

const NOTES: [&str; 8] = ["", "C", "D", "E", "F", "G", "A", "B"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub text: String,
    pub width: usize,
}

/// Decodes one cell. Pure: the same bytes always give the same text.
pub fn decode_cell(b1: u8, b2: u8) -> String {
    if b1 & 0x03 == 0 {
        decode_note(b1, b2)
    } else {
        commands::decode_command(b1, b2)
    }
}

/// Decodes the cell at `pos`. A lone trailing byte is reported as unknown and
/// consumed, so a caller advancing by `width` always makes progress.
pub fn decode_token(buffer: &[u8], pos: usize) -> DecodedToken {
    match buffer.get(pos..pos + CELL_SIZE) {
        Some(&[b1, b2]) => DecodedToken {
            text: decode_cell(b1, b2),
            width: CELL_SIZE,
        },
        _ => DecodedToken {
            text: UNKNOWN.to_string(),
            width: buffer.len().saturating_sub(pos).max(1),
        },
    }
}

fn decode_note(b1: u8, b2: u8) -> String {
    if b1 == 0 {
        return "ABSOLUTE SET".to_string();
    }

    let duration = duration_text(b1);
    let note = b2 & 0x07;
    if note == 0 {
        return format!("REST {}", duration);
    }

    let octave = OCTAVES[((b2 & 0x38) >> 3) as usize];
    format!(
        "{}{}-{}  {}",
        NOTES[note as usize],
        accidental(note, b2),
        octave,
        duration
    )
}

fn duration_text(b1: u8) -> String {
    match b1 & 0xBF {
        0x04 => return "UTILITY".to_string(),
        0x24 => return "UTILITY VOICE".to_string(),
        _ => {}
    }

    let dot = match b1 & 0xA0 {
        0xA0 => "DOUBLE DOTTED ",
        0x20 => "DOTTED ",
        0x00 => "",
        _ => return UNKNOWN.to_string(),
    };

    // A plain sixteenth bit pattern means sixty-fourth.
    let base = if b1 & 0x3C == 20 {
        Some("SIXTY-FOURTH")
    } else {
        let code = (b1 & 0x1C) >> 2;
        DURATIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    };
    let Some(base) = base else {
        return UNKNOWN.to_string();
    };

    let tie = if b1 & 0x40 != 0 { "TIED" } else { "" };
    format!("{} {}{}", base, dot, tie)
}

fn accidental(note: u8, b2: u8) -> &'static str {
    // Double accidental first, the explicit field overrides it.
    let provisional = match note {
        2 | 4 | 5 => "##",
        3 | 6 | 7 => "bb",
        _ => "",
    };
    match b2 & 0xC0 {
        0x40 => "#",
        0x80 => "b",
        0xC0 => "",
        _ => provisional,
    }
}

#[cfg(test)]
mod tests;

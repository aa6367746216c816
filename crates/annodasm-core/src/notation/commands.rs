use super::UNKNOWN;

/// Jiffies per quarter for each `TEMPO` index (`b2 >> 3`): 1800 / index,
/// with index 0 standing for 32.
const TEMPOS: [u16; 32] = [
    56, 1800, 900, 600, 450, 360, 300, 257, 225, 200, 180, 164, 150, 138, 129, 120, 113, 106, 100,
    95, 90, 86, 82, 78, 75, 72, 69, 67, 64, 62, 60, 58,
];

// Volume/effects command (b1 = 0x01), low nibble 0x8 of b2.
const SWITCHES: [&str; 16] = [
    "WAVEFORM: NOISE",
    "WAVEFORM: TRIANGLE",
    "WAVEFORM: SAWTOOTH",
    "WAVEFORM: PULSE",
    "SYNC: ON",
    "SYNC: OFF",
    "RING: ON",
    "RING: OFF",
    "FILTER: MODE OFF",
    "FILTER: MODE LOW",
    "FILTER: MODE BAND",
    "FILTER: MODE LOW+BAND",
    "FILTER: MODE HIGH",
    "FILTER: MODE LOW+HIGH",
    "FILTER: MODE BAND+HIGH",
    "FILTER: MODE ALL",
];

// Volume/effects command (b1 = 0x01), low nibble 0x0 of b2.
const FLAGS: [&str; 16] = [
    "FILTER: THROUGH ON",
    "FILTER: THROUGH OFF",
    "FILTER: EXTERNAL ON",
    "FILTER: EXTERNAL OFF",
    "VOLUME: BUMP UP",
    "VOLUME: BUMP DOWN",
    "PHRASE: END",
    "MUSIC: HALT",
    "SOURCE: NONE",
    "SOURCE: OSCILLATOR 3",
    "SOURCE: ENVELOPE 3",
    "DESTINATION: NONE",
    "DESTINATION: PITCH",
    "DESTINATION: PULSE WIDTH",
    "DESTINATION: FILTER CUTOFF",
    "VOICE 3: OFF",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Unsigned,
    Signed,
    /// Signed, flagged with " ???" when negative.
    SignedChecked,
    Offset(i32),
    /// Measure number, `b2` plus a 256-multiple picked by the opcode.
    Measure(u16),
}

const PARAMETER_COMMANDS: [(u8, &str, Param); 22] = [
    (0x36, "HOLD: SET", Param::Unsigned),
    (0x26, "UTILITY: DURATION", Param::Unsigned),
    (0x4E, "FILTER: CUTOFF", Param::Unsigned),
    (0x56, "TRANSPOSE: HALF STEPS", Param::Signed),
    (0xC6, "PULSE VIBRATO: DEPTH", Param::SignedChecked),
    (0xD6, "VIBRATO: DEPTH", Param::SignedChecked),
    (0x76, "FILTER VIBRATO: DEPTH", Param::SignedChecked),
    (0x86, "AUTO FILTER: SWEEP", Param::SignedChecked),
    (0x96, "AUTO PULSE: SWEEP", Param::Signed),
    (0x0E, "REPEAT: TIMES", Param::Unsigned),
    (0x66, "FILTER: CUTOFF BUMP", Param::Signed),
    (0x6E, "DETUNE: BUMP", Param::Signed),
    (0xE6, "SCALE: SET", Param::Offset(1)),
    (0x1E, "MEASURE:", Param::Measure(0)),
    (0x5E, "MEASURE:", Param::Measure(256)),
    (0x9E, "MEASURE:", Param::Measure(512)),
    (0xDE, "MEASURE:", Param::Measure(768)),
    (0xF6, "VIBRATO: RATE", Param::Unsigned),
    (0x46, "PULSE VIBRATO: RATE", Param::Unsigned),
    (0xB6, "FILTER VIBRATO: RATE", Param::Unsigned),
    (0xA6, "MAX VOLUME: SET", Param::Unsigned),
    (0x2E, "FLAG: SET", Param::Unsigned),
];

/// Decodes a command cell (`b1 & 0x03 != 0`).
///
/// Exact opcodes are tried first, then the bitmask matches in their fixed
/// order. The first mask that matches wins even when later ones would too.
pub fn decode_command(b1: u8, b2: u8) -> String {
    let text = match b1 {
        0x06 => tempo(b2),
        0x01 => effect(b2),
        _ => parameter(b1, b2).or_else(|| masked(b1, b2)),
    };
    text.unwrap_or_else(|| UNKNOWN.to_string())
}

fn tempo(b2: u8) -> Option<String> {
    if b2 & 0x07 != 0 {
        return None;
    }
    Some(format!("TEMPO: SET {}", TEMPOS[(b2 >> 3) as usize]))
}

fn effect(b2: u8) -> Option<String> {
    let level = b2 >> 4;
    let text = match b2 & 0x0F {
        0x0E => format!("VOLUME: SET {}", level),
        0x06 => format!("ATTACK: SET {}", level),
        0x0A => format!("DECAY: SET {}", level),
        0x02 => format!("SUSTAIN: SET {}", level),
        0x0C => format!("RELEASE: SET {}", level),
        0x04 => format!("RESONANCE: SET {}", level),
        0x01 => format!("PHRASE: DEFINE {}", level),
        0x03 => format!("PHRASE: CALL {}", level),
        0x05 | 0x0D => format!("LFO RATE: DOWN {}", b2 >> 3),
        0x07 | 0x0F => format!("LFO RATE: UP {}", b2 >> 3),
        0x08 => SWITCHES[level as usize].to_string(),
        0x00 => FLAGS[level as usize].to_string(),
        _ => return None,
    };
    Some(text)
}

fn parameter(b1: u8, b2: u8) -> Option<String> {
    let (_, label, param) = PARAMETER_COMMANDS.iter().find(|(op, _, _)| *op == b1)?;
    let text = match param {
        Param::Unsigned => format!("{} {}", label, b2),
        Param::Signed => format!("{} {}", label, b2 as i8),
        Param::SignedChecked => {
            let warning = if b2 & 0x80 != 0 { " ???" } else { "" };
            format!("{} {}{}", label, b2 as i8, warning)
        }
        Param::Offset(offset) => format!("{} {}", label, b2 as i32 + offset),
        Param::Measure(base) => format!("{} {}", label, base + b2 as u16),
    };
    Some(text)
}

fn masked(b1: u8, b2: u8) -> Option<String> {
    let (hi, lo) = (b1 as u16, b2 as u16);

    if b1 & 0x0F == 0x02 {
        return Some(format!("PULSE WIDTH: SET {}", ((hi & 0xF0) << 4) | lo));
    }
    if b1 & 0x03 == 0x03 {
        return Some(format!("PORTAMENTO: SET {}", ((hi & 0xFC) << 6) | lo));
    }
    match b1 & 0x1F {
        0x1A => {
            let value = (((hi & 0xE0) << 3) | lo) as i32 - 2048;
            return Some(format!("DETUNE: SET {}", value));
        }
        0x0A => return Some(format!("DETUNE: SET {}", ((hi & 0xE0) << 3) | lo)),
        _ => {}
    }
    if b1 & 0x30 == 0x30 {
        let value = (((hi & 0xC0) << 2) | lo) as i32 - 200;
        return Some(format!("JIFFY LENGTH: SET {}", value));
    }
    None
}

use super::*;

#[test]
fn test_absolute_set_ignores_second_byte() {
    for b2 in [0x00, 0x01, 0x7F, 0x80, 0xFF] {
        assert_eq!(decode_cell(0x00, b2), "ABSOLUTE SET");
    }
}

#[test]
fn test_tempo() {
    assert_eq!(decode_cell(0x06, 0x00), "TEMPO: SET 56");
    assert_eq!(decode_cell(0x06, 0x08), "TEMPO: SET 1800");
    assert_eq!(decode_cell(0x06, 0x10), "TEMPO: SET 900");
    assert_eq!(decode_cell(0x06, 0xF8), "TEMPO: SET 58");
    // Low bits must be clear.
    assert_eq!(decode_cell(0x06, 0x01), UNKNOWN);
}

#[test]
fn test_volume_and_effects() {
    assert_eq!(decode_cell(0x01, 0x0E), "VOLUME: SET 0");
    assert_eq!(decode_cell(0x01, 0xFE), "VOLUME: SET 15");
    assert_eq!(decode_cell(0x01, 0x36), "ATTACK: SET 3");
    assert_eq!(decode_cell(0x01, 0x38), "WAVEFORM: PULSE");
    assert_eq!(decode_cell(0x01, 0x60), "PHRASE: END");
    assert_eq!(decode_cell(0x01, 0x0F), "LFO RATE: UP 1");
    assert_eq!(decode_cell(0x01, 0x0B), UNKNOWN);
}

#[test]
fn test_quarter_note() {
    // Quarter, no dot, no tie; octave 3, C natural.
    assert_eq!(decode_cell(0x0C, 0xE1), "C-3  QUARTER ");
}

#[test]
fn test_durations() {
    let cases = [
        (0x04, "UTILITY"),
        (0x24, "UTILITY VOICE"),
        (0x08, "HALF "),
        (0x10, "EIGHTH "),
        (0x14, "SIXTY-FOURTH "),
        (0x18, "THIRTY-SECOND "),
        (0x34, "SIXTEENTH DOTTED "),
        (0xAC, "QUARTER DOUBLE DOTTED "),
        (0x4C, "QUARTER TIED"),
        (0x8C, UNKNOWN),
        (0x1C, UNKNOWN),
    ];
    for (b1, duration) in cases {
        assert_eq!(
            decode_cell(b1, 0xE1),
            format!("C-3  {}", duration),
            "b1 = {:02X}",
            b1
        );
    }
}

#[test]
fn test_rest() {
    assert_eq!(decode_cell(0x0C, 0x00), "REST QUARTER ");
    assert_eq!(decode_cell(0x0C, 0xF8), "REST QUARTER ");
}

#[test]
fn test_octaves_are_inverted() {
    assert_eq!(decode_cell(0x0C, 0xC1), "C-7  QUARTER ");
    assert_eq!(decode_cell(0x0C, 0xF9), "C-0  QUARTER ");
}

#[test]
fn test_accidentals() {
    // With no explicit accidental D, F and G default to double sharp.
    assert_eq!(decode_cell(0x0C, 0x22), "D##-3  QUARTER ");
    assert_eq!(decode_cell(0x0C, 0x25), "G##-3  QUARTER ");
    // E, A and B default to double flat.
    assert_eq!(decode_cell(0x0C, 0x23), "Ebb-3  QUARTER ");
    assert_eq!(decode_cell(0x0C, 0x27), "Bbb-3  QUARTER ");
    // C has no double accidental.
    assert_eq!(decode_cell(0x0C, 0x21), "C-3  QUARTER ");
    // The explicit field wins.
    assert_eq!(decode_cell(0x0C, 0x62), "D#-3  QUARTER ");
    assert_eq!(decode_cell(0x0C, 0xA2), "Db-3  QUARTER ");
    assert_eq!(decode_cell(0x0C, 0xE2), "D-3  QUARTER ");
}

#[test]
fn test_signed_parameters() {
    assert!(decode_cell(0xC6, 0x80).contains(" ???"));
    assert!(!decode_cell(0xC6, 0x7F).contains(" ???"));
    assert_eq!(decode_cell(0xC6, 0x80), "PULSE VIBRATO: DEPTH -128 ???");
    assert_eq!(decode_cell(0xD6, 0x05), "VIBRATO: DEPTH 5");
    // Signed but never flagged.
    assert_eq!(decode_cell(0x56, 0xFF), "TRANSPOSE: HALF STEPS -1");
    assert_eq!(decode_cell(0x96, 0x80), "AUTO PULSE: SWEEP -128");
}

#[test]
fn test_parameter_commands() {
    assert_eq!(decode_cell(0x36, 0xFF), "HOLD: SET 255");
    assert_eq!(decode_cell(0x0E, 0x03), "REPEAT: TIMES 3");
    assert_eq!(decode_cell(0xE6, 0x00), "SCALE: SET 1");
    assert_eq!(decode_cell(0x1E, 0x05), "MEASURE: 5");
    assert_eq!(decode_cell(0x5E, 0x05), "MEASURE: 261");
    assert_eq!(decode_cell(0x9E, 0x05), "MEASURE: 517");
    assert_eq!(decode_cell(0xDE, 0xFF), "MEASURE: 1023");
}

#[test]
fn test_masked_commands() {
    assert_eq!(decode_cell(0x32, 0x10), "PULSE WIDTH: SET 784");
    assert_eq!(decode_cell(0x3B, 0x00), "PORTAMENTO: SET 3584");
    assert_eq!(decode_cell(0x3A, 0x00), "DETUNE: SET -1792");
    assert_eq!(decode_cell(0x0A, 0x05), "DETUNE: SET 5");
    assert_eq!(decode_cell(0x31, 0xC8), "JIFFY LENGTH: SET 0");
    assert_eq!(decode_cell(0xF1, 0x00), "JIFFY LENGTH: SET 568");
    assert_eq!(decode_cell(0x05, 0x00), UNKNOWN);
}

#[test]
fn test_mask_order() {
    // 0x32 also satisfies the jiffy mask; pulse width is checked first.
    assert!(decode_cell(0x32, 0x00).starts_with("PULSE WIDTH"));
    // 0x3B satisfies portamento and jiffy.
    assert!(decode_cell(0x3B, 0x00).starts_with("PORTAMENTO"));
    // 0x3A satisfies detune and jiffy.
    assert!(decode_cell(0x3A, 0x00).starts_with("DETUNE"));
}

#[test]
fn test_decode_is_pure() {
    for b1 in 0..=u8::MAX {
        for b2 in [0x00, 0x55, 0x80, 0xFF] {
            let text = decode_cell(b1, b2);
            assert!(!text.is_empty());
            assert_eq!(text, decode_cell(b1, b2));
        }
    }
}

#[test]
fn test_decode_token() {
    let buffer = [0x06, 0x08, 0x0C, 0xE1, 0x01];
    assert_eq!(
        decode_token(&buffer, 0),
        DecodedToken {
            text: "TEMPO: SET 1800".to_string(),
            width: 2
        }
    );
    assert_eq!(decode_token(&buffer, 2).text, "C-3  QUARTER ");

    let tail = decode_token(&buffer, 4);
    assert_eq!(tail.text, UNKNOWN);
    assert_eq!(tail.width, 1);

    assert_eq!(decode_token(&buffer, 10).width, 1);
}

use annodasm_core::cpu::{AddressingMode, Cpu, InstructionDecoder, Mos6502Decoder, get_opcodes};
use std::collections::HashSet;

#[test]
fn test_documented_opcode_count() {
    let opcodes = get_opcodes();
    assert_eq!(opcodes.len(), 256);
    assert_eq!(opcodes.iter().flatten().count(), 151);
}

#[test]
fn test_opcode_sizes_match_modes() {
    for (byte, opcode) in get_opcodes().iter().enumerate() {
        if let Some(op) = opcode {
            assert_eq!(
                op.size,
                op.mode.operand_size() + 1,
                "${:02X} {} has the wrong size",
                byte,
                op.mnemonic
            );
        }
    }
}

#[test]
fn test_mnemonics() {
    let mnemonics: HashSet<&str> = get_opcodes().iter().flatten().map(|op| op.mnemonic).collect();
    // 56 documented instructions.
    assert_eq!(mnemonics.len(), 56);
    for m in ["LDA", "STA", "JSR", "RTS", "BNE", "BIT", "JMP", "NOP", "BRK"] {
        assert!(mnemonics.contains(m), "missing {}", m);
    }
}

#[test]
fn test_no_8048_modes_in_6502_table() {
    for op in get_opcodes().iter().flatten() {
        assert!(!matches!(
            op.mode,
            AddressingMode::CallAddress | AddressingMode::RegisterA | AddressingMode::Unknown
        ));
    }
}

#[test]
fn test_decode_operand_text() {
    let decoder = Mos6502Decoder::new();
    let cases: [(&[u8], &str, &str); 10] = [
        (&[0xA9, 0x01], "LDA", "#$01"),
        (&[0xA5, 0xFB], "LDA", "$FB"),
        (&[0xB5, 0x10], "LDA", "$10,X"),
        (&[0xB6, 0x10], "LDX", "$10,Y"),
        (&[0xBD, 0x00, 0x04], "LDA", "$0400,X"),
        (&[0xB9, 0x00, 0x04], "LDA", "$0400,Y"),
        (&[0x6C, 0xFC, 0xFF], "JMP", "($FFFC)"),
        (&[0xA1, 0x20], "LDA", "($20,X)"),
        (&[0xB1, 0xFB], "LDA", "($FB),Y"),
        (&[0x0A], "ASL", "A"),
    ];
    for (bytes, mnemonic, operand) in cases {
        let decoded = decoder.decode(bytes, 0, 0x1000).unwrap();
        assert_eq!(decoded.mnemonic, mnemonic);
        assert_eq!(decoded.operand_text, operand);
        assert_eq!(decoded.width, bytes.len());
    }
}

#[test]
fn test_decode_at_offset() {
    let decoder = Mos6502Decoder::new();
    let code = [0xEA, 0x20, 0xD2, 0xFF];
    let decoded = decoder.decode(&code, 1, 0x0801).unwrap();
    assert_eq!(decoded.mnemonic, "JSR");
    assert_eq!(decoded.operand.address, 0xFFD2);
    assert_eq!(decoded.operand.mode, AddressingMode::Absolute);
}

#[test]
fn test_branch_target_wraps() {
    let decoder = Mos6502Decoder::new();
    // BPL +$10 from $FFF8 lands past $FFFF.
    let decoded = decoder.decode(&[0x10, 0x10], 0, 0xFFF8).unwrap();
    assert_eq!(decoded.operand.address, 0x000A);
}

#[test]
fn test_eligibility_per_cpu() {
    let all = [
        AddressingMode::Implied,
        AddressingMode::Accumulator,
        AddressingMode::Immediate,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::Relative,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::Indirect,
        AddressingMode::IndirectX,
        AddressingMode::IndirectY,
        AddressingMode::CallAddress,
        AddressingMode::RegisterA,
        AddressingMode::Unknown,
    ];
    let mos: Vec<AddressingMode> = all
        .iter()
        .copied()
        .filter(|m| Cpu::Mos6502.annotates(*m))
        .collect();
    assert_eq!(mos.len(), 9);
    assert!(!mos.contains(&AddressingMode::Immediate));
    assert!(!mos.contains(&AddressingMode::Relative));

    let intel: Vec<AddressingMode> = all
        .iter()
        .copied()
        .filter(|m| Cpu::Intel8048.annotates(*m))
        .collect();
    assert_eq!(intel, vec![AddressingMode::CallAddress]);
}

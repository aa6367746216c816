use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    // 8048: page-relative CALL/JMP target
    CallAddress,
    // 8048: accumulator as explicit operand
    RegisterA,
    Unknown,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode (6502 encoding).
    pub fn operand_size(&self) -> u8 {
        match self {
            AddressingMode::Implied
            | AddressingMode::Accumulator
            | AddressingMode::RegisterA
            | AddressingMode::Unknown => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::CallAddress => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// CPU family of a platform. Decides which operands can carry a memory comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cpu {
    Mos6502,
    Intel8048,
}

impl Cpu {
    /// Returns true when an operand in `mode` references memory that a
    /// comment table can describe.
    pub fn annotates(&self, mode: AddressingMode) -> bool {
        match self {
            Cpu::Mos6502 => matches!(
                mode,
                AddressingMode::ZeroPage
                    | AddressingMode::ZeroPageX
                    | AddressingMode::ZeroPageY
                    | AddressingMode::Absolute
                    | AddressingMode::AbsoluteX
                    | AddressingMode::AbsoluteY
                    | AddressingMode::Indirect
                    | AddressingMode::IndirectX
                    | AddressingMode::IndirectY
            ),
            Cpu::Intel8048 => mode == AddressingMode::CallAddress,
        }
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cpu::Mos6502 => write!(f, "6502"),
            Cpu::Intel8048 => write!(f, "8048"),
        }
    }
}

/// The operand of a decoded instruction, as seen by the comment resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub mode: AddressingMode,
    /// Effective address referenced (branch target for relative mode).
    pub address: u16,
    /// Raw operand value as encoded in the instruction.
    pub value: u16,
}

impl Operand {
    pub fn new(mode: AddressingMode, address: u16, value: u16) -> Self {
        Self {
            mode,
            address,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub mnemonic: &'static str,
    pub operand: Operand,
    pub operand_text: String,
    pub width: usize,
}

/// Seam to the opcode decoder of a CPU family.
///
/// Implementations must not keep a cursor of their own: the caller owns the
/// position and advances it by `width`.
pub trait InstructionDecoder {
    fn cpu(&self) -> Cpu;

    /// Decodes the instruction at `pos`. `pc` is the address of that byte and
    /// is only used to compute relative targets. Returns `None` for unknown
    /// opcodes and instructions truncated by the end of `buffer`.
    fn decode(&self, buffer: &[u8], pos: usize, pc: u16) -> Option<DecodedInstruction>;
}

#[derive(Debug, Clone)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub size: u8,
}

impl Opcode {
    pub const fn new(mnemonic: &'static str, mode: AddressingMode, size: u8) -> Self {
        Self {
            mnemonic,
            mode,
            size,
        }
    }
}

pub fn get_opcodes() -> [Option<Opcode>; 256] {
    use AddressingMode::*;

    const UNKNOWN: Option<Opcode> = None;
    let mut opcodes = [UNKNOWN; 256];

    let mut add = |opcode: u8, mnemonic: &'static str, mode: AddressingMode| {
        opcodes[opcode as usize] = Some(Opcode::new(mnemonic, mode, 1 + mode.operand_size()));
    };

    // Group one ALU instructions share the same eight addressing modes.
    for (mnemonic, base) in [
        ("ORA", 0x00u8),
        ("AND", 0x20),
        ("EOR", 0x40),
        ("ADC", 0x60),
        ("LDA", 0xA0),
        ("CMP", 0xC0),
        ("SBC", 0xE0),
    ] {
        add(base | 0x09, mnemonic, Immediate);
        add(base | 0x05, mnemonic, ZeroPage);
        add(base | 0x15, mnemonic, ZeroPageX);
        add(base | 0x0D, mnemonic, Absolute);
        add(base | 0x1D, mnemonic, AbsoluteX);
        add(base | 0x19, mnemonic, AbsoluteY);
        add(base | 0x01, mnemonic, IndirectX);
        add(base | 0x11, mnemonic, IndirectY);
    }

    // STA: no immediate
    add(0x85, "STA", ZeroPage);
    add(0x95, "STA", ZeroPageX);
    add(0x8D, "STA", Absolute);
    add(0x9D, "STA", AbsoluteX);
    add(0x99, "STA", AbsoluteY);
    add(0x81, "STA", IndirectX);
    add(0x91, "STA", IndirectY);

    // Shifts and rotates
    for (mnemonic, base) in [("ASL", 0x00u8), ("ROL", 0x20), ("LSR", 0x40), ("ROR", 0x60)] {
        add(base | 0x0A, mnemonic, Accumulator);
        add(base | 0x06, mnemonic, ZeroPage);
        add(base | 0x16, mnemonic, ZeroPageX);
        add(base | 0x0E, mnemonic, Absolute);
        add(base | 0x1E, mnemonic, AbsoluteX);
    }

    // INC / DEC
    for (mnemonic, base) in [("DEC", 0xC0u8), ("INC", 0xE0)] {
        add(base | 0x06, mnemonic, ZeroPage);
        add(base | 0x16, mnemonic, ZeroPageX);
        add(base | 0x0E, mnemonic, Absolute);
        add(base | 0x1E, mnemonic, AbsoluteX);
    }

    // Branches
    for (mnemonic, opcode) in [
        ("BPL", 0x10u8),
        ("BMI", 0x30),
        ("BVC", 0x50),
        ("BVS", 0x70),
        ("BCC", 0x90),
        ("BCS", 0xB0),
        ("BNE", 0xD0),
        ("BEQ", 0xF0),
    ] {
        add(opcode, mnemonic, Relative);
    }

    // Single byte instructions
    for (mnemonic, opcode) in [
        ("BRK", 0x00u8),
        ("PHP", 0x08),
        ("CLC", 0x18),
        ("PLP", 0x28),
        ("SEC", 0x38),
        ("RTI", 0x40),
        ("PHA", 0x48),
        ("CLI", 0x58),
        ("RTS", 0x60),
        ("PLA", 0x68),
        ("SEI", 0x78),
        ("DEY", 0x88),
        ("TXA", 0x8A),
        ("TYA", 0x98),
        ("TXS", 0x9A),
        ("TAY", 0xA8),
        ("TAX", 0xAA),
        ("CLV", 0xB8),
        ("TSX", 0xBA),
        ("INY", 0xC8),
        ("DEX", 0xCA),
        ("CLD", 0xD8),
        ("INX", 0xE8),
        ("NOP", 0xEA),
        ("SED", 0xF8),
    ] {
        add(opcode, mnemonic, Implied);
    }

    // BIT
    add(0x24, "BIT", ZeroPage);
    add(0x2C, "BIT", Absolute);

    // Jumps
    add(0x20, "JSR", Absolute);
    add(0x4C, "JMP", Absolute);
    add(0x6C, "JMP", Indirect);

    // Compare index registers
    add(0xE0, "CPX", Immediate);
    add(0xE4, "CPX", ZeroPage);
    add(0xEC, "CPX", Absolute);
    add(0xC0, "CPY", Immediate);
    add(0xC4, "CPY", ZeroPage);
    add(0xCC, "CPY", Absolute);

    // Index register loads and stores
    add(0xA2, "LDX", Immediate);
    add(0xA6, "LDX", ZeroPage);
    add(0xB6, "LDX", ZeroPageY);
    add(0xAE, "LDX", Absolute);
    add(0xBE, "LDX", AbsoluteY);
    add(0xA0, "LDY", Immediate);
    add(0xA4, "LDY", ZeroPage);
    add(0xB4, "LDY", ZeroPageX);
    add(0xAC, "LDY", Absolute);
    add(0xBC, "LDY", AbsoluteX);
    add(0x86, "STX", ZeroPage);
    add(0x96, "STX", ZeroPageY);
    add(0x8E, "STX", Absolute);
    add(0x84, "STY", ZeroPage);
    add(0x94, "STY", ZeroPageX);
    add(0x8C, "STY", Absolute);

    opcodes
}

/// Decoder for the documented MOS 6502 instruction set.
pub struct Mos6502Decoder {
    pub opcodes: [Option<Opcode>; 256],
}

impl Default for Mos6502Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502Decoder {
    pub fn new() -> Self {
        Self {
            opcodes: get_opcodes(),
        }
    }

    fn format_operand(mode: AddressingMode, address: u16, value: u16) -> String {
        match mode {
            AddressingMode::Implied | AddressingMode::RegisterA => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${:02X}", value),
            AddressingMode::ZeroPage => format!("${:02X}", address),
            AddressingMode::ZeroPageX => format!("${:02X},X", address),
            AddressingMode::ZeroPageY => format!("${:02X},Y", address),
            AddressingMode::Relative | AddressingMode::Absolute => format!("${:04X}", address),
            AddressingMode::AbsoluteX => format!("${:04X},X", address),
            AddressingMode::AbsoluteY => format!("${:04X},Y", address),
            AddressingMode::Indirect => format!("(${:04X})", address),
            AddressingMode::IndirectX => format!("(${:02X},X)", address),
            AddressingMode::IndirectY => format!("(${:02X}),Y", address),
            AddressingMode::CallAddress => format!("${:03X}", address),
            AddressingMode::Unknown => "???".to_string(),
        }
    }
}

impl InstructionDecoder for Mos6502Decoder {
    fn cpu(&self) -> Cpu {
        Cpu::Mos6502
    }

    fn decode(&self, buffer: &[u8], pos: usize, pc: u16) -> Option<DecodedInstruction> {
        let opcode = self.opcodes[*buffer.get(pos)? as usize].as_ref()?;
        let width = opcode.size as usize;
        let operands = buffer.get(pos + 1..pos + width)?;

        let value = match operands {
            [lo] => *lo as u16,
            [lo, hi] => (*hi as u16) << 8 | (*lo as u16),
            _ => 0,
        };
        let address = match opcode.mode {
            AddressingMode::Relative => pc.wrapping_add(2).wrapping_add(value as u8 as i8 as u16),
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            _ => value,
        };

        Some(DecodedInstruction {
            mnemonic: opcode.mnemonic,
            operand: Operand::new(opcode.mode, address, value),
            operand_text: Self::format_operand(opcode.mode, address, value),
            width,
        })
    }
}

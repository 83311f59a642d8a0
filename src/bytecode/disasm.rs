use std::fmt::Write as _;

use crate::bytecode::{emit::SymId, op::Bc, program::Program, scan::RegId};

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    LoadConstInt { dst: RegId, value: i32 },
    LoadConstFloat { dst: RegId, value: f32 },
    AddrSymbol { sym: SymId },
    Unary { bc: Bc, dst: RegId, src: RegId },
    Binary { bc: Bc, dst: RegId, lhs: RegId, rhs: RegId },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("word {at}: unknown opcode {word}")]
    UnknownOpcode { at: usize, word: u32 },

    #[error("word {at}: {bc:?} needs {needed} operand words, stream ends after {found}")]
    Truncated {
        at: usize,
        bc: Bc,
        needed: usize,
        found: usize,
    },

    #[error("failed to write listing")]
    Format,
}

/// Splits a word stream into instructions.
///
/// Returns `(offset, instruction)` pairs, where `offset` is the index of the
/// opcode word.
pub fn decode(codes: &[u32]) -> Result<Vec<(usize, Instruction)>, DecodeError> {
    let mut out = Vec::new();
    let mut ip = 0;

    while ip < codes.len() {
        let word = codes[ip];
        let bc = Bc::from_word(word).ok_or(DecodeError::UnknownOpcode { at: ip, word })?;

        let needed = bc.arity();
        let operands = codes.get(ip + 1..ip + 1 + needed).ok_or(DecodeError::Truncated {
            at: ip,
            bc,
            needed,
            found: codes.len() - ip - 1,
        })?;

        let reg = |i: usize| RegId(operands[i]);
        let instruction = match bc {
            Bc::LoadConstInt => Instruction::LoadConstInt {
                dst: reg(0),
                value: operands[1] as i32,
            },
            Bc::LoadConstFloat => Instruction::LoadConstFloat {
                dst: reg(0),
                value: f32::from_bits(operands[1]),
            },
            Bc::AddrSymbol => Instruction::AddrSymbol {
                sym: SymId(operands[0]),
            },
            Bc::BitInverse | Bc::LogicNot => Instruction::Unary {
                bc,
                dst: reg(0),
                src: reg(1),
            },
            _ => Instruction::Binary {
                bc,
                dst: reg(0),
                lhs: reg(1),
                rhs: reg(2),
            },
        };

        out.push((ip, instruction));
        ip += 1 + needed;
    }

    Ok(out)
}

fn format_instruction(out: &mut String, ins: &Instruction, syms: &[String]) -> std::fmt::Result {
    match ins {
        Instruction::LoadConstInt { dst, value } => {
            write!(out, "{:<6} {}, {}", Bc::LoadConstInt.mnemonic(), dst, value)
        }
        Instruction::LoadConstFloat { dst, value } => {
            write!(out, "{:<6} {}, {:?}", Bc::LoadConstFloat.mnemonic(), dst, value)
        }
        Instruction::AddrSymbol { sym } => {
            let name = syms.get(sym.0 as usize).map(String::as_str).unwrap_or("?");
            write!(out, "{:<6} #{}    ; {}", Bc::AddrSymbol.mnemonic(), sym.0, name)
        }
        Instruction::Unary { bc, dst, src } => {
            write!(out, "{:<6} {}, {}", bc.mnemonic(), dst, src)
        }
        Instruction::Binary { bc, dst, lhs, rhs } => {
            write!(out, "{:<6} {}, {}, {}", bc.mnemonic(), dst, lhs, rhs)
        }
    }
}

fn write_listing(
    out: &mut String,
    program: &Program,
    instructions: &[(usize, Instruction)],
) -> std::fmt::Result {
    writeln!(out, "════════════════════════════════════════")?;
    writeln!(
        out,
        " {} words, {} registers, {} symbols",
        program.codes.len(),
        program.nregs,
        program.syms.len()
    )?;
    writeln!(out, "════════════════════════════════════════")?;

    for (id, name) in program.syms.iter().enumerate() {
        writeln!(out, "  #{:<3} {}", id, name)?;
    }
    if !program.syms.is_empty() {
        writeln!(out)?;
    }

    for (ip, ins) in instructions {
        write!(out, "{:04}   ", ip)?;
        format_instruction(out, ins, &program.syms)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Renders a program listing: header, symbol table, one instruction per line.
pub fn format_bc(program: &Program) -> Result<String, DecodeError> {
    let instructions = decode(&program.codes)?;
    let mut out = String::new();
    write_listing(&mut out, program, &instructions).map_err(|_| DecodeError::Format)?;
    Ok(out)
}

/// Print disassembly of a bytecode program
pub fn print_bc(program: &Program) -> Result<(), DecodeError> {
    print!("{}", format_bc(program)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_load_and_add() {
        let codes = vec![0, 0, 1, 0, 1, 2, 3, 2, 0, 1];
        let ins = decode(&codes).unwrap();

        assert_eq!(
            ins,
            vec![
                (
                    0,
                    Instruction::LoadConstInt {
                        dst: RegId(0),
                        value: 1
                    }
                ),
                (
                    3,
                    Instruction::LoadConstInt {
                        dst: RegId(1),
                        value: 2
                    }
                ),
                (
                    6,
                    Instruction::Binary {
                        bc: Bc::Plus,
                        dst: RegId(2),
                        lhs: RegId(0),
                        rhs: RegId(1)
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_decode_reinterprets_immediates() {
        let codes = vec![
            Bc::LoadConstInt.word(),
            0,
            (-7i32) as u32,
            Bc::LoadConstFloat.word(),
            1,
            1.5f32.to_bits(),
            Bc::AddrSymbol.word(),
            3,
            Bc::LogicNot.word(),
            2,
            1,
        ];
        let ins: Vec<Instruction> = decode(&codes).unwrap().into_iter().map(|(_, i)| i).collect();

        assert_eq!(
            ins,
            vec![
                Instruction::LoadConstInt {
                    dst: RegId(0),
                    value: -7
                },
                Instruction::LoadConstFloat {
                    dst: RegId(1),
                    value: 1.5
                },
                Instruction::AddrSymbol { sym: SymId(3) },
                Instruction::Unary {
                    bc: Bc::LogicNot,
                    dst: RegId(2),
                    src: RegId(1)
                },
            ]
        );
    }

    #[test]
    fn test_unknown_opcode() {
        let err = decode(&[0, 0, 1, 99]).unwrap_err();
        assert_eq!(err, DecodeError::UnknownOpcode { at: 3, word: 99 });
    }

    #[test]
    fn test_truncated_instruction() {
        let err = decode(&[Bc::Plus.word(), 2, 0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                at: 0,
                bc: Bc::Plus,
                needed: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_format_empty_program() {
        let program = Program {
            codes: Vec::new(),
            syms: Vec::new(),
            nregs: 0,
        };

        let text = format_bc(&program).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains(" 0 words, 0 registers, 0 symbols"), "{}", text);
    }

    #[test]
    fn test_format_rejects_bad_stream() {
        let program = Program {
            codes: vec![Bc::Minus.word(), 0],
            syms: Vec::new(),
            nregs: 1,
        };
        assert!(matches!(
            format_bc(&program),
            Err(DecodeError::Truncated { bc: Bc::Minus, .. })
        ));
    }

    #[test]
    fn test_format_listing() {
        let program = Program {
            codes: vec![
                Bc::AddrSymbol.word(),
                0,
                Bc::LoadConstFloat.word(),
                1,
                2.0f32.to_bits(),
                Bc::Multiply.word(),
                2,
                0,
                1,
            ],
            syms: vec!["@pos".to_string()],
            nregs: 4,
        };

        let text = format_bc(&program).unwrap();
        assert!(text.contains(" 9 words, 4 registers, 1 symbols"), "{}", text);
        assert!(text.contains("0000   ADDR   #0    ; @pos"), "{}", text);
        assert!(text.contains("0002   LOADF  r1, 2.0"), "{}", text);
        assert!(text.contains("0005   MUL    r2, r0, r1"), "{}", text);
    }
}

//! Instruction execution
//!
//! Each operation family is a free function over the register file and
//! memory; [`execute`] decodes the opcode and dispatches to them.

use crate::addressing::{effective_address, z_operand};
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::state::{Flow, HaltReason};
use mmix_spec::{Byte, Instruction, Octa, Operation, Result, Tetra, Value, Width};

/// `$X = M[address]`, sign- or zero-extended to 64 bits
pub fn load(
    registers: &mut RegisterFile,
    memory: &Memory,
    x: Byte,
    address: u64,
    width: Width,
    signed: bool,
) -> Result<()> {
    let value = memory.read_value(address, width)?;
    let extended = if signed {
        Octa::from_i64(value.int())
    } else {
        Octa::from_u64(value.uint())
    };
    registers.set_general(x, extended);
    Ok(())
}

/// `$X = M4[address] << 32`
pub fn load_high_tetra(
    registers: &mut RegisterFile,
    memory: &Memory,
    x: Byte,
    address: u64,
) -> Result<()> {
    let tetra = memory.read_tetra(address)?;
    registers.set_general(x, Octa::from_u64(tetra.uint() << 32));
    Ok(())
}

/// `$X = address`, no memory access
pub fn load_address(registers: &mut RegisterFile, x: Byte, address: u64) {
    registers.set_general(x, Octa::from_u64(address));
}

/// `M[address] = ` low-order `width` bits of `$X`
pub fn store(
    registers: &RegisterFile,
    memory: &mut Memory,
    x: Byte,
    address: u64,
    width: Width,
) -> Result<()> {
    memory.write_value(address, Value::truncate(registers.general(x), width))
}

/// `M4[address] = $X >> 32`
pub fn store_high_tetra(
    registers: &RegisterFile,
    memory: &mut Memory,
    x: Byte,
    address: u64,
) -> Result<()> {
    let high = (registers.general(x).uint() >> 32) as u32;
    memory.write_tetra(address, Tetra::from(high))
}

/// `$X = $Y + operand`; overflow leaves `$X` untouched
pub fn add(registers: &mut RegisterFile, x: Byte, y: Byte, operand: Octa) -> Result<()> {
    let sum = registers.general(y).checked_add(operand)?;
    registers.set_general(x, sum);
    Ok(())
}

/// `$X = $Y - operand`; overflow leaves `$X` untouched
pub fn sub(registers: &mut RegisterFile, x: Byte, y: Byte, operand: Octa) -> Result<()> {
    let difference = registers.general(y).checked_sub(operand)?;
    registers.set_general(x, difference);
    Ok(())
}

/// Execute one decoded instruction located at `pc`
pub fn execute(
    instruction: &Instruction,
    pc: u64,
    registers: &mut RegisterFile,
    memory: &mut Memory,
) -> Result<Flow> {
    let Some(opcode) = instruction.opcode() else {
        return Ok(Flow::Halt(HaltReason::UnimplementedOpcode {
            pc,
            opcode: instruction.opcode.as_u8(),
        }));
    };
    let Instruction { x, y, z, .. } = *instruction;
    let mode = opcode.addressing_mode();

    match opcode.operation() {
        Operation::Trap => return Ok(Flow::Halt(HaltReason::Trap { pc })),
        Operation::Add => add(registers, x, y, z_operand(registers, z, mode))?,
        Operation::Sub => sub(registers, x, y, z_operand(registers, z, mode))?,
        Operation::LoadAddress => {
            let address = effective_address(registers, y, z, mode);
            load_address(registers, x, address);
        }
        Operation::Load { width, signed } => {
            let address = effective_address(registers, y, z, mode);
            load(registers, memory, x, address, width, signed)?;
        }
        Operation::LoadHighTetra => {
            let address = effective_address(registers, y, z, mode);
            load_high_tetra(registers, memory, x, address)?;
        }
        // signedness only matters for overflow detection, which stores skip
        Operation::Store { width, .. } => {
            let address = effective_address(registers, y, z, mode);
            store(registers, memory, x, address, width)?;
        }
        Operation::StoreHighTetra => {
            let address = effective_address(registers, y, z, mode);
            store_high_tetra(registers, memory, x, address)?;
        }
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmix_spec::{ErrorKind, Opcode, Wyde};

    fn setup() -> (RegisterFile, Memory) {
        (RegisterFile::new(), Memory::new())
    }

    fn reg(index: u8) -> Byte {
        Byte::from(index)
    }

    fn run(inst: Instruction, regs: &mut RegisterFile, mem: &mut Memory) -> Result<Flow> {
        execute(&inst, 0, regs, mem)
    }

    #[test]
    fn test_ldb_sign_extends() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(3), Octa::from_u64(5));
        mem.write_byte(3, Byte::from_int(-5).unwrap()).unwrap();

        // LDB $1,$3,-2
        let flow = run(Instruction::new(Opcode::Ldbi, 1, 3, 0xFE), &mut regs, &mut mem).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(regs.general(reg(1)).int(), -5);
    }

    #[test]
    fn test_ldbu_zero_extends() {
        let (mut regs, mut mem) = setup();
        mem.write_byte(0x10, Byte::from(0xFB)).unwrap();
        regs.set_general(reg(2), Octa::from_u64(0x10));
        run(Instruction::new(Opcode::Ldbui, 1, 2, 0), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).uint(), 0xFB);
    }

    #[test]
    fn test_load_widths() {
        let (mut regs, mut mem) = setup();
        mem.write_octa(0x100, Octa::from_u64(0x8081_8283_8485_8687)).unwrap();
        regs.set_general(reg(2), Octa::from_u64(0x100));

        let cases = [
            (Opcode::Ldwi, 0xFFFF_FFFF_FFFF_8081u64),
            (Opcode::Ldwui, 0x8081),
            (Opcode::Ldti, 0xFFFF_FFFF_8081_8283),
            (Opcode::Ldtui, 0x8081_8283),
            (Opcode::Ldoi, 0x8081_8283_8485_8687),
            (Opcode::Ldoui, 0x8081_8283_8485_8687),
        ];
        for (opcode, expected) in cases {
            run(Instruction::new(opcode, 1, 2, 0), &mut regs, &mut mem).unwrap();
            assert_eq!(regs.general(reg(1)).uint(), expected, "{:?}", opcode);
        }
    }

    #[test]
    fn test_indirect_load() {
        let (mut regs, mut mem) = setup();
        mem.write_wyde(0x1002, Wyde::from(0x1234)).unwrap();
        regs.set_general(reg(2), Octa::from_u64(0x1000));
        regs.set_general(reg(3), Octa::from_u64(2));
        run(Instruction::new(Opcode::Ldw, 1, 2, 3), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).uint(), 0x1234);
    }

    #[test]
    fn test_ldht() {
        let (mut regs, mut mem) = setup();
        mem.write_tetra(8, Tetra::from(0xDEAD_BEEF)).unwrap();
        regs.set_general(reg(1), Octa::from_u64(u64::MAX));
        run(Instruction::new(Opcode::Ldhti, 1, 0, 8), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).uint(), 0xDEAD_BEEF_0000_0000);
    }

    #[test]
    fn test_lda_no_memory_access() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(2), Octa::from_u64(0x2000));
        regs.set_general(reg(3), Octa::from_i64(-0x10));
        run(Instruction::new(Opcode::Lda, 1, 2, 3), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).uint(), 0x1FF0);
        assert_eq!(mem.written_len(), 0);
    }

    #[test]
    fn test_stores_write_low_bits() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(1), Octa::from_u64(0x0102_0304_0506_0708));
        regs.set_general(reg(2), Octa::from_u64(0x40));

        run(Instruction::new(Opcode::Stbi, 1, 2, 0), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_byte(0x40).unwrap(), Byte::from(0x08));

        run(Instruction::new(Opcode::Stwui, 1, 2, 2), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_wyde(0x42).unwrap(), Wyde::from(0x0708));

        run(Instruction::new(Opcode::Stti, 1, 2, 4), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_tetra(0x44).unwrap(), Tetra::from(0x0506_0708));

        run(Instruction::new(Opcode::Stoi, 1, 2, 8), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_octa(0x48).unwrap().uint(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_store_negative_value_truncates() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(1), Octa::from_i64(-300));
        run(Instruction::new(Opcode::Stbi, 1, 0, 0), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_byte(0).unwrap().uint(), (-300i64 as u64) & 0xFF);
    }

    #[test]
    fn test_stht() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(1), Octa::from_u64(0xCAFE_BABE_1234_5678));
        run(Instruction::new(Opcode::Sthti, 1, 0, 0), &mut regs, &mut mem).unwrap();
        assert_eq!(mem.read_tetra(0).unwrap(), Tetra::from(0xCAFE_BABE));
        assert_eq!(mem.written_len(), 4);
    }

    #[test]
    fn test_add_sub() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(2), Octa::from_u64(10));
        regs.set_general(reg(3), Octa::from_u64(32));
        run(Instruction::new(Opcode::Add, 1, 2, 3), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).int(), 42);

        run(Instruction::new(Opcode::Subi, 1, 1, 0xFF), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).int(), 43);

        run(Instruction::new(Opcode::Sub, 1, 2, 3), &mut regs, &mut mem).unwrap();
        assert_eq!(regs.general(reg(1)).int(), -22);
    }

    #[test]
    fn test_add_overflow_keeps_destination() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(2), Octa::from_i64(i64::MAX));
        regs.set_general(reg(1), Octa::from_u64(9));
        let err = run(Instruction::new(Opcode::Addi, 1, 2, 1), &mut regs, &mut mem).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(regs.general(reg(1)).uint(), 9);
    }

    #[test]
    fn test_load_past_top_of_memory() {
        let (mut regs, mut mem) = setup();
        regs.set_general(reg(2), Octa::from_u64(u64::MAX - 2));
        let err = run(Instruction::new(Opcode::Ldoi, 1, 2, 0), &mut regs, &mut mem).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressRange);
        let err = run(Instruction::new(Opcode::Stti, 1, 2, 0), &mut regs, &mut mem).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressRange);
        assert_eq!(mem.written_len(), 0);
    }

    #[test]
    fn test_trap_and_unknown_opcode() {
        let (mut regs, mut mem) = setup();
        let flow = execute(&Instruction::new(Opcode::Trap, 0, 0, 0), 0x40, &mut regs, &mut mem).unwrap();
        assert_eq!(flow, Flow::Halt(HaltReason::Trap { pc: 0x40 }));

        let unknown = Instruction::decode(Tetra::from(0xFE00_0000)).unwrap();
        let flow = execute(&unknown, 0x44, &mut regs, &mut mem).unwrap();
        assert_eq!(
            flow,
            Flow::Halt(HaltReason::UnimplementedOpcode { pc: 0x44, opcode: 0xFE })
        );
        assert!(flow.is_halt());
    }
}

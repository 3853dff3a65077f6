use chip8::framebuffer::Framebuffer;
use chip8::memory::MemoryMap;
use chip8::registers::VF;
use chip8::Chip8Interpreter;
use proptest::prelude::*;

/// load the opcodes at 0x200 and execute each of them once
fn run(program: &[u16]) -> Chip8Interpreter {
    let mut interp = Chip8Interpreter::with_seed(0);
    let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    interp.load_program(&bytes);
    for _ in program {
        interp.step().expect("no stack traffic in these programs");
    }
    interp
}

fn ld(x: usize, nn: u8) -> u16 {
    0x6000 | (x as u16) << 8 | nn as u16
}

fn alu(x: usize, y: usize, n: u16) -> u16 {
    0x8000 | (x as u16) << 8 | (y as u16) << 4 | n
}

proptest! {
    #[test]
    fn add_sets_carry(a in any::<u8>(), b in any::<u8>(), x in 0usize..15, y in 0usize..15) {
        prop_assume!(x != y);
        let i = run(&[ld(x, a), ld(y, b), alu(x, y, 0x4)]);
        let v = &i.registers().v;
        prop_assert_eq!(v[x], a.wrapping_add(b));
        prop_assert_eq!(v[VF] == 1, a as u16 + b as u16 > 255);
    }

    #[test]
    fn sub_clears_flag_on_borrow(a in any::<u8>(), b in any::<u8>(), x in 0usize..15, y in 0usize..15) {
        prop_assume!(x != y);
        let i = run(&[ld(x, a), ld(y, b), alu(x, y, 0x5)]);
        let v = &i.registers().v;
        prop_assert_eq!(v[x], a.wrapping_sub(b));
        prop_assert_eq!(v[VF] == 0, b > a);
    }

    #[test]
    fn subn_clears_flag_on_borrow(a in any::<u8>(), b in any::<u8>()) {
        let i = run(&[ld(1, a), ld(2, b), alu(1, 2, 0x7)]);
        let v = &i.registers().v;
        prop_assert_eq!(v[1], b.wrapping_sub(a));
        prop_assert_eq!(v[VF] == 0, a > b);
    }

    #[test]
    fn bcd_digits(value in any::<u8>()) {
        let i = run(&[ld(4, value), 0xa300, 0xf433]);
        let mut digits = [0u8; 3];
        i.memory().read_into(0x300, &mut digits);
        prop_assert_eq!(digits[0] as u32 * 100 + digits[1] as u32 * 10 + digits[2] as u32, value as u32);
        prop_assert!(digits.iter().all(|d| *d < 10));
    }

    #[test]
    fn store_then_load_registers(values in prop::array::uniform16(any::<u8>()), x in 0usize..16) {
        // load every register, store V0..=Vx, clobber them, load them back
        let mut program: Vec<u16> = (0..16).map(|r| ld(r, values[r])).collect();
        program.push(0xa400);
        program.push(0xf055 | (x as u16) << 8);
        program.extend((0..16).map(|r| ld(r, 0)));
        program.push(0xf065 | (x as u16) << 8);
        let i = run(&program);
        prop_assert_eq!(&i.registers().v[..=x], &values[..=x]);
    }

    #[test]
    fn drawing_twice_restores_screen(x in any::<u8>(), y in any::<u8>(), digit in 0u8..16) {
        // V0 = x, V1 = y, V2 = digit, I = glyph(V2), draw 5 rows, check, draw again
        let program = [ld(0, x), ld(1, y), ld(2, digit), 0xf229, 0xd015];
        let once = run(&program);
        prop_assert_eq!(once.registers().v[VF], 0);

        let mut twice_program = program.to_vec();
        twice_program.push(0xd015);
        let twice = run(&twice_program);
        prop_assert_eq!(twice.registers().v[VF], 1);
        prop_assert_eq!(twice.framebuffer(), &Framebuffer::new());
    }
}

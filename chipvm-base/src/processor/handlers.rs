//! One state transition per instruction.
//!
//! Every handler runs after the fetch, so `processor.program_counter`
//! already points at the instruction following the one being executed.

use std::convert::TryFrom;

use rand::Rng;
use tracing::debug;

use super::{DataRegister, Key, Processor, ProcessorError};
use crate::{font, opcode::Opcode};

type Outcome = Result<(), ProcessorError>;

/// Words without a defined meaning execute as no-ops.
pub(super) fn ignore(processor: &mut Processor, opcode: Opcode) -> Outcome {
    debug!(
        address = processor.instruction_address(),
        word = opcode.word(),
        "ignoring unrecognized instruction"
    );
    Ok(())
}

/// `00E0`
pub(super) fn clear_display(processor: &mut Processor, _: Opcode) -> Outcome {
    processor.screen.clear();
    Ok(())
}

/// `00EE`
pub(super) fn return_from_subroutine(processor: &mut Processor, _: Opcode) -> Outcome {
    let address = processor.instruction_address();
    processor.program_counter = processor
        .call_stack
        .pop()
        .map_err(|_| ProcessorError::CallStackUnderflow { address })?;
    Ok(())
}

/// `1nnn`
pub(super) fn jump(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.program_counter = opcode.nnn().into();
    Ok(())
}

/// `2nnn`
pub(super) fn call_subroutine(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let address = processor.instruction_address();
    processor
        .call_stack
        .push(processor.program_counter)
        .map_err(|_| ProcessorError::CallStackOverflow { address })?;
    processor.program_counter = opcode.nnn().into();
    Ok(())
}

fn skip_if(processor: &mut Processor, condition: bool) -> Outcome {
    if condition {
        processor.skip_next_instruction();
    }
    Ok(())
}

/// `3xkk`
pub(super) fn skip_if_eq_const(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let condition = processor.register(opcode.x()) == opcode.kk();
    skip_if(processor, condition)
}

/// `4xkk`
pub(super) fn skip_if_neq_const(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let condition = processor.register(opcode.x()) != opcode.kk();
    skip_if(processor, condition)
}

/// `5xy0`, the low nibble is not checked.
pub(super) fn skip_if_eq(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let condition = processor.register(opcode.x()) == processor.register(opcode.y());
    skip_if(processor, condition)
}

/// `9xy0`, the low nibble is not checked.
pub(super) fn skip_if_neq(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let condition = processor.register(opcode.x()) != processor.register(opcode.y());
    skip_if(processor, condition)
}

/// `6xkk`
pub(super) fn assign_const(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.set_register(opcode.x(), opcode.kk());
    Ok(())
}

/// `7xkk`, leaves `VF` alone even on overflow.
pub(super) fn add_assign_const(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let target_register = opcode.x();
    processor.set_register(
        target_register,
        processor.register(target_register).wrapping_add(opcode.kk()),
    );
    Ok(())
}

/// Assign `op(Vx, Vy)` to `Vx`.
fn op_assign(processor: &mut Processor, opcode: Opcode, op: impl FnOnce(u8, u8) -> u8) -> Outcome {
    let (target_register, source_register) = (opcode.x(), opcode.y());
    let res = op(
        processor.register(target_register),
        processor.register(source_register),
    );
    processor.set_register(target_register, res);
    Ok(())
}

/// Assign `op(Vx, Vy)` to `Vx`, then the flag produced by `op` to `VF`.
/// Writing the flag last makes it win when `x` is `F`.
fn op_assign_with_flag(
    processor: &mut Processor,
    opcode: Opcode,
    op: impl FnOnce(u8, u8) -> (u8, bool),
) -> Outcome {
    let (target_register, source_register) = (opcode.x(), opcode.y());
    let (res, flag) = op(
        processor.register(target_register),
        processor.register(source_register),
    );
    processor.set_register(target_register, res);
    processor.set_register(DataRegister::VF, flag as u8);
    Ok(())
}

/// `8xy0`
pub(super) fn assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign(processor, opcode, |_, source| source)
}

/// `8xy1`
pub(super) fn or_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign(processor, opcode, |target, source| target | source)
}

/// `8xy2`
pub(super) fn and_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign(processor, opcode, |target, source| target & source)
}

/// `8xy3`
pub(super) fn xor_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign(processor, opcode, |target, source| target ^ source)
}

/// `8xy4`, `VF` is the carry.
pub(super) fn add_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign_with_flag(processor, opcode, |target, source| {
        target.overflowing_add(source)
    })
}

/// `8xy5`, `VF` is set when no borrow occurs.
pub(super) fn sub_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign_with_flag(processor, opcode, |target, source| {
        let (res, borrow) = target.overflowing_sub(source);
        (res, !borrow)
    })
}

/// `8xy7`, `VF` is set when no borrow occurs.
pub(super) fn rev_sub_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign_with_flag(processor, opcode, |target, source| {
        let (res, borrow) = source.overflowing_sub(target);
        (res, !borrow)
    })
}

/// `8xy6`, shifts `Vx` itself. `VF` receives the bit shifted out.
pub(super) fn shr_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign_with_flag(processor, opcode, |target, _| {
        (target >> 1, target & 0b1 == 1)
    })
}

/// `8xyE`, shifts `Vx` itself. `VF` receives the bit shifted out.
pub(super) fn shl_assign(processor: &mut Processor, opcode: Opcode) -> Outcome {
    op_assign_with_flag(processor, opcode, |target, _| {
        (target << 1, target >> 7 == 1)
    })
}

/// `Annn`
pub(super) fn assign_addr_to_i(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.index_register = opcode.nnn().into();
    Ok(())
}

/// `Bnnn`
pub(super) fn jump_offset(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.program_counter =
        u16::from(opcode.nnn()).wrapping_add(processor.register(DataRegister::V0) as u16);
    Ok(())
}

/// `Cxkk`
pub(super) fn assign_random_masked(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let random_byte: u8 = processor.rng.gen();
    processor.set_register(opcode.x(), random_byte & opcode.kk());
    Ok(())
}

/// `Dxyn`
pub(super) fn draw_sprite(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let x = processor.register(opcode.x());
    let y = processor.register(opcode.y());
    let height = opcode.n().into_u8() as usize;

    processor.set_register(DataRegister::VF, 0);

    let mut sprite = [0; 0xF];
    for (row, sprite_byte) in sprite.iter_mut().enumerate().take(height) {
        *sprite_byte = processor.read_memory(processor.index_register.wrapping_add(row as u16));
    }

    if processor.screen.draw_sprite(x, y, &sprite[..height]) {
        processor.set_register(DataRegister::VF, 1);
    }
    Ok(())
}

/// Key referenced by the value of `key_register`.
fn referenced_key(processor: &Processor, key_register: DataRegister) -> Result<Key, ProcessorError> {
    let key_id = processor.register(key_register);
    Key::try_from(key_id).map_err(|_| ProcessorError::NotAValidKey {
        address: processor.instruction_address(),
        requested_key_id: key_id,
    })
}

/// `Ex9E`
pub(super) fn skip_if_key_pressed(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let key = referenced_key(processor, opcode.x())?;
    let condition = processor.key_state(key).is_pressed();
    skip_if(processor, condition)
}

/// `ExA1`
pub(super) fn skip_if_key_not_pressed(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let key = referenced_key(processor, opcode.x())?;
    let condition = !processor.key_state(key).is_pressed();
    skip_if(processor, condition)
}

/// `Fx07`
pub(super) fn assign_delay_timer_val(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.set_register(opcode.x(), processor.delay_timer);
    Ok(())
}

/// `Fx0A`, stores the lowest pressed key.
///
/// Without a pressed key the program counter is moved back onto this
/// instruction, so it runs again on the next cycle.
pub(super) fn wait_for_key_press(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let pressed_key = processor
        .key_states
        .iter()
        .position(|state| state.is_pressed());

    match pressed_key {
        Some(key_id) => processor.set_register(opcode.x(), key_id as u8),
        None => processor.program_counter = processor.instruction_address(),
    }
    Ok(())
}

/// `Fx15`
pub(super) fn set_delay_timer(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.delay_timer = processor.register(opcode.x());
    Ok(())
}

/// `Fx18`
pub(super) fn set_sound_timer(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.sound_timer = processor.register(opcode.x());
    Ok(())
}

/// `Fx1E`, leaves `VF` alone.
pub(super) fn add_assign_i(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.index_register = processor
        .index_register
        .wrapping_add(processor.register(opcode.x()) as u16);
    Ok(())
}

/// `Fx29`, values above `0xF` point past the font without faulting.
pub(super) fn assign_hex_digit_glyph_addr_to_i(processor: &mut Processor, opcode: Opcode) -> Outcome {
    processor.index_register = font::glyph_address(processor.register(opcode.x()));
    Ok(())
}

/// Return decimal digits of a u8 value.
/// The hundreds digit is the first element in the array,
/// followed by the tens and single digits.
///
/// 3 digits are always enough, since the maximum value of a u8 is 255.
pub(super) fn decimal_digits_of_u8(num: u8) -> [u8; 3] {
    [num / 100, num / 10 % 10, num % 10]
}

/// `Fx33`
pub(super) fn store_bcd(processor: &mut Processor, opcode: Opcode) -> Outcome {
    let digits = decimal_digits_of_u8(processor.register(opcode.x()));
    for (offset, digit) in (0..).zip(digits.iter().copied()) {
        processor.write_memory(processor.index_register.wrapping_add(offset), digit);
    }
    Ok(())
}

/// `Fx55`, `I` is left unchanged.
pub(super) fn store_register_values(processor: &mut Processor, opcode: Opcode) -> Outcome {
    for register in DataRegister::up_to(opcode.x()) {
        processor.write_memory(
            processor.index_register.wrapping_add(register as u8 as u16),
            processor.register(register),
        );
    }
    Ok(())
}

/// `Fx65`, `I` is left unchanged.
pub(super) fn load_register_values(processor: &mut Processor, opcode: Opcode) -> Outcome {
    for register in DataRegister::up_to(opcode.x()) {
        let val = processor.read_memory(processor.index_register.wrapping_add(register as u8 as u16));
        processor.set_register(register, val);
    }
    Ok(())
}

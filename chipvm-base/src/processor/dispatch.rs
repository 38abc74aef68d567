//! Two-level jump tables from instruction words to handlers.
//!
//! The first level is keyed by the instruction family (highest nibble).
//! Families whose encodings overlap (`0`, `8`, `E`, `F`) have a second
//! table keyed by the lowest nibble, or the lowest byte for family `F`.
//! Slots without an instruction hold [`handlers::ignore`].

use super::{handlers, Processor, ProcessorError};
use crate::opcode::Opcode;

pub(super) type Handler = fn(&mut Processor, Opcode) -> Result<(), ProcessorError>;

/// Build a sub-table of `N` slots, filled with [`handlers::ignore`]
/// except for the given `(sub-opcode, handler)` entries.
const fn sub_table<const N: usize>(entries: &[(usize, Handler)]) -> [Handler; N] {
    let mut table = [handlers::ignore as Handler; N];
    let mut i = 0;
    while i < entries.len() {
        table[entries[i].0] = entries[i].1;
        i += 1;
    }
    table
}

static FAMILIES: [Handler; 16] = [
    family_0,
    handlers::jump,
    handlers::call_subroutine,
    handlers::skip_if_eq_const,
    handlers::skip_if_neq_const,
    handlers::skip_if_eq,
    handlers::assign_const,
    handlers::add_assign_const,
    family_8,
    handlers::skip_if_neq,
    handlers::assign_addr_to_i,
    handlers::jump_offset,
    handlers::assign_random_masked,
    handlers::draw_sprite,
    family_e,
    family_f,
];

static FAMILY_0: [Handler; 16] = sub_table(&[
    (0x0, handlers::clear_display as Handler),
    (0xE, handlers::return_from_subroutine as Handler),
]);

static FAMILY_8: [Handler; 16] = sub_table(&[
    (0x0, handlers::assign as Handler),
    (0x1, handlers::or_assign as Handler),
    (0x2, handlers::and_assign as Handler),
    (0x3, handlers::xor_assign as Handler),
    (0x4, handlers::add_assign as Handler),
    (0x5, handlers::sub_assign as Handler),
    (0x6, handlers::shr_assign as Handler),
    (0x7, handlers::rev_sub_assign as Handler),
    (0xE, handlers::shl_assign as Handler),
]);

static FAMILY_E: [Handler; 16] = sub_table(&[
    (0x1, handlers::skip_if_key_not_pressed as Handler),
    (0xE, handlers::skip_if_key_pressed as Handler),
]);

static FAMILY_F: [Handler; 256] = sub_table(&[
    (0x07, handlers::assign_delay_timer_val as Handler),
    (0x0A, handlers::wait_for_key_press as Handler),
    (0x15, handlers::set_delay_timer as Handler),
    (0x18, handlers::set_sound_timer as Handler),
    (0x1E, handlers::add_assign_i as Handler),
    (0x29, handlers::assign_hex_digit_glyph_addr_to_i as Handler),
    (0x33, handlers::store_bcd as Handler),
    (0x55, handlers::store_register_values as Handler),
    (0x65, handlers::load_register_values as Handler),
]);

/// Run the handler of `opcode` on `processor`.
pub(super) fn dispatch(processor: &mut Processor, opcode: Opcode) -> Result<(), ProcessorError> {
    FAMILIES[opcode.family().into_u8() as usize](processor, opcode)
}

fn family_0(processor: &mut Processor, opcode: Opcode) -> Result<(), ProcessorError> {
    FAMILY_0[opcode.n().into_u8() as usize](processor, opcode)
}

fn family_8(processor: &mut Processor, opcode: Opcode) -> Result<(), ProcessorError> {
    FAMILY_8[opcode.n().into_u8() as usize](processor, opcode)
}

fn family_e(processor: &mut Processor, opcode: Opcode) -> Result<(), ProcessorError> {
    FAMILY_E[opcode.n().into_u8() as usize](processor, opcode)
}

fn family_f(processor: &mut Processor, opcode: Opcode) -> Result<(), ProcessorError> {
    FAMILY_F[opcode.kk() as usize](processor, opcode)
}

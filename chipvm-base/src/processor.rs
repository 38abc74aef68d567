use rand::{rngs::StdRng, SeedableRng};
use static_assertions::const_assert;
use thiserror::Error;
use tracing::{instrument, trace};

use crate::{
    font::{FONT, FONT_BASE_ADDRESS, FONT_LEN},
    opcode::Opcode,
    screen::Screen,
};

mod call_stack;
mod data_register;
mod dispatch;
mod handlers;
mod key;

pub use call_stack::{CallStack, CallStackError};
pub use data_register::DataRegister;
pub use key::{Key, KeyState};

/// A fault raised by an instruction the machine refuses to execute.
///
/// `address` is always the address of the faulting instruction.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProcessorError {
    #[error("the call at {address:03X} exceeds the call stack capacity of {}", CallStack::CAPACITY)]
    CallStackOverflow { address: u16 },
    #[error("return was requested at {address:03X} with an empty call stack")]
    CallStackUnderflow { address: u16 },
    #[error("a key with an invalid (greater than 0xF) key id {requested_key_id:X} was referenced at {address:03X}")]
    NotAValidKey { address: u16, requested_key_id: u8 },
}

/// The complete machine state.
///
/// Mutated only by [`Processor::cycle`] and by the key state setters,
/// which an input collaborator calls between cycles.
#[derive(Debug, Clone)]
pub struct Processor {
    data_registers: [u8; DataRegister::COUNT],
    index_register: u16,
    memory: [u8; Self::MEMORY_LEN],
    program_counter: u16,
    call_stack: CallStack,
    delay_timer: u8,
    sound_timer: u8,
    screen: Screen,
    key_states: [KeyState; Key::COUNT],
    rng: StdRng,
}

impl Default for Processor {
    fn default() -> Self {
        ProcessorBuilder::new().build()
    }
}

impl Processor {
    /// Size of the addressable memory in bytes.
    pub const MEMORY_LEN: usize = 0x1000;

    /// Mask applied to every memory address.
    /// Accesses past the end of memory wrap around to its start.
    pub const ADDRESS_MASK: u16 = Self::MEMORY_LEN as u16 - 1;

    /// Address the program is loaded to and executed from.
    pub const PROGRAM_START: u16 = 0x200;

    /// Maximum length of a program image.
    pub const MAX_PROGRAM_LEN: usize = Self::MEMORY_LEN - Self::PROGRAM_START as usize;

    /// Width of an instruction word in bytes.
    pub const INSTRUCTION_WIDTH: u16 = std::mem::size_of::<u16>() as u16;

    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::new()
    }

    /// Fetch, decode and execute one instruction, then decrement both timers.
    ///
    /// The program counter is advanced past the fetched word before the
    /// instruction is executed. On a fault the error is returned right away,
    /// leaving the program counter past the faulting instruction and the timers
    /// untouched.
    pub fn cycle(&mut self) -> Result<(), ProcessorError> {
        let opcode = Opcode::from_bytes(
            self.read_memory(self.program_counter),
            self.read_memory(self.program_counter.wrapping_add(1)),
        );
        trace!(address = self.program_counter, %opcode, "executing instruction");

        self.program_counter = self
            .program_counter
            .wrapping_add(Self::INSTRUCTION_WIDTH);

        dispatch::dispatch(self, opcode)?;

        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);

        Ok(())
    }

    /// Get the value of a data register.
    pub const fn register(&self, register: DataRegister) -> u8 {
        self.data_registers[register as u8 as usize]
    }

    /// Set the value of a data register.
    fn set_register(&mut self, register: DataRegister, val: u8) {
        self.data_registers[register as u8 as usize] = val;
    }

    /// The special address register `I`.
    pub const fn index_register(&self) -> u16 {
        self.index_register
    }

    pub const fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub const fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub const fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the state of a key.
    pub const fn key_state(&self, key: Key) -> KeyState {
        self.key_states[key as u8 as usize]
    }

    /// Set the state of a key.
    pub fn set_key_state(&mut self, key: Key, state: KeyState) {
        self.key_states[key as u8 as usize] = state;
    }

    /// The key state vector, indexed by key id, for in-place editing by an input layer.
    pub fn key_states_mut(&mut self) -> &mut [KeyState; Key::COUNT] {
        &mut self.key_states
    }

    fn read_memory(&self, address: u16) -> u8 {
        self.memory[(address & Self::ADDRESS_MASK) as usize]
    }

    fn write_memory(&mut self, address: u16, val: u8) {
        self.memory[(address & Self::ADDRESS_MASK) as usize] = val;
    }

    /// Address of the instruction currently being executed.
    /// Only meaningful while a handler runs, i.e. after the fetch advanced the program counter.
    fn instruction_address(&self) -> u16 {
        self.program_counter
            .wrapping_sub(Self::INSTRUCTION_WIDTH)
    }

    fn skip_next_instruction(&mut self) {
        self.program_counter = self
            .program_counter
            .wrapping_add(Self::INSTRUCTION_WIDTH);
    }
}

const_assert!(FONT_BASE_ADDRESS as usize + FONT_LEN <= Processor::PROGRAM_START as usize);

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProcessorBuilderError {
    #[error(
        "a program with a length ({program_len:X}) greater than the usable length of memory ({:X}) was supplied",
        Processor::MAX_PROGRAM_LEN
    )]
    ProgramTooLarge { program_len: usize },
}

pub struct ProcessorBuilder {
    /// The partially initialized processor
    processor: Processor,
}

impl Default for ProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorBuilder {
    pub fn new() -> Self {
        Self {
            processor: Processor {
                data_registers: [0; DataRegister::COUNT],
                index_register: 0,
                memory: [0; Processor::MEMORY_LEN],
                program_counter: Processor::PROGRAM_START,
                call_stack: CallStack::default(),
                delay_timer: 0,
                sound_timer: 0,
                screen: Screen::default(),
                key_states: [KeyState::default(); Key::COUNT],
                rng: StdRng::from_entropy(),
            },
        }
    }

    /// Copies the program into the processor's memory,
    /// starting at [`Processor::PROGRAM_START`].
    ///
    /// Memory is only written if the whole program fits.
    #[instrument(level = "debug", skip(self, program), fields(program_len = program.len()))]
    pub fn program(mut self, program: &[u8]) -> Result<Self, ProcessorBuilderError> {
        if program.len() > Processor::MAX_PROGRAM_LEN {
            return Err(ProcessorBuilderError::ProgramTooLarge {
                program_len: program.len(),
            });
        }

        let start = Processor::PROGRAM_START as usize;
        self.processor.memory[start..start + program.len()].copy_from_slice(program);

        Ok(self)
    }

    /// Seed the random source of `Cxkk` instructions, making their results reproducible.
    /// Without a seed the source is seeded from the operating system.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.processor.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn build(mut self) -> Processor {
        let font_start = FONT_BASE_ADDRESS as usize;
        self.processor.memory[font_start..font_start + FONT_LEN].copy_from_slice(&FONT);
        self.processor
    }
}

//! Core of a CHIP-8 virtual machine: machine state, instruction
//! decoding/dispatch, instruction handlers and the framebuffer.
//!
//! ```
//! use chipvm_base::processor::{DataRegister, Processor};
//!
//! // 6042: V0 = 0x42, 1200: jump to 0x200
//! let mut processor = Processor::builder()
//!     .program(&[0x60, 0x42, 0x12, 0x00])
//!     .unwrap()
//!     .build();
//! processor.cycle().unwrap();
//! assert_eq!(processor.register(DataRegister::V0), 0x42);
//! ```

pub mod font;
mod nibble_ints;
pub mod opcode;
pub mod processor;
pub mod screen;

pub use nibble_ints::{U8Nibble, U12, U4};

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CallStackError {
    #[error("call stack capacity exceeded, pushing of address {address_not_pushed:X} failed")]
    Overflow { address_not_pushed: u16 },
    #[error("pop from an empty call stack")]
    Underflow,
}

/// Return addresses of the subroutines currently being executed.
///
/// A fixed array of [`CallStack::CAPACITY`] slots with a stack pointer
/// that indexes the first free slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallStack {
    slots: [u16; Self::CAPACITY],
    stack_pointer: usize,
}

impl CallStack {
    pub const CAPACITY: usize = 16;

    /// Number of return addresses currently on the stack, i.e. the stack pointer.
    pub fn len(&self) -> usize {
        self.stack_pointer
    }

    pub fn is_empty(&self) -> bool {
        self.stack_pointer == 0
    }

    /// The return addresses, innermost call last.
    pub fn as_slice(&self) -> &[u16] {
        &self.slots[..self.stack_pointer]
    }

    pub fn push(&mut self, address: u16) -> Result<(), CallStackError> {
        if self.stack_pointer == Self::CAPACITY {
            return Err(CallStackError::Overflow {
                address_not_pushed: address,
            });
        }
        self.slots[self.stack_pointer] = address;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, CallStackError> {
        if self.stack_pointer == 0 {
            return Err(CallStackError::Underflow);
        }
        self.stack_pointer -= 1;
        Ok(self.slots[self.stack_pointer])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_pop_lifo() {
        let mut stack = CallStack::default();
        stack.push(0x202).unwrap();
        stack.push(0x30A).unwrap();

        assert_eq!(stack.as_slice(), &[0x202, 0x30A]);
        assert_eq!(stack.pop(), Ok(0x30A));
        assert_eq!(stack.pop(), Ok(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn overflow_is_rejected() {
        let mut stack = CallStack::default();
        for i in 0..CallStack::CAPACITY as u16 {
            stack.push(0x200 + 2 * i).unwrap();
        }

        assert_eq!(
            stack.push(0x400),
            Err(CallStackError::Overflow {
                address_not_pushed: 0x400
            })
        );
        assert_eq!(stack.len(), CallStack::CAPACITY);
    }

    #[test]
    fn underflow_is_rejected() {
        let mut stack = CallStack::default();
        assert_eq!(stack.pop(), Err(CallStackError::Underflow));
        assert_eq!(stack.len(), 0);
    }
}

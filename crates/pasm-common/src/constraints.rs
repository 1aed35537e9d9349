use std::ops::RangeInclusive;

use crate::register::{Name, Physical};

pub const REGISTER_COUNT: usize = 32;
pub const STACK_POINTER: Physical = Physical(29);
pub const SCRATCH_VALUE: Physical = Physical(30);
pub const SCRATCH_ADDRESS: Physical = Physical(31);
pub const CALLER_SAVED: RangeInclusive<usize> = 0..=15;
pub const SPILL_STRIDE: usize = 4;
pub const MAX_SPILL_ITERATIONS: usize = 100;

/// Describes the target machine to the allocator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constraints {
    /// Total number of physical registers.
    pub registers: usize,

    /// Names which never take part in coloring, together with the register
    /// they are bound to.
    pub reserved: Vec<(Name, Physical)>,

    pub stack_pointer: Physical,
    pub scratch_value: Physical,
    pub scratch_address: Physical,

    /// Registers a caller preserves around a `CALL`.
    pub caller_saved: RangeInclusive<usize>,

    /// Size in bytes of one spill slot.
    pub spill_stride: usize,

    pub max_spill_iterations: usize,
}

impl Constraints {
    pub fn new() -> Self {
        Self {
            registers: REGISTER_COUNT,
            reserved: vec![
                (Name::new("SP"), STACK_POINTER),
                (Name::new(SCRATCH_VALUE.to_string()), SCRATCH_VALUE),
                (Name::new(SCRATCH_ADDRESS.to_string()), SCRATCH_ADDRESS),
            ],
            stack_pointer: STACK_POINTER,
            scratch_value: SCRATCH_VALUE,
            scratch_address: SCRATCH_ADDRESS,
            caller_saved: CALLER_SAVED,
            spill_stride: SPILL_STRIDE,
            max_spill_iterations: MAX_SPILL_ITERATIONS,
        }
    }

    pub fn with_max_spill_iterations(self, max_spill_iterations: usize) -> Self {
        Self {
            max_spill_iterations,
            ..self
        }
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_register(name).is_some()
    }

    pub fn reserved_register(&self, name: &str) -> Option<Physical> {
        self.reserved
            .iter()
            .find(|(reserved, _)| reserved.as_str() == name)
            .map(|(_, physical)| *physical)
    }

    /// The registers colors may be mapped to, in ascending order.
    pub fn allocatable(&self) -> Vec<Physical> {
        (0..self.registers)
            .map(Physical)
            .filter(|reg| self.reserved.iter().all(|(_, reserved)| reserved != reg))
            .collect()
    }

    /// The largest number of colors a coloring may use.
    pub fn budget(&self) -> usize {
        self.allocatable().len()
    }

    /// Map a color to the physical register it denotes.
    pub fn physical(&self, color: usize) -> Option<Physical> {
        self.allocatable().get(color).copied()
    }

    pub fn is_caller_saved(&self, reg: Physical) -> bool {
        self.caller_saved.contains(&reg.0)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_registers_are_not_allocatable() {
        let constraints = Constraints::new();
        let allocatable = constraints.allocatable();

        assert_eq!(29, constraints.budget());
        assert!(!allocatable.contains(&STACK_POINTER));
        assert!(!allocatable.contains(&SCRATCH_VALUE));
        assert!(!allocatable.contains(&SCRATCH_ADDRESS));
        assert_eq!(Some(Physical(0)), constraints.physical(0));
        assert_eq!(Some(Physical(28)), constraints.physical(28));
        assert_eq!(None, constraints.physical(29));
    }

    #[test]
    fn reserved_names() {
        let constraints = Constraints::new();

        assert_eq!(Some(STACK_POINTER), constraints.reserved_register("SP"));
        assert_eq!(Some(SCRATCH_VALUE), constraints.reserved_register("R30"));
        assert_eq!(Some(SCRATCH_ADDRESS), constraints.reserved_register("R31"));
        assert!(!constraints.is_reserved("R29"));
    }
}

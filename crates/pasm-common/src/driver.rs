use crate::message::Messages;
use crate::register::Name;

pub trait Driver {
    fn report(&mut self, messages: Messages);

    /// Called whenever the allocator demotes a register to memory.
    fn report_spill(&mut self, name: &Name, conflicts: usize);
    fn done_spilling(&mut self, spilled: usize, colors: usize);
}

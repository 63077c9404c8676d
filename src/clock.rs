//! Machine-cycle counter.
//!
//! Instruction timings are counted in machine cycles (one machine cycle is
//! four clock ticks on the real hardware). The hosting application reads the
//! running total to keep video and audio subsystems in sync with the CPU.

/// Monotonically increasing cycle counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    m_cycles: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the cost of one executed instruction into the running total.
    pub(crate) fn advance(&mut self, m_cycles: u8) {
        self.m_cycles += u64::from(m_cycles);
    }

    /// Total elapsed machine cycles since construction or the last reset.
    pub fn m_cycles(&self) -> u64 {
        self.m_cycles
    }

    /// Total elapsed clock ticks (four per machine cycle).
    pub fn t_cycles(&self) -> u64 {
        self.m_cycles * 4
    }

    pub fn reset(&mut self) {
        self.m_cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_and_resets() {
        let mut clock = Clock::new();
        clock.advance(2);
        clock.advance(3);
        assert_eq!(clock.m_cycles(), 5);
        assert_eq!(clock.t_cycles(), 20);

        clock.reset();
        assert_eq!(clock.m_cycles(), 0);
    }
}

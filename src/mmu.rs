//! Flat 64 KiB addressable byte space.
//!
//! The CPU fetches instructions and data through this unit. In a complete
//! system different address ranges are backed by different hardware (ROM,
//! work RAM, video RAM, I/O registers); that mapping lives in the hosting
//! application, which populates and inspects this space around CPU steps.
//! Here every address is plain storage.

use crate::error::{CoreError, CoreResult};

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// The memory-mapping unit: a fixed-size mapping from 16-bit address to
/// 8-bit value. Words are stored little-endian.
pub struct Mmu {
    memory: Box<[u8; MEMORY_SIZE]>,
}

impl Mmu {
    pub fn new() -> Self {
        Mmu {
            memory: Box::new([0; MEMORY_SIZE]),
        }
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }

    /// Read a 16-bit word: low byte at `address`, high byte at `address + 1`.
    ///
    /// A word at 0xFFFF would straddle the end of the address space, which is
    /// reported as [`CoreError::OutOfRangeAddress`].
    pub fn read_word(&self, address: u16) -> CoreResult<u16> {
        let high_address = address
            .checked_add(1)
            .ok_or(CoreError::OutOfRangeAddress { address })?;
        let low = u16::from(self.read_byte(address));
        let high = u16::from(self.read_byte(high_address));
        Ok(high << 8 | low)
    }

    /// Write a 16-bit word: low byte to `address`, high byte to `address + 1`.
    pub fn write_word(&mut self, address: u16, value: u16) -> CoreResult<()> {
        let high_address = address
            .checked_add(1)
            .ok_or(CoreError::OutOfRangeAddress { address })?;
        self.write_byte(address, (value & 0x00FF) as u8);
        self.write_byte(high_address, (value >> 8) as u8);
        Ok(())
    }

    /// Zero every addressable byte.
    pub fn reset(&mut self) {
        self.memory.fill(0);
    }
}

impl Default for Mmu {
    fn default() -> Self {
        Mmu::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let mut mmu = Mmu::new();
        mmu.write_byte(0x0000, 0xAB);
        mmu.write_byte(0xC123, 0x5C);
        mmu.write_byte(0xFFFF, 0x01);

        assert_eq!(mmu.read_byte(0x0000), 0xAB);
        assert_eq!(mmu.read_byte(0xC123), 0x5C);
        assert_eq!(mmu.read_byte(0xFFFF), 0x01);
    }

    #[test]
    fn word_round_trip_is_little_endian() {
        let mut mmu = Mmu::new();
        mmu.write_word(0xC000, 0xBEEF).unwrap();

        assert_eq!(mmu.read_word(0xC000).unwrap(), 0xBEEF);
        assert_eq!(mmu.read_byte(0xC000), 0xEF);
        assert_eq!(mmu.read_byte(0xC001), 0xBE);
    }

    #[test]
    fn word_access_at_last_address_is_rejected() {
        let mut mmu = Mmu::new();
        let expected = CoreError::OutOfRangeAddress { address: 0xFFFF };

        assert_eq!(mmu.read_word(0xFFFF), Err(expected));
        assert_eq!(mmu.write_word(0xFFFF, 0x1234), Err(expected));
        // The failed write must not have touched the low byte either.
        assert_eq!(mmu.read_byte(0xFFFF), 0x00);
    }

    #[test]
    fn reset_clears_every_address() {
        let mut mmu = Mmu::new();
        mmu.write_byte(0x0000, 0xFF);
        mmu.write_byte(0x8000, 0xFF);
        mmu.write_byte(0xFFFF, 0xFF);

        mmu.reset();

        for address in 0..=0xFFFFu16 {
            assert_eq!(mmu.read_byte(address), 0, "address {address:#06X}");
        }
    }
}

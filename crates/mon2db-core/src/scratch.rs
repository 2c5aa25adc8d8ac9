//! Typed scratch buffer pool backing prepared-statement parameters.
//!
//! Every statement's parameters are assigned slots out of fixed banks,
//! one bank per [`BindType`] family, sized for the widest statement
//! that uses each bank. Handlers write into the slots and the executor
//! reads the current values out when a statement runs.

use anyhow::bail;

use crate::bind::BindType;
use crate::value::Value;
use crate::Result;

pub const I8_SLOTS: usize = 27;
pub const I16_SLOTS: usize = 4;
pub const I32_SLOTS: usize = 2;
pub const U32_SLOTS: usize = 14;
pub const F64_SLOTS: usize = 9;
pub const SHORT_STR_SLOTS: usize = 13;
pub const LONG_STR_SLOTS: usize = 2;
pub const NULL_SLOTS: usize = 4;

/// Byte capacity of a short string slot.
pub const SHORT_STR_MAX: usize = 255;
/// Byte capacity of a long string slot.
pub const LONG_STR_MAX: usize = 65535;

/// Which bank a bind type draws slots from. Unix timestamps share the
/// `u32` bank since they bind as epoch seconds.
fn bank(ty: BindType) -> Bank {
    match ty {
        BindType::I8 => Bank::I8,
        BindType::I16 => Bank::I16,
        BindType::I32 => Bank::I32,
        BindType::U32 | BindType::UnixTime => Bank::U32,
        BindType::F64 => Bank::F64,
        BindType::ShortStr => Bank::ShortStr,
        BindType::LongStr => Bank::LongStr,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bank {
    I8,
    I16,
    I32,
    U32,
    F64,
    ShortStr,
    LongStr,
}

/// A reserved position in one of the pool's banks.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    bank: Bank,
    index: usize,
}

/// A reserved null-flag position for a nullable column.
#[derive(Debug, Clone, Copy)]
pub struct NullSlot {
    index: usize,
}

/// Slot counts handed out so far, one counter per bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolUsage {
    pub i8s: usize,
    pub i16s: usize,
    pub i32s: usize,
    pub u32s: usize,
    pub f64s: usize,
    pub short_strs: usize,
    pub long_strs: usize,
    pub nulls: usize,
}

impl PoolUsage {
    /// Folds another statement's usage into a high-water mark.
    pub fn merge_max(&mut self, other: PoolUsage) {
        self.i8s = self.i8s.max(other.i8s);
        self.i16s = self.i16s.max(other.i16s);
        self.i32s = self.i32s.max(other.i32s);
        self.u32s = self.u32s.max(other.u32s);
        self.f64s = self.f64s.max(other.f64s);
        self.short_strs = self.short_strs.max(other.short_strs);
        self.long_strs = self.long_strs.max(other.long_strs);
        self.nulls = self.nulls.max(other.nulls);
    }
}

/// Hands out slots at statement-preparation time, enforcing the bank
/// capacities. Each statement allocates from position zero of each
/// bank, so statements share slot storage; only one statement's
/// parameters are live at a time.
#[derive(Debug, Default)]
pub struct SlotAllocator {
    usage: PoolUsage,
}

impl SlotAllocator {
    pub fn new() -> SlotAllocator {
        SlotAllocator::default()
    }

    /// Reserves the next slot in the bank for `ty`, failing when the
    /// bank is exhausted.
    pub fn alloc(&mut self, ty: BindType) -> Result<Slot> {
        let bank = bank(ty);
        let (count, cap) = match bank {
            Bank::I8 => (&mut self.usage.i8s, I8_SLOTS),
            Bank::I16 => (&mut self.usage.i16s, I16_SLOTS),
            Bank::I32 => (&mut self.usage.i32s, I32_SLOTS),
            Bank::U32 => (&mut self.usage.u32s, U32_SLOTS),
            Bank::F64 => (&mut self.usage.f64s, F64_SLOTS),
            Bank::ShortStr => (&mut self.usage.short_strs, SHORT_STR_SLOTS),
            Bank::LongStr => (&mut self.usage.long_strs, LONG_STR_SLOTS),
        };
        if *count >= cap {
            bail!("scratch pool exhausted: {:?} bank holds {} slots", bank, cap);
        }
        let slot = Slot { bank, index: *count };
        *count += 1;
        Ok(slot)
    }

    /// Reserves a null flag for a nullable column.
    pub fn alloc_null(&mut self) -> Result<NullSlot> {
        if self.usage.nulls >= NULL_SLOTS {
            bail!("scratch pool exhausted: null bank holds {} slots", NULL_SLOTS);
        }
        let slot = NullSlot { index: self.usage.nulls };
        self.usage.nulls += 1;
        Ok(slot)
    }

    pub fn usage(&self) -> PoolUsage {
        self.usage
    }
}

/// The live parameter values. Writes cast to the slot's width the way
/// the column expects; reads produce [`Value`]s for the executor.
#[derive(Debug)]
pub struct ScratchPool {
    i8s: [i8; I8_SLOTS],
    i16s: [i16; I16_SLOTS],
    i32s: [i32; I32_SLOTS],
    u32s: [u32; U32_SLOTS],
    f64s: [f64; F64_SLOTS],
    short_strs: Vec<String>,
    long_strs: Vec<String>,
    nulls: [bool; NULL_SLOTS],
}

impl ScratchPool {
    pub fn new() -> ScratchPool {
        ScratchPool {
            i8s: [0; I8_SLOTS],
            i16s: [0; I16_SLOTS],
            i32s: [0; I32_SLOTS],
            u32s: [0; U32_SLOTS],
            f64s: [0.0; F64_SLOTS],
            short_strs: vec![String::new(); SHORT_STR_SLOTS],
            long_strs: vec![String::new(); LONG_STR_SLOTS],
            nulls: [false; NULL_SLOTS],
        }
    }

    /// Writes a signed integer, cast to the slot's width.
    pub fn put_int(&mut self, slot: Slot, v: i64) {
        match slot.bank {
            Bank::I8 => self.i8s[slot.index] = v as i8,
            Bank::I16 => self.i16s[slot.index] = v as i16,
            Bank::I32 => self.i32s[slot.index] = v as i32,
            Bank::U32 => self.u32s[slot.index] = v as u32,
            Bank::F64 => self.f64s[slot.index] = v as f64,
            Bank::ShortStr | Bank::LongStr => debug_assert!(false, "int write to string slot"),
        }
    }

    /// Writes an unsigned integer, cast to the slot's width.
    pub fn put_uint(&mut self, slot: Slot, v: u64) {
        match slot.bank {
            Bank::I8 => self.i8s[slot.index] = v as i8,
            Bank::I16 => self.i16s[slot.index] = v as i16,
            Bank::I32 => self.i32s[slot.index] = v as i32,
            Bank::U32 => self.u32s[slot.index] = v as u32,
            Bank::F64 => self.f64s[slot.index] = v as f64,
            Bank::ShortStr | Bank::LongStr => debug_assert!(false, "int write to string slot"),
        }
    }

    pub fn put_f64(&mut self, slot: Slot, v: f64) {
        match slot.bank {
            Bank::F64 => self.f64s[slot.index] = v,
            _ => debug_assert!(false, "float write to non-float slot"),
        }
    }

    /// Writes a string, truncated to the slot's byte capacity on a
    /// character boundary.
    pub fn put_str(&mut self, slot: Slot, s: &str) {
        let (dst, cap) = match slot.bank {
            Bank::ShortStr => (&mut self.short_strs[slot.index], SHORT_STR_MAX),
            Bank::LongStr => (&mut self.long_strs[slot.index], LONG_STR_MAX),
            _ => {
                debug_assert!(false, "string write to numeric slot");
                return;
            }
        };
        dst.clear();
        dst.push_str(truncate_str(s, cap));
    }

    pub fn set_null(&mut self, slot: NullSlot, null: bool) {
        self.nulls[slot.index] = null;
    }

    pub fn is_null(&self, slot: NullSlot) -> bool {
        self.nulls[slot.index]
    }

    /// Reads the current value of a slot.
    pub fn value(&self, slot: Slot) -> Value {
        match slot.bank {
            Bank::I8 => Value::I8(self.i8s[slot.index]),
            Bank::I16 => Value::I16(self.i16s[slot.index]),
            Bank::I32 => Value::I32(self.i32s[slot.index]),
            Bank::U32 => Value::U32(self.u32s[slot.index]),
            Bank::F64 => Value::F64(self.f64s[slot.index]),
            Bank::ShortStr => Value::Str(self.short_strs[slot.index].clone()),
            Bank::LongStr => Value::Str(self.long_strs[slot.index].clone()),
        }
    }
}

impl Default for ScratchPool {
    fn default() -> ScratchPool {
        ScratchPool::new()
    }
}

/// Truncates to at most `max` bytes without splitting a character.
fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_respects_capacity() {
        let mut alloc = SlotAllocator::new();
        for _ in 0..I16_SLOTS {
            alloc.alloc(BindType::I16).unwrap();
        }
        assert!(alloc.alloc(BindType::I16).is_err());
        // Other banks are unaffected.
        assert!(alloc.alloc(BindType::I8).is_ok());
        assert_eq!(alloc.usage().i16s, I16_SLOTS);
    }

    #[test]
    fn unix_time_shares_u32_bank() {
        let mut alloc = SlotAllocator::new();
        alloc.alloc(BindType::U32).unwrap();
        alloc.alloc(BindType::UnixTime).unwrap();
        assert_eq!(alloc.usage().u32s, 2);
    }

    #[test]
    fn writes_cast_to_slot_width() {
        let mut alloc = SlotAllocator::new();
        let mut pool = ScratchPool::new();

        let narrow = alloc.alloc(BindType::I8).unwrap();
        pool.put_int(narrow, 0x1_02);
        assert_eq!(pool.value(narrow), Value::I8(2));

        let wide = alloc.alloc(BindType::U32).unwrap();
        pool.put_uint(wide, 7);
        assert_eq!(pool.value(wide), Value::U32(7));
    }

    #[test]
    fn string_truncation_respects_boundaries() {
        let mut alloc = SlotAllocator::new();
        let mut pool = ScratchPool::new();
        let slot = alloc.alloc(BindType::ShortStr).unwrap();

        let long = "é".repeat(200); // 400 bytes
        pool.put_str(slot, &long);
        match pool.value(slot) {
            Value::Str(s) => {
                assert!(s.len() <= SHORT_STR_MAX);
                assert_eq!(s.len(), 254); // 255 splits a two-byte char
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn null_flags() {
        let mut alloc = SlotAllocator::new();
        let mut pool = ScratchPool::new();
        let flag = alloc.alloc_null().unwrap();
        assert!(!pool.is_null(flag));
        pool.set_null(flag, true);
        assert!(pool.is_null(flag));
    }
}

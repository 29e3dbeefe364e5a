//! One decoder per representation code. Each takes the cursor, consumes
//! exactly the encoded length, and returns the natural Rust type; the
//! [`decode_value`] dispatch widens everything into [`Value`].

use eyre::Result;
use smallvec::SmallVec;

use super::{Cursor, ReprCode};
use crate::types::{DateTime, Obname, Value};

/// 16-bit low-precision float: sign bit, 12-bit two's-complement fraction
/// in the high bits, 4-bit exponent in the low bits.
pub fn fshort(cur: &mut Cursor) -> Result<f32> {
    let v = cur.be_u16()?;

    let sign_bit = v & 0x8000 != 0;
    let exp_bits = v & 0x000F;
    let mut frac_bits = (v & 0xFFF0) >> 4;
    if sign_bit {
        frac_bits = (!frac_bits & 0x0FFF) + 1;
    }

    let sign = if sign_bit { -1.0f32 } else { 1.0 };
    let fraction = frac_bits as f32 / (1 << 11) as f32;
    Ok(sign * fraction * (exp_bits as f32).exp2())
}

pub fn fsingl(cur: &mut Cursor) -> Result<f32> {
    Ok(f32::from_be_bytes(cur.take_array()?))
}

/// Validated single: value V and absolute error A.
pub fn fsing1(cur: &mut Cursor) -> Result<(f32, f32)> {
    Ok((fsingl(cur)?, fsingl(cur)?))
}

/// Two-way validated single: value V, plus bound A, minus bound B.
pub fn fsing2(cur: &mut Cursor) -> Result<(f32, f32, f32)> {
    Ok((fsingl(cur)?, fsingl(cur)?, fsingl(cur)?))
}

/// IBM System/360 hexadecimal single, converted to IEEE.
pub fn isingl(cur: &mut Cursor) -> Result<f32> {
    const IEEEMAX: u32 = 0x7FFF_FFFF;
    const IEMAXIB: u32 = 0x611F_FFFF;
    const IEMINIB: u32 = 0x2120_0000;
    const IT: [u32; 8] = [
        0x2180_0000,
        0x2140_0000,
        0x2100_0000,
        0x2100_0000,
        0x20C0_0000,
        0x20C0_0000,
        0x20C0_0000,
        0x20C0_0000,
    ];
    const MT: [u32; 8] = [8, 4, 2, 2, 1, 1, 1, 1];

    let u = cur.be_u32()?;

    let mut manthi = u & 0x00FF_FFFF;
    let ix = (manthi >> 21) as usize;
    let iexp = (u & 0x7F00_0000).wrapping_sub(IT[ix]) << 1;
    manthi = manthi.wrapping_mul(MT[ix]).wrapping_add(iexp);

    let inabs = u & 0x7FFF_FFFF;
    if inabs > IEMAXIB {
        manthi = IEEEMAX;
    }
    manthi |= u & 0x8000_0000;

    let bits = if inabs < IEMINIB { 0 } else { manthi };
    Ok(f32::from_bits(bits))
}

/// VAX F-floating. The 32-bit word arrives word-swapped relative to its
/// natural little-endian layout; the exponent is excess-128 with a hidden
/// 0.5 bit. Exponent 0 with sign 0 is exactly zero; exponent 0 with sign 1
/// is a reserved operand and decodes to NaN.
pub fn vsingl(cur: &mut Cursor) -> Result<f32> {
    let x: [u8; 4] = cur.take_array()?;
    let v = (x[1] as u32) << 24 | (x[0] as u32) << 16 | (x[3] as u32) << 8 | (x[2] as u32);

    let sign_bit = v & 0x8000_0000 != 0;
    let frac_bits = v & 0x007F_FFFF;
    let exp_bits = (v & 0x7F80_0000) >> 23;

    if exp_bits == 0 {
        return Ok(if sign_bit { f32::NAN } else { 0.0 });
    }

    let sign = if sign_bit { -1.0f32 } else { 1.0 };
    let significand = frac_bits as f32 / 0x0080_0000 as f32;
    Ok(sign * (0.5 + significand) * (exp_bits as f32 - 128.0).exp2())
}

pub fn fdoubl(cur: &mut Cursor) -> Result<f64> {
    Ok(f64::from_be_bytes(cur.take_array()?))
}

pub fn fdoub1(cur: &mut Cursor) -> Result<(f64, f64)> {
    Ok((fdoubl(cur)?, fdoubl(cur)?))
}

pub fn fdoub2(cur: &mut Cursor) -> Result<(f64, f64, f64)> {
    Ok((fdoubl(cur)?, fdoubl(cur)?, fdoubl(cur)?))
}

pub fn csingl(cur: &mut Cursor) -> Result<(f32, f32)> {
    Ok((fsingl(cur)?, fsingl(cur)?))
}

pub fn cdoubl(cur: &mut Cursor) -> Result<(f64, f64)> {
    Ok((fdoubl(cur)?, fdoubl(cur)?))
}

pub fn sshort(cur: &mut Cursor) -> Result<i8> {
    Ok(cur.u8()? as i8)
}

pub fn snorm(cur: &mut Cursor) -> Result<i16> {
    Ok(i16::from_be_bytes(cur.take_array()?))
}

pub fn slong(cur: &mut Cursor) -> Result<i32> {
    Ok(i32::from_be_bytes(cur.take_array()?))
}

pub fn ushort(cur: &mut Cursor) -> Result<u8> {
    cur.u8()
}

pub fn unorm(cur: &mut Cursor) -> Result<u16> {
    cur.be_u16()
}

pub fn ulong(cur: &mut Cursor) -> Result<u32> {
    cur.be_u32()
}

/// Variable-width unsigned integer. The top bits of the first byte select
/// the width: `0…` one byte, `10` two bytes, `11` four bytes; the tag bits
/// are masked off the value.
pub fn uvari(cur: &mut Cursor) -> Result<u32> {
    let first = cur.u8()?;

    if first & 0x80 == 0 {
        return Ok(first as u32);
    }

    if first & 0x40 == 0 {
        let low = cur.u8()?;
        return Ok(((first & 0x3F) as u32) << 8 | low as u32);
    }

    let rest: [u8; 3] = cur.take_array()?;
    Ok(((first & 0x3F) as u32) << 24
        | (rest[0] as u32) << 16
        | (rest[1] as u32) << 8
        | rest[2] as u32)
}

/// Short identifier: u8 length prefix, then the payload.
pub fn ident(cur: &mut Cursor) -> Result<String> {
    let len = cur.u8()? as usize;
    let bytes = cur.take(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Arbitrary-length text: UVARI length prefix, then the payload.
pub fn ascii(cur: &mut Cursor) -> Result<String> {
    let len = uvari(cur)? as usize;
    let bytes = cur.take(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Eight-byte packed date-time: year offset from 1900, timezone and month
/// packed in one byte, then day, hour, minute, second, and a two-byte
/// millisecond field.
pub fn dtime(cur: &mut Cursor) -> Result<DateTime> {
    let b: [u8; 8] = cur.take_array()?;
    Ok(DateTime {
        year: 1900 + b[0] as i32,
        tz: b[1] >> 4,
        month: b[1] & 0x0F,
        day: b[2],
        hour: b[3],
        minute: b[4],
        second: b[5],
        millisecond: u16::from_be_bytes([b[6], b[7]]),
    })
}

/// One-byte boolean; any nonzero byte is true.
pub fn status(cur: &mut Cursor) -> Result<bool> {
    Ok(cur.u8()? != 0)
}

pub fn obname(cur: &mut Cursor) -> Result<Obname> {
    let origin = uvari(cur)?;
    let copy = ushort(cur)?;
    let id = ident(cur)?;
    Ok(Obname { origin, copy, id })
}

/// Decodes one value of the given representation code.
pub fn decode_value(cur: &mut Cursor, reprc: ReprCode) -> Result<Value> {
    let value = match reprc {
        ReprCode::Fshort => Value::Real(fshort(cur)? as f64),
        ReprCode::Fsingl => Value::Real(fsingl(cur)? as f64),
        ReprCode::Fsing1 => {
            let (v, a) = fsing1(cur)?;
            Value::Pair(v as f64, a as f64)
        }
        ReprCode::Fsing2 => {
            let (v, a, b) = fsing2(cur)?;
            Value::Triple(v as f64, a as f64, b as f64)
        }
        ReprCode::Isingl => Value::Real(isingl(cur)? as f64),
        ReprCode::Vsingl => Value::Real(vsingl(cur)? as f64),
        ReprCode::Fdoubl => Value::Real(fdoubl(cur)?),
        ReprCode::Fdoub1 => {
            let (v, a) = fdoub1(cur)?;
            Value::Pair(v, a)
        }
        ReprCode::Fdoub2 => {
            let (v, a, b) = fdoub2(cur)?;
            Value::Triple(v, a, b)
        }
        ReprCode::Csingl => {
            let (re, im) = csingl(cur)?;
            Value::Complex {
                re: re as f64,
                im: im as f64,
            }
        }
        ReprCode::Cdoubl => {
            let (re, im) = cdoubl(cur)?;
            Value::Complex { re, im }
        }
        ReprCode::Sshort => Value::Int(sshort(cur)? as i64),
        ReprCode::Snorm => Value::Int(snorm(cur)? as i64),
        ReprCode::Slong => Value::Int(slong(cur)? as i64),
        ReprCode::Ushort => Value::Int(ushort(cur)? as i64),
        ReprCode::Unorm => Value::Int(unorm(cur)? as i64),
        ReprCode::Ulong => Value::Int(ulong(cur)? as i64),
        ReprCode::Uvari | ReprCode::Origin => Value::Int(uvari(cur)? as i64),
        ReprCode::Ident => Value::Text(ident(cur)?),
        ReprCode::Ascii => Value::Text(ascii(cur)?),
        ReprCode::Dtime => Value::DateTime(dtime(cur)?),
        ReprCode::Status => Value::Bool(status(cur)?),
        ReprCode::Obname => Value::Obname(obname(cur)?),
    };
    Ok(value)
}

/// Decodes `count` values of one representation code into an ordered
/// sequence. The sequence shape is preserved even when `count == 1`.
pub fn decode_vector(
    cur: &mut Cursor,
    count: u32,
    reprc: ReprCode,
) -> Result<SmallVec<[Value; 1]>> {
    // every value consumes at least one byte, so the remaining payload
    // bounds any honest count; a hostile count must not reserve more
    let mut values = SmallVec::with_capacity((count as usize).min(cur.remaining()));
    for _ in 0..count {
        values.push(decode_value(cur, reprc)?);
    }
    Ok(values)
}

//! Modified UTF-8, the string encoding of `CONSTANT_Utf8` entries.
//!
//! Differs from standard UTF-8 in two ways: NUL is written as `C0 80`, and
//! supplementary characters are written as two 3-byte surrogate halves.

pub(crate) fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

pub(crate) fn decode(bytes: &[u8]) -> Option<String> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let (unit, width) = match b {
            0x01..=0x7F => (b as u16, 1),
            _ if b & 0xE0 == 0xC0 => {
                let b2 = continuation(bytes, i + 1)?;
                ((((b & 0x1F) as u16) << 6) | b2, 2)
            }
            _ if b & 0xF0 == 0xE0 => {
                let b2 = continuation(bytes, i + 1)?;
                let b3 = continuation(bytes, i + 2)?;
                ((((b & 0x0F) as u16) << 12) | (b2 << 6) | b3, 3)
            }
            _ => return None,
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16(&units).ok()
}

fn continuation(bytes: &[u8], at: usize) -> Option<u16> {
    let b = *bytes.get(at)?;
    (b & 0xC0 == 0x80).then_some((b & 0x3F) as u16)
}

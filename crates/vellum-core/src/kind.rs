//! Primitive field kinds, runtime values, and mutability flags.
//!
//! A [`FieldKind`] names one of the fixed-width primitives a record
//! field can hold. Kinds carry their own size and natural alignment,
//! which the schema compiler uses to lay fields out deterministically.
//! Values cross the engine boundary as [`FieldValue`]s and are encoded
//! little-endian in the arena regardless of host byte order, so
//! independently compiled consumers of a shared region always agree on
//! the bytes.

use std::fmt;

/// Primitive kind of a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-byte boolean (0 or 1 in storage).
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit IEEE-754 float.
    F32,
    /// 64-bit IEEE-754 float.
    F64,
}

impl FieldKind {
    /// Storage size of this kind in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Natural alignment of this kind in bytes.
    ///
    /// Equal to the size for every fixed-width primitive, which is what
    /// the layout algorithm relies on.
    pub fn align(&self) -> u32 {
        self.size()
    }

    /// Canonical declaration name, as accepted by [`FieldKind::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "byte",
            Self::U8 => "ubyte",
            Self::I16 => "short",
            Self::U16 => "ushort",
            Self::I32 => "int",
            Self::U32 => "uint",
            Self::I64 => "long",
            Self::U64 => "ulong",
            Self::F32 => "float",
            Self::F64 => "double",
        }
    }

    /// Parse a declaration-surface kind name.
    ///
    /// Accepts the binding-layer vocabulary (`"bool"`, `"ushort"`,
    /// `"double"`, …) as well as Rust-style aliases (`"u16"`, `"f64"`).
    /// Returns `None` for an unknown name; the schema compiler turns
    /// that into a `SchemaError`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "byte" | "i8" => Some(Self::I8),
            "ubyte" | "u8" => Some(Self::U8),
            "short" | "i16" => Some(Self::I16),
            "ushort" | "u16" => Some(Self::U16),
            "int" | "i32" => Some(Self::I32),
            "uint" | "u32" => Some(Self::U32),
            "long" | "i64" => Some(Self::I64),
            "ulong" | "u64" => Some(Self::U64),
            "float" | "f32" => Some(Self::F32),
            "double" | "f64" => Some(Self::F64),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a field may be rewritten after its first write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// Writable exactly once, at or after construction; immutable after.
    Const,
    /// Writable any number of times.
    Mutable,
}

/// A runtime value for a single record field.
///
/// The engine is value-typed at its boundary: the binding layer hands
/// in a `FieldValue`, the arena encodes it at the field's descriptor
/// offset, and reads decode back into the same variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    /// A boolean value.
    Bool(bool),
    /// A signed 8-bit value.
    I8(i8),
    /// An unsigned 8-bit value.
    U8(u8),
    /// A signed 16-bit value.
    I16(i16),
    /// An unsigned 16-bit value.
    U16(u16),
    /// A signed 32-bit value.
    I32(i32),
    /// An unsigned 32-bit value.
    U32(u32),
    /// A signed 64-bit value.
    I64(i64),
    /// An unsigned 64-bit value.
    U64(u64),
    /// A 32-bit float value.
    F32(f32),
    /// A 64-bit float value.
    F64(f64),
}

impl FieldValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::I8(_) => FieldKind::I8,
            Self::U8(_) => FieldKind::U8,
            Self::I16(_) => FieldKind::I16,
            Self::U16(_) => FieldKind::U16,
            Self::I32(_) => FieldKind::I32,
            Self::U32(_) => FieldKind::U32,
            Self::I64(_) => FieldKind::I64,
            Self::U64(_) => FieldKind::U64,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
        }
    }

    /// Encode this value little-endian into `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len()` differs from `self.kind().size()`. Callers
    /// inside the arena always slice the payload to the descriptor's
    /// field size first.
    pub fn encode(&self, buf: &mut [u8]) {
        assert_eq!(
            buf.len(),
            self.kind().size() as usize,
            "field buffer size mismatch"
        );
        match *self {
            Self::Bool(v) => buf[0] = v as u8,
            Self::I8(v) => buf[0] = v as u8,
            Self::U8(v) => buf[0] = v,
            Self::I16(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::U16(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::I32(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::U32(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::I64(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::U64(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::F32(v) => buf.copy_from_slice(&v.to_le_bytes()),
            Self::F64(v) => buf.copy_from_slice(&v.to_le_bytes()),
        }
    }

    /// Decode a value of the given kind from little-endian `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len()` differs from `kind.size()`.
    pub fn decode(kind: FieldKind, buf: &[u8]) -> Self {
        assert_eq!(
            buf.len(),
            kind.size() as usize,
            "field buffer size mismatch"
        );
        match kind {
            FieldKind::Bool => Self::Bool(buf[0] != 0),
            FieldKind::I8 => Self::I8(buf[0] as i8),
            FieldKind::U8 => Self::U8(buf[0]),
            FieldKind::I16 => Self::I16(i16::from_le_bytes([buf[0], buf[1]])),
            FieldKind::U16 => Self::U16(u16::from_le_bytes([buf[0], buf[1]])),
            FieldKind::I32 => {
                Self::I32(i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
            }
            FieldKind::U32 => {
                Self::U32(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
            }
            FieldKind::I64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(buf);
                Self::I64(i64::from_le_bytes(b))
            }
            FieldKind::U64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(buf);
                Self::U64(u64::from_le_bytes(b))
            }
            FieldKind::F32 => {
                Self::F32(f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
            }
            FieldKind::F64 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(buf);
                Self::F64(f64::from_le_bytes(b))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_KINDS: [FieldKind; 11] = [
        FieldKind::Bool,
        FieldKind::I8,
        FieldKind::U8,
        FieldKind::I16,
        FieldKind::U16,
        FieldKind::I32,
        FieldKind::U32,
        FieldKind::I64,
        FieldKind::U64,
        FieldKind::F32,
        FieldKind::F64,
    ];

    #[test]
    fn align_equals_size_for_all_kinds() {
        for kind in ALL_KINDS {
            assert_eq!(kind.align(), kind.size(), "{kind}");
        }
    }

    #[test]
    fn canonical_names_parse_back() {
        for kind in ALL_KINDS {
            assert_eq!(FieldKind::parse(kind.name()), Some(kind));
        }
    }

    #[test]
    fn rust_aliases_parse() {
        assert_eq!(FieldKind::parse("u16"), Some(FieldKind::U16));
        assert_eq!(FieldKind::parse("f64"), Some(FieldKind::F64));
    }

    #[test]
    fn unknown_kind_name_rejected() {
        assert_eq!(FieldKind::parse("string"), None);
        assert_eq!(FieldKind::parse(""), None);
        assert_eq!(FieldKind::parse("Bool"), None);
    }

    #[test]
    fn bool_encodes_as_single_byte() {
        let mut buf = [0xffu8; 1];
        FieldValue::Bool(false).encode(&mut buf);
        assert_eq!(buf, [0]);
        FieldValue::Bool(true).encode(&mut buf);
        assert_eq!(buf, [1]);
    }

    #[test]
    fn nonzero_byte_decodes_as_true() {
        // Tolerate regions written by a sloppier producer.
        assert_eq!(
            FieldValue::decode(FieldKind::Bool, &[2]),
            FieldValue::Bool(true)
        );
    }

    proptest! {
        #[test]
        fn u16_encode_decode_round_trip(v: u16) {
            let mut buf = [0u8; 2];
            FieldValue::U16(v).encode(&mut buf);
            prop_assert_eq!(
                FieldValue::decode(FieldKind::U16, &buf),
                FieldValue::U16(v)
            );
        }

        #[test]
        fn i64_encoding_is_little_endian(v: i64) {
            let mut buf = [0u8; 8];
            FieldValue::I64(v).encode(&mut buf);
            prop_assert_eq!(buf, v.to_le_bytes());
        }

        #[test]
        fn f64_encode_decode_round_trip(v: f64) {
            let mut buf = [0u8; 8];
            FieldValue::F64(v).encode(&mut buf);
            // Bit-level comparison; NaN payloads must survive.
            if let FieldValue::F64(back) = FieldValue::decode(FieldKind::F64, &buf) {
                prop_assert_eq!(back.to_bits(), v.to_bits());
            } else {
                prop_assert!(false, "decoded wrong variant");
            }
        }
    }
}

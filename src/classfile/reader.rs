//! Class file reader.
//!
//! Reads the parts of a class file that declaration synthesis needs: the
//! constant pool, class header, fields, methods and a few attributes
//! (`MethodParameters`, `SourceFile`). Code and everything else is skipped.

use smol_str::SmolStr;

use super::{AccessFlags, ClassFileError};

const MAGIC: u32 = 0xCAFE_BABE;

/// A parsed class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access: AccessFlags,
    /// Binary name with slashes, e.g. `a/b/Foo$Inner`.
    pub this_class: SmolStr,
    pub super_class: Option<SmolStr>,
    pub interfaces: Vec<SmolStr>,
    pub fields: Vec<MemberInfo>,
    pub methods: Vec<MemberInfo>,
    pub source_file: Option<SmolStr>,
}

/// A field or method entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub access: AccessFlags,
    pub name: SmolStr,
    pub descriptor: SmolStr,
    /// From `MethodParameters`; empty when the attribute is absent.
    pub parameter_names: Vec<Option<SmolStr>>,
}

impl ClassFile {
    /// Parse a complete class file.
    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFileError> {
        let mut reader = ByteReader::new(bytes);

        let magic = reader.u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        let minor_version = reader.u16()?;
        let major_version = reader.u16()?;
        let pool = ConstantPool::read(&mut reader)?;

        let access = AccessFlags::from_bits(reader.u16()?);
        let this_class = pool.class_name(reader.u16()?)?;
        let super_index = reader.u16()?;
        let super_class = if super_index == 0 {
            None
        } else {
            Some(pool.class_name(super_index)?)
        };

        let interface_count = reader.u16()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            interfaces.push(pool.class_name(reader.u16()?)?);
        }

        let fields = read_members(&mut reader, &pool)?;
        let methods = read_members(&mut reader, &pool)?;

        let mut source_file = None;
        for attribute in read_attributes(&mut reader, &pool)? {
            if attribute.name == "SourceFile" {
                let mut data = ByteReader::new(attribute.data);
                source_file = Some(pool.utf8(data.u16()?)?);
            }
        }

        if reader.remaining() > 0 {
            return Err(ClassFileError::TrailingBytes(reader.remaining()));
        }

        tracing::trace!(
            class = %this_class,
            fields = fields.len(),
            methods = methods.len(),
            "read class file"
        );

        Ok(Self {
            minor_version,
            major_version,
            access,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            source_file,
        })
    }

    /// Simple name: the binary name after the last `/`.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.this_class)
    }

    /// Package part of the binary name in dotted form; empty for the default package.
    pub fn package_name(&self) -> String {
        match self.this_class.rfind('/') {
            Some(idx) => self.this_class[..idx].replace('/', "."),
            None => String::new(),
        }
    }
}

/// The binary name after the last `/`.
pub fn simple_name(binary_name: &str) -> &str {
    match binary_name.rfind('/') {
        Some(idx) => &binary_name[idx + 1..],
        None => binary_name,
    }
}

fn read_members(
    reader: &mut ByteReader<'_>,
    pool: &ConstantPool,
) -> Result<Vec<MemberInfo>, ClassFileError> {
    let count = reader.u16()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access = AccessFlags::from_bits(reader.u16()?);
        let name = pool.utf8(reader.u16()?)?;
        let descriptor = pool.utf8(reader.u16()?)?;

        let mut parameter_names = Vec::new();
        for attribute in read_attributes(reader, pool)? {
            if attribute.name == "MethodParameters" {
                let mut data = ByteReader::new(attribute.data);
                let params = data.u8()?;
                for _ in 0..params {
                    let name_index = data.u16()?;
                    let _flags = data.u16()?;
                    parameter_names.push(if name_index == 0 {
                        None
                    } else {
                        Some(pool.utf8(name_index)?)
                    });
                }
            }
        }

        members.push(MemberInfo {
            access,
            name,
            descriptor,
            parameter_names,
        });
    }
    Ok(members)
}

struct Attribute<'a> {
    name: SmolStr,
    data: &'a [u8],
}

fn read_attributes<'a>(
    reader: &mut ByteReader<'a>,
    pool: &ConstantPool,
) -> Result<Vec<Attribute<'a>>, ClassFileError> {
    let count = reader.u16()?;
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = pool.utf8(reader.u16()?)?;
        let length = reader.u32()? as usize;
        let data = reader.take(length)?;
        attributes.push(Attribute { name, data });
    }
    Ok(attributes)
}

// ============================================================================
// Constant pool
// ============================================================================

#[derive(Debug, Clone)]
enum Constant {
    Utf8(SmolStr),
    Class { name_index: u16 },
    /// Anything synthesis does not look at.
    Other,
    /// Index 0 and the second slot of `Long`/`Double`.
    Unusable,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, ClassFileError> {
        let count = reader.u16()?;
        let mut entries = Vec::with_capacity(count as usize);
        entries.push(Constant::Unusable);

        let mut index = 1u16;
        while index < count {
            let tag = reader.u8()?;
            let (entry, wide) = match tag {
                1 => {
                    let length = reader.u16()? as usize;
                    let bytes = reader.take(length)?;
                    let text = decode_modified_utf8(bytes).ok_or(ClassFileError::InvalidUtf8(index))?;
                    (Constant::Utf8(SmolStr::new(text)), false)
                }
                7 => (
                    Constant::Class {
                        name_index: reader.u16()?,
                    },
                    false,
                ),
                3 | 4 => {
                    reader.take(4)?;
                    (Constant::Other, false)
                }
                5 | 6 => {
                    reader.take(8)?;
                    (Constant::Other, true)
                }
                8 | 16 | 19 | 20 => {
                    reader.take(2)?;
                    (Constant::Other, false)
                }
                9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.take(4)?;
                    (Constant::Other, false)
                }
                15 => {
                    reader.take(3)?;
                    (Constant::Other, false)
                }
                tag => return Err(ClassFileError::UnknownConstantTag { tag, index }),
            };

            entries.push(entry);
            index += 1;
            if wide {
                entries.push(Constant::Unusable);
                index += 1;
            }
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassFileError> {
        match self.entries.get(index as usize) {
            Some(Constant::Unusable) | None => Err(ClassFileError::BadConstantIndex(index)),
            Some(entry) => Ok(entry),
        }
    }

    fn utf8(&self, index: u16) -> Result<SmolStr, ClassFileError> {
        match self.get(index)? {
            Constant::Utf8(text) => Ok(text.clone()),
            _ => Err(ClassFileError::unexpected_constant(index, "CONSTANT_Utf8")),
        }
    }

    fn class_name(&self, index: u16) -> Result<SmolStr, ClassFileError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassFileError::unexpected_constant(index, "CONSTANT_Class")),
        }
    }
}

/// Decode JVM modified UTF-8 (JVMS §4.4.7).
pub(crate) fn decode_modified_utf8(bytes: &[u8]) -> Option<String> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            if b == 0 {
                return None;
            }
            units.push(b as u16);
            i += 1;
        } else if b & 0xE0 == 0xC0 {
            let b2 = *bytes.get(i + 1)?;
            if b2 & 0xC0 != 0x80 {
                return None;
            }
            units.push((((b & 0x1F) as u16) << 6) | (b2 & 0x3F) as u16);
            i += 2;
        } else if b & 0xF0 == 0xE0 {
            let b2 = *bytes.get(i + 1)?;
            let b3 = *bytes.get(i + 2)?;
            if b2 & 0xC0 != 0x80 || b3 & 0xC0 != 0x80 {
                return None;
            }
            units.push((((b & 0x0F) as u16) << 12) | (((b2 & 0x3F) as u16) << 6) | (b3 & 0x3F) as u16);
            i += 3;
        } else {
            return None;
        }
    }
    String::from_utf16(&units).ok()
}

// ============================================================================
// Byte reader
// ============================================================================

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ClassFileError> {
        if self.remaining() < n {
            return Err(ClassFileError::Truncated {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFileError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFileError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

//! Minimal class file writer.
//!
//! Produces structurally valid class files with headers, fields, methods and
//! the attributes [`ClassFile`](super::ClassFile) reads. Methods carry no
//! `Code` attribute; the output is meant for declaration-level consumers.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::AccessFlags;

const MAJOR_VERSION: u16 = 52;

/// Builder for class file bytes.
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    this_class: SmolStr,
    access: AccessFlags,
    super_class: Option<SmolStr>,
    interfaces: Vec<SmolStr>,
    fields: Vec<MemberEntry>,
    methods: Vec<MemberEntry>,
    source_file: Option<SmolStr>,
}

#[derive(Debug, Clone)]
struct MemberEntry {
    access: AccessFlags,
    name: SmolStr,
    descriptor: SmolStr,
    parameter_names: Option<Vec<SmolStr>>,
}

impl ClassFileBuilder {
    /// Start a public class extending `java/lang/Object`.
    pub fn new(binary_name: &str) -> Self {
        Self {
            this_class: SmolStr::new(binary_name),
            access: AccessFlags::PUBLIC | AccessFlags::SUPER,
            super_class: Some(SmolStr::new_static("java/lang/Object")),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            source_file: None,
        }
    }

    pub fn access(mut self, access: AccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Set the superclass; `None` only makes sense for `java/lang/Object`.
    pub fn super_class(mut self, name: Option<&str>) -> Self {
        self.super_class = name.map(SmolStr::new);
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        self.interfaces.push(SmolStr::new(name));
        self
    }

    pub fn field(mut self, access: AccessFlags, name: &str, descriptor: &str) -> Self {
        self.fields.push(MemberEntry {
            access,
            name: SmolStr::new(name),
            descriptor: SmolStr::new(descriptor),
            parameter_names: None,
        });
        self
    }

    pub fn method(mut self, access: AccessFlags, name: &str, descriptor: &str) -> Self {
        self.methods.push(MemberEntry {
            access,
            name: SmolStr::new(name),
            descriptor: SmolStr::new(descriptor),
            parameter_names: None,
        });
        self
    }

    /// Add a method with a `MethodParameters` attribute.
    pub fn method_with_params(
        mut self,
        access: AccessFlags,
        name: &str,
        descriptor: &str,
        parameter_names: &[&str],
    ) -> Self {
        self.methods.push(MemberEntry {
            access,
            name: SmolStr::new(name),
            descriptor: SmolStr::new(descriptor),
            parameter_names: Some(parameter_names.iter().map(|n| SmolStr::new(n)).collect()),
        });
        self
    }

    pub fn source_file(mut self, name: &str) -> Self {
        self.source_file = Some(SmolStr::new(name));
        self
    }

    /// Serialize to class file bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();
        let mut body = Vec::new();

        put_u16(&mut body, self.access.bits());
        put_u16(&mut body, pool.class(&self.this_class));
        let super_index = self.super_class.as_deref().map_or(0, |name| pool.class(name));
        put_u16(&mut body, super_index);

        put_u16(&mut body, self.interfaces.len() as u16);
        for interface in &self.interfaces {
            put_u16(&mut body, pool.class(interface));
        }

        for members in [&self.fields, &self.methods] {
            put_u16(&mut body, members.len() as u16);
            for member in members {
                write_member(&mut body, &mut pool, member);
            }
        }

        match &self.source_file {
            Some(source_file) => {
                put_u16(&mut body, 1);
                put_u16(&mut body, pool.utf8("SourceFile"));
                put_u32(&mut body, 2);
                put_u16(&mut body, pool.utf8(source_file));
            }
            None => put_u16(&mut body, 0),
        }

        let mut out = Vec::with_capacity(body.len() + pool.bytes.len() + 10);
        put_u32(&mut out, 0xCAFE_BABE);
        put_u16(&mut out, 0);
        put_u16(&mut out, MAJOR_VERSION);
        put_u16(&mut out, pool.next_index);
        out.extend_from_slice(&pool.bytes);
        out.extend_from_slice(&body);
        out
    }
}

fn write_member(out: &mut Vec<u8>, pool: &mut PoolWriter, member: &MemberEntry) {
    put_u16(out, member.access.bits());
    put_u16(out, pool.utf8(&member.name));
    put_u16(out, pool.utf8(&member.descriptor));
    match &member.parameter_names {
        Some(names) => {
            put_u16(out, 1);
            put_u16(out, pool.utf8("MethodParameters"));
            put_u32(out, 1 + 4 * names.len() as u32);
            out.push(names.len() as u8);
            for name in names {
                put_u16(out, pool.utf8(name));
                put_u16(out, 0);
            }
        }
        None => put_u16(out, 0),
    }
}

struct PoolWriter {
    bytes: Vec<u8>,
    next_index: u16,
    utf8: FxHashMap<SmolStr, u16>,
    classes: FxHashMap<SmolStr, u16>,
}

impl Default for PoolWriter {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            next_index: 1,
            utf8: FxHashMap::default(),
            classes: FxHashMap::default(),
        }
    }
}

impl PoolWriter {
    fn utf8(&mut self, text: &str) -> u16 {
        if let Some(&index) = self.utf8.get(text) {
            return index;
        }
        let encoded = encode_modified_utf8(text);
        self.bytes.push(1);
        put_u16(&mut self.bytes, encoded.len() as u16);
        self.bytes.extend_from_slice(&encoded);
        let index = self.allocate();
        self.utf8.insert(SmolStr::new(text), index);
        index
    }

    fn class(&mut self, binary_name: &str) -> u16 {
        if let Some(&index) = self.classes.get(binary_name) {
            return index;
        }
        let name_index = self.utf8(binary_name);
        self.bytes.push(7);
        put_u16(&mut self.bytes, name_index);
        let index = self.allocate();
        self.classes.insert(SmolStr::new(binary_name), index);
        index
    }

    fn allocate(&mut self) -> u16 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }
}

/// Encode JVM modified UTF-8: NUL as two bytes, supplementary characters as
/// surrogate pairs.
pub(crate) fn encode_modified_utf8(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
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

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

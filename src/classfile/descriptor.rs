//! Field and method descriptors (JVMS §4.3).

use smol_str::SmolStr;
use std::fmt;

use super::ClassFileError;

/// Nesting limit for array dimensions.
const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Primitive descriptor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn from_char(c: u8) -> Option<Self> {
        let ty = match c {
            b'B' => Self::Byte,
            b'C' => Self::Char,
            b'D' => Self::Double,
            b'F' => Self::Float,
            b'I' => Self::Int,
            b'J' => Self::Long,
            b'S' => Self::Short,
            b'Z' => Self::Boolean,
            _ => return None,
        };
        Some(ty)
    }

    pub fn descriptor_char(self) -> char {
        match self {
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Double => 'D',
            Self::Float => 'F',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Short => 'S',
            Self::Boolean => 'Z',
        }
    }

    pub const ALL: [BaseType; 8] = [
        Self::Byte,
        Self::Char,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Long,
        Self::Short,
        Self::Boolean,
    ];
}

/// A field type: primitive, class (by binary name, `java/lang/String`) or array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    Object(SmolStr),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Parse a complete field descriptor such as `[Ljava/lang/String;`.
    pub fn parse(descriptor: &str) -> Result<Self, ClassFileError> {
        let mut cursor = DescriptorCursor::new(descriptor);
        let ty = cursor.field_type()?;
        cursor.finish()?;
        Ok(ty)
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            Self::Base(base) => out.push(base.descriptor_char()),
            Self::Object(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
            Self::Array(element) => {
                out.push('[');
                element.write_descriptor(out);
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

/// A method descriptor; `return_type` is `None` for `void`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: Option<FieldType>,
}

impl MethodDescriptor {
    /// Parse a complete method descriptor such as `(I[J)Ljava/lang/Object;`.
    pub fn parse(descriptor: &str) -> Result<Self, ClassFileError> {
        let mut cursor = DescriptorCursor::new(descriptor);
        cursor.expect(b'(')?;
        let mut params = Vec::new();
        while cursor.peek() != Some(b')') {
            params.push(cursor.field_type()?);
        }
        cursor.expect(b')')?;
        let return_type = if cursor.peek() == Some(b'V') {
            cursor.pos += 1;
            None
        } else {
            Some(cursor.field_type()?)
        };
        cursor.finish()?;
        Ok(Self {
            params,
            return_type,
        })
    }

    /// The parameter part only, e.g. `(I[J)`; the return type is not part of
    /// the erased signature.
    pub fn erased_params(&self) -> String {
        let mut out = String::from("(");
        for param in &self.params {
            param.write_descriptor(&mut out);
        }
        out.push(')');
        out
    }

    pub fn descriptor(&self) -> String {
        let mut out = self.erased_params();
        match &self.return_type {
            Some(ty) => ty.write_descriptor(&mut out),
            None => out.push('V'),
        }
        out
    }
}

struct DescriptorCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> DescriptorCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> ClassFileError {
        ClassFileError::invalid_descriptor(self.text, message)
    }

    fn expect(&mut self, byte: u8) -> Result<(), ClassFileError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}' at {}", byte as char, self.pos)))
        }
    }

    fn finish(&self) -> Result<(), ClassFileError> {
        if self.pos == self.text.len() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing input at {}", self.pos)))
        }
    }

    fn field_type(&mut self) -> Result<FieldType, ClassFileError> {
        let mut dimensions = 0;
        while self.peek() == Some(b'[') {
            dimensions += 1;
            self.pos += 1;
        }
        if dimensions > MAX_ARRAY_DIMENSIONS {
            return Err(self.error("too many array dimensions"));
        }

        let mut ty = match self.peek() {
            Some(b'L') => {
                let start = self.pos + 1;
                let end = self.text[start..]
                    .find(';')
                    .map(|i| start + i)
                    .ok_or_else(|| self.error("unterminated class type"))?;
                if end == start {
                    return Err(self.error("empty class name"));
                }
                self.pos = end + 1;
                FieldType::Object(SmolStr::new(&self.text[start..end]))
            }
            Some(c) => match BaseType::from_char(c) {
                Some(base) => {
                    self.pos += 1;
                    FieldType::Base(base)
                }
                None => return Err(self.error(format!("unexpected '{}' at {}", c as char, self.pos))),
            },
            None => return Err(self.error("unexpected end")),
        };

        for _ in 0..dimensions {
            ty = FieldType::Array(Box::new(ty));
        }
        Ok(ty)
    }
}

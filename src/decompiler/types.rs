//! Mapping between JVM descriptor types and the type references of
//! synthesized text.
//!
//! Rendering and erasure are inverses for every type the synthesizer emits:
//! `erase(parse(render(t))) == descriptor(t)`. Class names that would read
//! as a builtin (`kotlin/Unit`, `kotlin/IntArray`, ...) keep their last
//! segment in backticks, and erasure treats a quoted last segment as a class.

use crate::classfile::{BaseType, FieldType};
use crate::parser::TypeRef;

const UNIT: &str = "kotlin.Unit";
const ARRAY: &str = "kotlin.Array";

fn base_type_name(base: BaseType) -> &'static str {
    match base {
        BaseType::Byte => "kotlin.Byte",
        BaseType::Char => "kotlin.Char",
        BaseType::Double => "kotlin.Double",
        BaseType::Float => "kotlin.Float",
        BaseType::Int => "kotlin.Int",
        BaseType::Long => "kotlin.Long",
        BaseType::Short => "kotlin.Short",
        BaseType::Boolean => "kotlin.Boolean",
    }
}

fn primitive_array_name(base: BaseType) -> &'static str {
    match base {
        BaseType::Byte => "kotlin.ByteArray",
        BaseType::Char => "kotlin.CharArray",
        BaseType::Double => "kotlin.DoubleArray",
        BaseType::Float => "kotlin.FloatArray",
        BaseType::Int => "kotlin.IntArray",
        BaseType::Long => "kotlin.LongArray",
        BaseType::Short => "kotlin.ShortArray",
        BaseType::Boolean => "kotlin.BooleanArray",
    }
}

/// Source form of a field type, or `None` if a class name in it cannot be
/// written as a name.
pub(crate) fn render_type(ty: &FieldType) -> Option<String> {
    match ty {
        FieldType::Base(base) => Some(base_type_name(*base).to_string()),
        FieldType::Array(element) => match element.as_ref() {
            FieldType::Base(base) => Some(primitive_array_name(*base).to_string()),
            other => Some(format!("{}<{}>", ARRAY, render_type(other)?)),
        },
        FieldType::Object(binary_name) => render_class_name(binary_name),
    }
}

/// Source form of a return type; `None` in the descriptor is `void`.
pub(crate) fn render_return_type(ty: Option<&FieldType>) -> Option<String> {
    match ty {
        Some(ty) => render_type(ty),
        None => Some(UNIT.to_string()),
    }
}

/// `a/b/Foo$Bar` → ``a.b.`Foo$Bar` ``, `kotlin/Unit` → ``kotlin.`Unit` ``.
pub(crate) fn render_class_name(binary_name: &str) -> Option<String> {
    let segments: Vec<&str> = binary_name.split('/').collect();
    let (last, init) = segments.split_last()?;
    let mut rendered = init
        .iter()
        .map(|segment| super::quote_name(segment))
        .collect::<Option<Vec<_>>>()?;

    if is_builtin_name(&binary_name.replace('/', ".")) {
        if !super::is_renderable_name(last) {
            return None;
        }
        rendered.push(format!("`{}`", last));
    } else {
        rendered.push(super::quote_name(last)?);
    }
    Some(rendered.join("."))
}

fn is_builtin_name(path: &str) -> bool {
    path == UNIT
        || path == ARRAY
        || BaseType::ALL
            .into_iter()
            .any(|base| path == base_type_name(base) || path == primitive_array_name(base))
}

/// Descriptor of a type reference in synthesized text, or `None` if the
/// reference is not one the synthesizer emits.
pub(crate) fn erase_type_ref(type_ref: &TypeRef) -> Option<String> {
    let path = type_ref.path();
    if path.is_empty() {
        return None;
    }

    let quoted_tail = type_ref.segments().last().is_some_and(|segment| segment.is_quoted());
    if path == ARRAY && !quoted_tail {
        let args = type_ref.type_args();
        let [element] = args.as_slice() else {
            return None;
        };
        return Some(format!("[{}", erase_type_ref(element)?));
    }
    if type_ref.type_arg_list().is_some() {
        return None;
    }
    if quoted_tail {
        return Some(class_ref(&path));
    }

    for base in BaseType::ALL {
        if path == base_type_name(base) {
            return Some(base.descriptor_char().to_string());
        }
        if path == primitive_array_name(base) {
            return Some(format!("[{}", base.descriptor_char()));
        }
    }
    if path == UNIT {
        return Some("V".to_string());
    }

    Some(class_ref(&path))
}

fn class_ref(path: &str) -> String {
    format!("L{};", path.replace('.', "/"))
}

//! Render a compiled class as declaration-only source text.
//!
//! The output lists the class and its members with signatures and types;
//! every body is replaced by [`DecompilerOptions::body_marker`]. Rendering
//! is a pure function of the class bytes and the options.

use std::fmt::Write;

use super::types::{render_class_name, render_return_type, render_type};
use super::{DecompilationError, DecompiledUnit, DecompilerOptions};
use crate::classfile::{AccessFlags, ClassFile, ClassFileError, FieldType, MemberInfo, MethodDescriptor};
use crate::compiled::{CompiledUnit, MemberKind};
use crate::parser::SyntaxKind;

const OBJECT: &str = "java/lang/Object";

/// Synthesize with default options.
pub fn synthesize(unit: &CompiledUnit) -> Result<DecompiledUnit, DecompilationError> {
    synthesize_with(unit, &DecompilerOptions::default())
}

/// Synthesize the pseudo-source of `unit` and parse it.
pub fn synthesize_with(
    unit: &CompiledUnit,
    options: &DecompilerOptions,
) -> Result<DecompiledUnit, DecompilationError> {
    let class = ClassFile::parse(unit.bytes())?;
    let mut ctx = SynthesisContext::new(&class, options);
    ctx.render_file()?;

    let file_name = format!("{}.kt", class.simple_name());
    tracing::trace!(
        class = %class.this_class,
        bytes = ctx.output.len(),
        "synthesized decompiled text"
    );
    DecompiledUnit::from_text(class.this_class.as_str(), file_name, ctx.output)
}

/// Quote `name` in backticks unless it is a plain, non-keyword identifier.
///
/// Returns `None` for names that cannot be written even in backticks.
pub fn quote_name(name: &str) -> Option<String> {
    if is_plain_identifier(name) {
        Some(name.to_string())
    } else if is_renderable_name(name) {
        Some(format!("`{}`", name))
    } else {
        None
    }
}

/// Whether `name` can appear in synthesized text, quoted or not.
pub fn is_renderable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['`', '\r', '\n'])
}

/// Whether a member gets a declaration of its own in synthesized text.
///
/// Members whose name or types cannot be written are left out, and so never
/// compete for another member's declaration.
pub(crate) fn renders_member(kind: MemberKind, name: &str, descriptor: &str) -> Result<bool, ClassFileError> {
    Ok(match kind {
        MemberKind::Type => true,
        MemberKind::Field => is_renderable_name(name) && render_type(&FieldType::parse(descriptor)?).is_some(),
        MemberKind::Method => {
            let descriptor = MethodDescriptor::parse(descriptor)?;
            (name == "<init>" || is_renderable_name(name))
                && descriptor.params.iter().all(|ty| render_type(ty).is_some())
                && render_return_type(descriptor.return_type.as_ref()).is_some()
        }
    })
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(unicode_ident::is_xid_continue)
        && SyntaxKind::from_keyword(name).is_none()
}

/// Internal context for synthesis.
struct SynthesisContext<'a> {
    class: &'a ClassFile,
    options: &'a DecompilerOptions,
    output: String,
    indent_level: usize,
}

impl<'a> SynthesisContext<'a> {
    fn new(class: &'a ClassFile, options: &'a DecompilerOptions) -> Self {
        Self {
            class,
            options,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn write_line(&mut self, text: &str) {
        let indent = self.options.indent(self.indent_level);
        let _ = writeln!(self.output, "{}{}", indent, text);
    }

    fn write_blank_line(&mut self) {
        let _ = writeln!(self.output);
    }

    fn render_file(&mut self) -> Result<(), DecompilationError> {
        if self.options.header_comment {
            let simple_name = self.class.simple_name().to_string();
            self.write_line(&format!("// Decompiled from {}.class", simple_name));
            if let Some(source) = &self.class.source_file {
                let source = source.replace(['\r', '\n'], " ");
                self.write_line(&format!("// Source file: {}", source));
            }
            self.write_blank_line();
        }

        let package = self.class.package_name();
        if !package.is_empty() {
            let segments = package
                .split('.')
                .map(quote_name)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| self.unrenderable("package name"))?;
            self.write_line(&format!("package {}", segments.join(".")));
            self.write_blank_line();
        }

        self.render_class()
    }

    fn render_class(&mut self) -> Result<(), DecompilationError> {
        let access = self.class.access;
        let mut line = String::new();
        line.push_str(visibility(access));

        if access.contains(AccessFlags::ANNOTATION) {
            line.push_str(" annotation class ");
        } else if access.contains(AccessFlags::INTERFACE) {
            line.push_str(" interface ");
        } else if access.contains(AccessFlags::ENUM) {
            line.push_str(" enum class ");
        } else if access.is_abstract() {
            line.push_str(" abstract class ");
        } else if access.is_final() {
            line.push_str(" final class ");
        } else {
            line.push_str(" open class ");
        }
        let name = quote_name(self.class.simple_name()).ok_or_else(|| self.unrenderable("class name"))?;
        line.push_str(&name);

        let supertypes: Vec<String> = self
            .class
            .super_class
            .iter()
            .filter(|name| name.as_str() != OBJECT)
            .chain(self.class.interfaces.iter())
            .filter_map(|name| render_class_name(name))
            .collect();
        if !supertypes.is_empty() {
            line.push_str(" : ");
            line.push_str(&supertypes.join(", "));
        }
        line.push_str(" {");
        self.write_line(&line);

        self.indent_level += 1;
        let class = self.class;
        let mut fields = Vec::new();
        for field in &class.fields {
            if !is_hidden_field(field) && self.renders(MemberKind::Field, field)? {
                fields.push(field);
            }
        }
        let mut methods = Vec::new();
        for method in &class.methods {
            if !is_hidden_method(method) && self.renders(MemberKind::Method, method)? {
                methods.push(method);
            }
        }

        for field in &fields {
            self.render_field(field)?;
        }
        for (i, method) in methods.iter().enumerate() {
            if i > 0 || !fields.is_empty() {
                self.write_blank_line();
            }
            self.render_method(method)?;
        }
        self.indent_level -= 1;

        self.write_line("}");
        Ok(())
    }

    fn renders(&self, kind: MemberKind, member: &MemberInfo) -> Result<bool, DecompilationError> {
        let renders = renders_member(kind, &member.name, &member.descriptor)?;
        if !renders {
            tracing::debug!(
                class = %self.class.this_class,
                member = %member.name.escape_debug(),
                descriptor = %member.descriptor.escape_debug(),
                "member cannot be written as source, left out"
            );
        }
        Ok(renders)
    }

    fn unrenderable(&self, what: &str) -> DecompilationError {
        DecompilationError::structural_mismatch(
            self.class.this_class.as_str(),
            format!("{} cannot be written as source", what),
        )
    }

    fn render_field(&mut self, field: &MemberInfo) -> Result<(), DecompilationError> {
        let ty = FieldType::parse(&field.descriptor)?;
        let (Some(name), Some(ty)) = (quote_name(&field.name), render_type(&ty)) else {
            return Err(self.unrenderable("field"));
        };
        let mut line = String::from(visibility(field.access));
        if field.access.is_static() {
            line.push_str(" static");
        }
        line.push_str(if field.access.is_final() { " val " } else { " var " });
        line.push_str(&name);
        line.push_str(": ");
        line.push_str(&ty);
        self.write_line(&line);
        Ok(())
    }

    fn render_method(&mut self, method: &MemberInfo) -> Result<(), DecompilationError> {
        let descriptor = MethodDescriptor::parse(&method.descriptor)?;
        let params = render_params(method, &descriptor).ok_or_else(|| self.unrenderable("method parameters"))?;

        let mut line = String::from(visibility(method.access));
        let has_body = !method.access.is_abstract() && !method.access.contains(AccessFlags::NATIVE);

        if method.name == "<init>" {
            line.push_str(" constructor(");
            line.push_str(&params);
            line.push(')');
        } else {
            if method.access.is_static() {
                line.push_str(" static");
            }
            if method.access.is_abstract() {
                line.push_str(" abstract");
            } else if method.access.contains(AccessFlags::NATIVE) {
                line.push_str(" external");
            }
            let (Some(name), Some(return_type)) = (
                quote_name(&method.name),
                render_return_type(descriptor.return_type.as_ref()),
            ) else {
                return Err(self.unrenderable("method"));
            };
            line.push_str(" fun ");
            line.push_str(&name);
            line.push('(');
            line.push_str(&params);
            line.push_str("): ");
            line.push_str(&return_type);
        }

        if has_body {
            line.push_str(" { ");
            line.push_str(&self.options.body_marker);
            line.push_str(" }");
        }
        self.write_line(&line);
        Ok(())
    }
}

fn render_params(method: &MemberInfo, descriptor: &MethodDescriptor) -> Option<String> {
    let params = descriptor
        .params
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let name = method
                .parameter_names
                .get(i)
                .and_then(|name| name.as_deref())
                .and_then(quote_name)
                .unwrap_or_else(|| format!("p{}", i));
            Some(format!("{}: {}", name, render_type(ty)?))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(params.join(", "))
}

fn visibility(access: AccessFlags) -> &'static str {
    if access.is_public() {
        "public"
    } else if access.is_protected() {
        "protected"
    } else if access.is_private() {
        "private"
    } else {
        "internal"
    }
}

fn is_hidden_field(field: &MemberInfo) -> bool {
    field.access.is_synthetic()
}

fn is_hidden_method(method: &MemberInfo) -> bool {
    method.access.is_synthetic()
        || method.access.contains(AccessFlags::BRIDGE)
        || method.name == "<clinit>"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::ClassFileBuilder;
    use rstest::rstest;

    fn unit_of(builder: ClassFileBuilder) -> CompiledUnit {
        CompiledUnit::from_class_bytes(builder.build()).unwrap()
    }

    #[rstest]
    #[case("foo", "foo")]
    #[case("_x1", "_x1")]
    #[case("caf\u{e9}", "caf\u{e9}")]
    #[case("access$bar$", "`access$bar$`")]
    #[case("fun", "`fun`")]
    #[case("1st", "`1st`")]
    fn test_quote_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(quote_name(name).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("we`ird")]
    #[case("line\nbreak")]
    #[case("carriage\rreturn")]
    fn test_unwritable_names(#[case] name: &str) {
        assert_eq!(quote_name(name), None);
    }

    #[test]
    fn test_unwritable_members_are_left_out() {
        let unit = unit_of(
            ClassFileBuilder::new("a/Foo")
                .field(AccessFlags::PUBLIC, "we`ird", "I")
                .field(AccessFlags::PUBLIC, "count", "La/Line\nBreak;")
                .method(AccessFlags::PUBLIC, "bar", "()I")
                .method(AccessFlags::PUBLIC, "we`ird", "()V")
                .method(AccessFlags::PUBLIC, "take", "(La/We`ird;)V"),
        );
        let text = synthesize(&unit).unwrap().contents().to_string();
        assert!(text.contains("public fun bar(): kotlin.Int"));
        assert!(!text.contains("ird"));
        assert!(!text.contains("count"));
        assert!(!text.contains("take"));
    }

    #[test]
    fn test_unwritable_class_name_is_an_error() {
        let unit = unit_of(ClassFileBuilder::new("a/We`ird"));
        let err = synthesize(&unit).unwrap_err();
        assert!(matches!(err, DecompilationError::StructuralMismatch { .. }));
    }

    #[test]
    fn test_builtin_lookalike_types_are_quoted() {
        let unit = unit_of(
            ClassFileBuilder::new("kotlin/Unit")
                .field(AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL, "INSTANCE", "Lkotlin/Unit;")
                .method(AccessFlags::PUBLIC, "take", "(Lkotlin/Unit;)V"),
        );
        let text = synthesize(&unit).unwrap().contents().to_string();
        assert!(text.contains("public static val INSTANCE: kotlin.`Unit`\n"));
        assert!(text.contains("public fun take(p0: kotlin.`Unit`): kotlin.Unit {"));
    }

    #[test]
    fn test_renders_members() {
        let unit = unit_of(
            ClassFileBuilder::new("a/b/Foo")
                .access(AccessFlags::PUBLIC | AccessFlags::FINAL | AccessFlags::SUPER)
                .field(AccessFlags::PRIVATE | AccessFlags::FINAL, "count", "I")
                .method(AccessFlags::PUBLIC, "<init>", "()V")
                .method(AccessFlags::PUBLIC, "bar", "()I")
                .method_with_params(AccessFlags::PUBLIC, "baz", "(I)I", &["x"])
                .source_file("Foo.kt"),
        );
        let decompiled = synthesize(&unit).unwrap();
        let expected = "\
// Decompiled from Foo.class
// Source file: Foo.kt

package a.b

public final class Foo {
    private val count: kotlin.Int

    public constructor() { /* compiled code */ }

    public fun bar(): kotlin.Int { /* compiled code */ }

    public fun baz(x: kotlin.Int): kotlin.Int { /* compiled code */ }
}
";
        assert_eq!(decompiled.contents(), expected);
        assert_eq!(decompiled.file_name(), "Foo.kt");
        assert!(!decompiled.is_physical());
    }

    #[test]
    fn test_skips_compiler_generated_members() {
        let unit = unit_of(
            ClassFileBuilder::new("Foo")
                .method(AccessFlags::STATIC, "<clinit>", "()V")
                .method(AccessFlags::PUBLIC, "foo", "()Ljava/lang/String;")
                .method(AccessFlags::PUBLIC | AccessFlags::BRIDGE | AccessFlags::SYNTHETIC, "foo", "()Ljava/lang/Object;")
                .method(AccessFlags::STATIC | AccessFlags::SYNTHETIC, "access$bar$", "(LFoo;)I"),
        );
        let text = synthesize(&unit).unwrap().contents().to_string();
        assert!(!text.contains("clinit"));
        assert!(!text.contains("access$bar$"));
        assert_eq!(text.matches("fun foo").count(), 1);
        assert!(!text.contains("package"));
    }

    #[test]
    fn test_class_kinds_and_supertypes() {
        let interface = unit_of(
            ClassFileBuilder::new("a/Api")
                .access(AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT)
                .interface("java/io/Closeable")
                .method(AccessFlags::PUBLIC | AccessFlags::ABSTRACT, "close", "()V"),
        );
        let text = synthesize(&interface).unwrap().contents().to_string();
        assert!(text.contains("public interface Api : java.io.Closeable {"));
        assert!(text.contains("public abstract fun close(): kotlin.Unit\n"));

        let open = unit_of(ClassFileBuilder::new("a/Base").super_class(Some("a/Root")));
        let text = synthesize(&open).unwrap().contents().to_string();
        assert!(text.contains("public open class Base : a.Root {"));
    }

    #[test]
    fn test_options_control_layout() {
        let unit = unit_of(ClassFileBuilder::new("Foo").method(AccessFlags::PUBLIC, "run", "()V"));
        let options = DecompilerOptions {
            indent_width: 2,
            header_comment: false,
            body_marker: "/* stub */".to_string(),
        };
        let text = synthesize_with(&unit, &options).unwrap().contents().to_string();
        assert_eq!(
            text,
            "public open class Foo {\n  public fun run(): kotlin.Unit { /* stub */ }\n}\n"
        );
    }

    #[test]
    fn test_parameter_names_fall_back_to_positions() {
        let unit = unit_of(
            ClassFileBuilder::new("Foo")
                .method(AccessFlags::PUBLIC, "put", "(Ljava/lang/String;[I)V"),
        );
        let text = synthesize(&unit).unwrap().contents().to_string();
        assert!(text.contains("fun put(p0: java.lang.String, p1: kotlin.IntArray): kotlin.Unit"));
    }

    #[test]
    fn test_deterministic() {
        let bytes = ClassFileBuilder::new("a/Foo")
            .field(AccessFlags::PUBLIC, "x", "J")
            .method(AccessFlags::PUBLIC, "bar", "()I")
            .build();
        let first = synthesize(&CompiledUnit::from_class_bytes(bytes.clone()).unwrap()).unwrap();
        let second = synthesize(&CompiledUnit::from_class_bytes(bytes).unwrap()).unwrap();
        assert_eq!(first.contents(), second.contents());
    }
}

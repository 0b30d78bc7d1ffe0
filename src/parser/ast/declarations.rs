use super::*;

// ============================================================================
// Declarations
// ============================================================================

/// Any declaration: class-like, function, constructor or property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Class(ClassDecl),
    Fun(FunDecl),
    Constructor(ConstructorDecl),
    Property(PropertyDecl),
}

impl AstNode for Declaration {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS | SyntaxKind::FUN | SyntaxKind::CONSTRUCTOR | SyntaxKind::PROPERTY
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::FUN => Some(Self::Fun(FunDecl(node))),
            SyntaxKind::CONSTRUCTOR => Some(Self::Constructor(ConstructorDecl(node))),
            SyntaxKind::PROPERTY => Some(Self::Property(PropertyDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(n) => n.syntax(),
            Self::Fun(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
        }
    }
}

impl Declaration {
    /// Declared name; constructors are named `<init>` like their compiled form.
    pub fn name_text(&self) -> Option<SmolStr> {
        match self {
            Self::Class(n) => n.name_text(),
            Self::Fun(n) => n.name_text(),
            Self::Constructor(_) => Some(SmolStr::new_static("<init>")),
            Self::Property(n) => n.name_text(),
        }
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        self.syntax().children().find_map(ModifierList::cast)
    }
}

ast_node!(ModifierList, MODIFIER_LIST);

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .filter(|k| k.is_modifier())
    }

    pub fn has(&self, kind: SyntaxKind) -> bool {
        self.modifiers().any(|k| k == kind)
    }
}

// ============================================================================
// Classes
// ============================================================================

/// The flavor of a class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    Enum,
    Annotation,
}

ast_node!(ClassDecl, CLASS);

impl ClassDecl {
    first_child_method!(modifiers, ModifierList);
    first_child_method!(name, Name);
    first_child_method!(supertype_list, SupertypeList);
    first_child_method!(body, ClassBody);
    name_text_method!();

    pub fn class_kind(&self) -> ClassKind {
        let keywords: Vec<_> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .collect();
        if keywords.contains(&SyntaxKind::ENUM_KW) {
            ClassKind::Enum
        } else if keywords.contains(&SyntaxKind::ANNOTATION_KW) {
            ClassKind::Annotation
        } else if keywords.contains(&SyntaxKind::INTERFACE_KW) {
            ClassKind::Interface
        } else if keywords.contains(&SyntaxKind::OBJECT_KW) {
            ClassKind::Object
        } else {
            ClassKind::Class
        }
    }

    pub fn supertypes(&self) -> Vec<TypeRef> {
        self.supertype_list()
            .map(|l| l.types().collect())
            .unwrap_or_default()
    }

    pub fn members(&self) -> Vec<Declaration> {
        self.body()
            .map(|b| b.members().collect())
            .unwrap_or_default()
    }
}

ast_node!(SupertypeList, SUPERTYPE_LIST);

impl SupertypeList {
    children_method!(types, TypeRef);
}

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    children_method!(members, Declaration);
}

// ============================================================================
// Callables and properties
// ============================================================================

ast_node!(FunDecl, FUN);

impl FunDecl {
    first_child_method!(modifiers, ModifierList);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
    first_child_method!(return_type, TypeRef);
    first_child_method!(body, Block);
    name_text_method!();
}

ast_node!(ConstructorDecl, CONSTRUCTOR);

impl ConstructorDecl {
    first_child_method!(modifiers, ModifierList);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, Block);
}

ast_node!(PropertyDecl, PROPERTY);

impl PropertyDecl {
    first_child_method!(modifiers, ModifierList);
    first_child_method!(name, Name);
    first_child_method!(type_ref, TypeRef);
    has_token_method!(is_var, VAR_KW);
    name_text_method!();
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    children_method!(params, Param);
}

ast_node!(Param, PARAM);

impl Param {
    first_child_method!(name, Name);
    first_child_method!(type_ref, TypeRef);
    name_text_method!();
}

ast_node!(Block, BLOCK);

// ============================================================================
// Types
// ============================================================================

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    children_method!(segments, NameRef);
    first_child_method!(type_arg_list, TypeArgList);
    has_token_method!(is_nullable, QUESTION);

    /// Dotted path without type arguments, e.g. `kotlin.Array`.
    pub fn path(&self) -> String {
        self.segments()
            .map(|s| s.referenced_name())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn type_args(&self) -> Vec<TypeRef> {
        self.type_arg_list()
            .map(|l| l.types().collect())
            .unwrap_or_default()
    }
}

ast_node!(TypeArgList, TYPE_ARG_LIST);

impl TypeArgList {
    children_method!(types, TypeRef);
}

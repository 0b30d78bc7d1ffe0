use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    first_child_method!(namespace_header, NamespaceHeader);
    children_method!(imports, ImportDirective);
    children_method!(declarations, Declaration);

    /// All declarations in the file, nested members included, in source order.
    pub fn all_declarations(&self) -> impl Iterator<Item = Declaration> + '_ {
        self.0.descendants().filter_map(Declaration::cast)
    }
}

// ============================================================================
// Namespace header
// ============================================================================

ast_node!(NamespaceHeader, NAMESPACE_HEADER);

impl NamespaceHeader {
    children_method!(name_refs, NameRef);

    /// The segment naming this namespace, i.e. the last one.
    pub fn last_part(&self) -> Option<NameRef> {
        self.name_refs().last()
    }

    /// Every segment but the last.
    pub fn parent_parts(&self) -> Vec<NameRef> {
        let mut parts: Vec<_> = self.name_refs().collect();
        parts.pop();
        parts
    }

    has_token_method!(has_package_keyword, PACKAGE_KW);
}

ast_node!(ImportDirective, IMPORT_DIRECTIVE);

impl ImportDirective {
    children_method!(name_refs, NameRef);

    pub fn path(&self) -> Vec<SmolStr> {
        self.name_refs().map(|n| n.referenced_name()).collect()
    }
}

// eqv_synth/stack - Recursion guard for synthesis call paths
use eqv_model::TypeTag;

/// Ordered set of the type tags currently being synthesized on one call
/// path.
///
/// The guard is copy-on-extend: [`TypeStack::push`] returns a new stack and
/// never mutates the caller's, so sibling branches of the recursion cannot
/// see each other's entries. Cycle detection is a plain data-structure
/// property, independent of actual call-stack depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeStack {
    entries: Vec<TypeTag>,
}

impl TypeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.entries.contains(tag)
    }

    /// A new stack with `tag` appended. The receiver is left untouched.
    #[must_use]
    pub fn push(&self, tag: TypeTag) -> TypeStack {
        let mut entries = self.entries.clone();
        entries.push(tag);
        TypeStack { entries }
    }

    /// The guard path, oldest entry first.
    pub fn tags(&self) -> &[TypeTag] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

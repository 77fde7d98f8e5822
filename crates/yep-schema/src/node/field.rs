use crate::types::{RelationKind, TypeRef};

///
/// Relation
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: String,

    /// Field on the target pointing back here, required for One2Many.
    pub reverse: Option<String>,
}

///
/// FieldDecl
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub relation: Option<Relation>,
    pub readonly: bool,
    pub doc: Option<String>,
}

impl FieldDecl {
    #[must_use]
    pub fn new(name: &str, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.into(),
            relation: None,
            readonly: false,
            doc: None,
        }
    }

    fn relational(name: &str, kind: RelationKind, target: &str, reverse: Option<&str>) -> Self {
        Self {
            relation: Some(Relation {
                kind,
                target: target.to_string(),
                reverse: reverse.map(ToString::to_string),
            }),
            ..Self::new(name, TypeRef::record_set_of(target))
        }
    }

    #[must_use]
    pub fn many2one(name: &str, target: &str) -> Self {
        Self::relational(name, RelationKind::Many2One, target, None)
    }

    #[must_use]
    pub fn one2one(name: &str, target: &str) -> Self {
        Self::relational(name, RelationKind::One2One, target, None)
    }

    #[must_use]
    pub fn one2many(name: &str, target: &str, reverse: &str) -> Self {
        Self::relational(name, RelationKind::One2Many, target, Some(reverse))
    }

    #[must_use]
    pub fn many2many(name: &str, target: &str) -> Self {
        Self::relational(name, RelationKind::Many2Many, target, None)
    }

    #[must_use]
    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

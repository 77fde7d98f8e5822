use crate::types::TypeRef;

///
/// Signature
/// parameter types exclude the receiver
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Signature {
    pub params: Vec<TypeRef>,
    pub returns: Option<TypeRef>,

    /// The last parameter accepts any number of values.
    pub variadic: bool,
}

///
/// MethodDecl
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub doc: String,
    pub signature: Signature,
}

impl MethodDecl {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            signature: Signature::default(),
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    #[must_use]
    pub fn param(mut self, ty: impl Into<TypeRef>) -> Self {
        self.signature.params.push(ty.into());
        self
    }

    /// Append a trailing variadic parameter.
    #[must_use]
    pub fn variadic(mut self, ty: impl Into<TypeRef>) -> Self {
        self.signature.params.push(ty.into());
        self.signature.variadic = true;
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.signature.returns = Some(ty.into());
        self
    }
}

use crate::{ID_FIELD, MAX_MEMBER_NAME_LEN, MAX_MODEL_NAME_LEN};

// Rust keywords; every model and member name ends up as an identifier in generated code
const RESERVED: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Ensure an identifier is non-empty, ASCII, a valid Rust identifier and not reserved.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err("ident is empty".to_string());
    };

    if !ident.is_ascii() {
        return Err(format!("ident '{ident}' must be ASCII"));
    }
    if !(first.is_ascii_alphabetic() || first == '_') || ident == "_" {
        return Err(format!(
            "ident '{ident}' must start with a letter or an underscore"
        ));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "ident '{ident}' may only contain letters, digits and underscores"
        ));
    }

    is_reserved(ident)
}

pub(crate) fn validate_model_name(name: &str) -> Result<(), String> {
    validate_ident(name)?;

    if name.len() > MAX_MODEL_NAME_LEN {
        return Err(format!(
            "model name '{name}' exceeds max length {MAX_MODEL_NAME_LEN}"
        ));
    }

    Ok(())
}

pub(crate) fn validate_member_name(name: &str) -> Result<(), String> {
    validate_ident(name)?;

    if name.len() > MAX_MEMBER_NAME_LEN {
        return Err(format!(
            "member name '{name}' exceeds max length {MAX_MEMBER_NAME_LEN}"
        ));
    }

    Ok(())
}

/// Fields the framework adds to every model cannot be declared again.
pub(crate) fn validate_field_name(name: &str) -> Result<(), String> {
    validate_member_name(name)?;

    if name == ID_FIELD {
        return Err(format!("field name '{ID_FIELD}' is reserved"));
    }

    Ok(())
}

fn is_reserved(word: &str) -> Result<(), String> {
    if RESERVED.contains(&word) {
        return Err(format!("the word '{word}' is reserved"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_framework_style_names() {
        for name in ["User", "Test__User", "_Private", "Partner2"] {
            assert!(validate_model_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_bad_idents() {
        assert!(validate_ident("").is_err());
        assert!(validate_ident("_").is_err());
        assert!(validate_ident("2Fast").is_err());
        assert!(validate_ident("Has Space").is_err());
        assert!(validate_ident("Café").is_err());
        assert!(validate_ident("Self").is_err());
        assert!(validate_ident("type").is_err());
    }

    #[test]
    fn model_name_length_is_bounded() {
        let long = "M".repeat(MAX_MODEL_NAME_LEN + 1);
        let err = validate_model_name(&long).unwrap_err();

        assert!(err.contains("exceeds max length"));
    }

    #[test]
    fn id_field_is_reserved() {
        assert!(validate_field_name("ID").is_err());
        assert!(validate_field_name("Id").is_ok());
    }
}

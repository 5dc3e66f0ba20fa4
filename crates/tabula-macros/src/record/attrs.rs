//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Borrowed string: `#[record(String)]`
    String,
    /// Numeric primitive: `#[record(Number)]`
    Number,
    /// Boolean: `#[record(Bool)]`
    Bool,
    /// Enum tabulated by label, requires `RecordLabel`: `#[record(Enum)]`
    Enum,
    /// Anything `Display`, rendered on access: `#[record(Text)]`
    Text,
}

impl FieldKind {
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_str(&ident.to_string(), ident.span())
    }

    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "String" | "string" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Bool" | "boolean" | "bool" => Ok(FieldKind::Bool),
            "Enum" | "enumeration" | "enum" => Ok(FieldKind::Enum),
            "Text" | "text" | "Display" => Ok(FieldKind::Text),
            other => Err(Error::new(
                span,
                format!(
                    "unknown record field kind: '{}'. Expected one of: String, Number, Bool, Enum, Text",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    pub kind: Option<FieldKind>,
    pub skip: bool,
    /// This field is the record's identity.
    pub id: bool,
    /// Column key to expose the field under (default: field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: None,
            skip: false,
            id: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("id") {
                        attr.id = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected field kind: String, Number, Bool, Enum, Text, id, or skip",
                        ));
                    }
                }

                // rename = "key" or kind = "enum"
                Meta::NameValue(nv) => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(nv.value.span(), "expected a string literal"));
                    };
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(s.value());
                    } else if nv.path.is_ident("kind") {
                        attr.kind = Some(FieldKind::from_str(&s.value(), s.span())?);
                        attr.span = s.span();
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or kind",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: String, Number, Bool, Enum, Text, id, skip, rename = \"...\", or kind = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[record(...)]` attributes from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn test_kinds() {
        assert_eq!(parse("String").unwrap().kind, Some(FieldKind::String));
        assert_eq!(parse("Number").unwrap().kind, Some(FieldKind::Number));
        assert_eq!(parse("Bool").unwrap().kind, Some(FieldKind::Bool));
        assert_eq!(parse("Enum").unwrap().kind, Some(FieldKind::Enum));
        assert_eq!(parse("Text").unwrap().kind, Some(FieldKind::Text));
    }

    #[test]
    fn test_kind_via_string() {
        // `enum` is a keyword, so the lowercase spelling goes through `kind`
        let attr = parse(r#"kind = "enum""#).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Enum));
    }

    #[test]
    fn test_id_flag() {
        let attr = parse("String, id").unwrap();
        assert_eq!(attr.kind, Some(FieldKind::String));
        assert!(attr.id);
        assert!(!attr.skip);
    }

    #[test]
    fn test_skip() {
        let attr = parse("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn test_rename() {
        let attr = parse(r#"Number, rename = "salaryBand""#).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Number));
        assert_eq!(attr.rename, Some("salaryBand".to_string()));
    }

    #[test]
    fn test_invalid_kind() {
        let err = parse("Timestamp").unwrap_err();
        assert!(err.to_string().contains("unknown record field kind"));
    }

    #[test]
    fn test_unknown_name_value() {
        let err = parse(r#"label = "x""#).unwrap_err();
        assert!(err.to_string().contains("unknown attribute"));
    }
}

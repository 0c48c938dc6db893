use std::collections::HashSet;

use darling::{FromDeriveInput, FromField, FromMeta, ast, util};
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::{Type, ext::IdentExt};

/// Create a `syn::Error` from a spanned token.
macro_rules! span_err {
    ($t:expr, $err:expr) => {
        Err(syn::Error::new_spanned($t, $err))
    };
}

#[allow(unused)]
pub(crate) use span_err;

#[allow(unused)]
/// Assert that a `syn::Result` error contains the expected message.
macro_rules! assert_errors_with {
    ($e:expr, $m:expr) => {
        assert!(&$e.is_err());
        let e = $e.unwrap_err();
        assert!(
            format!("{}", e).contains($m),
            "expected error containing \"{}\" got \"{}\"",
            $m,
            e
        );
    };
}

#[allow(unused)]
pub(crate) use assert_errors_with;

/// Case conversion rules for `rename_all`, spelled the way serde spells them.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, FromMeta)]
pub enum RenameAll {
    /// Keep the field name as written.
    #[default]
    #[darling(rename = "verbatim")]
    Verbatim,
    #[darling(rename = "lowercase")]
    LowerCase,
    #[darling(rename = "UPPERCASE")]
    UpperCase,
    #[darling(rename = "snake_case")]
    SnakeCase,
    #[darling(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    #[darling(rename = "kebab-case")]
    KebabCase,
    #[darling(rename = "camelCase")]
    CamelCase,
    #[darling(rename = "PascalCase")]
    PascalCase,
}

impl RenameAll {
    pub(crate) fn rename(self, s: &str) -> String {
        match self {
            Self::Verbatim => s.to_owned(),
            Self::LowerCase => s.to_lowercase(),
            Self::UpperCase => s.to_uppercase(),
            Self::SnakeCase => s.to_snake_case(),
            Self::ScreamingSnakeCase => s.to_shouty_snake_case(),
            Self::KebabCase => s.to_kebab_case(),
            Self::CamelCase => s.to_lower_camel_case(),
            Self::PascalCase => s.to_upper_camel_case(),
        }
    }
}

/// Parsed inputs for `Marshal` derives.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(nullables), supports(struct_named))]
pub struct MarshalContainer {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: ast::Data<util::Ignored, MarshalField>,

    #[darling(default)]
    pub rename_all: RenameAll,
}

/// Parsed attributes for a single record field.
#[derive(Debug, FromField)]
#[darling(attributes(nullables))]
pub struct MarshalField {
    pub ident: Option<syn::Ident>,
    pub ty: Type,

    /// Explicit key, overriding `rename_all`.
    pub rename: Option<String>,
    /// Drop the key when the value reports `IsZero::is_zero`.
    #[darling(default)]
    pub omitempty: bool,
    #[darling(default)]
    pub skip: bool,
}

impl MarshalContainer {
    /// The fields that are written, paired with their JSON keys.
    pub fn keyed_fields(&self) -> syn::Result<Vec<(&MarshalField, String)>> {
        let ast::Data::Struct(fields) = &self.data else {
            return span_err!(&self.ident, "Marshal can only be derived for structs");
        };
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for field in fields.iter() {
            check_field_attrs(field)?;
            if field.skip {
                continue;
            }
            let Some(ident) = &field.ident else {
                return span_err!(&field.ty, "Marshal requires named fields");
            };
            let key = field
                .rename
                .clone()
                .unwrap_or_else(|| self.rename_all.rename(&ident.unraw().to_string()));
            if !seen.insert(key.clone()) {
                return span_err!(ident, format!("duplicate JSON key \"{key}\""));
            }
            out.push((field, key));
        }
        Ok(out)
    }
}

/// Validate that field attributes are compatible.
pub fn check_field_attrs(field: &MarshalField) -> syn::Result<()> {
    if field.skip {
        if field.rename.is_some() {
            span_err!(&field.ty, "`skip` cannot be combined with `rename`")?;
        }
        if field.omitempty {
            span_err!(&field.ty, "`skip` cannot be combined with `omitempty`")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_marshal_attrs() {
        let input = r#"
            #[nullables(rename_all = "camelCase")]
            pub struct Foo {
                #[nullables(rename = "b", omitempty)]
                bar: bool,
                baz_qux: i64,
                #[nullables(skip)]
                hidden: u8,
            }
        "#;
        let parsed = syn::parse_str(input).unwrap();
        let container = MarshalContainer::from_derive_input(&parsed).unwrap();
        assert_eq!(container.rename_all, RenameAll::CamelCase);
        let keys: Vec<_> = container
            .keyed_fields()
            .unwrap()
            .into_iter()
            .map(|(f, k)| (k, f.omitempty))
            .collect();
        assert_eq!(
            keys,
            vec![("b".to_string(), true), ("bazQux".to_string(), false)]
        );
    }

    #[test]
    fn it_renames() {
        assert_eq!(RenameAll::Verbatim.rename("user_id"), "user_id");
        assert_eq!(RenameAll::PascalCase.rename("user_id"), "UserId");
        assert_eq!(RenameAll::KebabCase.rename("user_id"), "user-id");
        assert_eq!(RenameAll::ScreamingSnakeCase.rename("user_id"), "USER_ID");
        assert_eq!(RenameAll::UpperCase.rename("user_id"), "USER_ID");
    }

    #[test]
    fn it_rejects_duplicate_keys() {
        let input = r#"
            struct Foo {
                #[nullables(rename = "a")]
                x: i32,
                a: i32,
            }
        "#;
        let container =
            MarshalContainer::from_derive_input(&syn::parse_str(input).unwrap()).unwrap();
        assert_errors_with!(container.keyed_fields(), "duplicate JSON key");
    }

    #[test]
    fn it_rejects_skip_with_rename() {
        let input = r#"
            struct Foo {
                #[nullables(skip, rename = "a")]
                x: i32,
            }
        "#;
        let container =
            MarshalContainer::from_derive_input(&syn::parse_str(input).unwrap()).unwrap();
        assert_errors_with!(container.keyed_fields(), "cannot be combined");
    }

    #[test]
    fn it_uses_raw_identifier_names() {
        let input = "struct Foo { r#type: i32 }";
        let container =
            MarshalContainer::from_derive_input(&syn::parse_str(input).unwrap()).unwrap();
        assert_eq!(container.keyed_fields().unwrap()[0].1, "type");
    }
}

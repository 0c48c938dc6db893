use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, GenericParam, parse_quote};

use super::core::MarshalContainer;

pub fn expand_marshal(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = MarshalContainer::from_derive_input(input)?;
    let ident = &container.ident;

    let mut generics = container.generics.clone();
    let bounded: Vec<_> = generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = generics.make_where_clause();
    for param in bounded {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::nullables::__private::serde::Serialize));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let entries = container.keyed_fields()?.into_iter().map(|(field, key)| {
        let member = &field.ident;
        let entry = quote!(__map.serialize_entry(#key, &self.#member)?;);
        if field.omitempty {
            quote!(if !::nullables::IsZero::is_zero(&self.#member) { #entry })
        } else {
            entry
        }
    });

    Ok(quote!(
        impl #impl_generics ::nullables::__private::serde::Serialize for #ident #ty_generics #where_clause {
            fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: ::nullables::__private::serde::Serializer,
            {
                use ::nullables::__private::serde::ser::SerializeMap as _;
                let mut __map = __serializer.serialize_map(::core::option::Option::None)?;
                #(#entries)*
                __map.end()
            }
        }
    ))
}

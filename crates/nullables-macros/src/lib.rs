//! Procedural macros for the nullables crate.

/// Shared attribute parsing for derive expansion.
mod core;
/// Derive support for record-level JSON marshalling.
mod marshal;

#[proc_macro_derive(Marshal, attributes(nullables))]
/// Derive a `serde::Serialize` implementation that writes a struct as a JSON object and
/// honours `#[nullables(rename = "..")]`, `#[nullables(omitempty)]`, `#[nullables(skip)]`
/// and the container-level `#[nullables(rename_all = "..")]`.
///
/// An `omitempty` field's type must implement `nullables::IsZero`. For a type without its own
/// notion of emptiness, `nullables::is_zero_by_default!(Type)` supplies an impl that compares
/// against `Default::default()`.
pub fn derive_marshal(tokenstream: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(tokenstream as syn::DeriveInput);
    match marshal::expand_marshal(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

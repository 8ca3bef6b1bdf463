//! Procedural macros for rulecheck
//!
//! - `#[derive(Record)]` - exposes a struct's fields and their
//!   `#[validate("...")]` rules to `rulecheck::validate`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields,
    GenericArgument, Lit, LitStr, Meta, PathArguments, Type, Visibility,
};

/// Derive `rulecheck::Record` for a struct with named fields.
///
/// Rules are attached per field with `#[validate("len:20")]` or
/// `#[validate = "len:20"]`. Fields without the attribute are not checked.
/// Only `pub` fields may carry rules.
///
/// Field types are classified by their spelling:
///
/// - text: `String`, `str`, `&str`, `Cow<str>`, `Box<str>`, `Rc<str>`, `Arc<str>`
/// - integer: every primitive integer type, `i8` through `u128`
/// - sequence: `Vec<T>`, `[T; N]`, `&[T]`, `Box<[T]>` of a text or integer `T`
///
/// Anything else (including type aliases) is unsupported and its rules are
/// ignored. Enums, unions and tuple structs derive an impl that reports
/// "not a struct" at validation time.
///
/// # Example
///
/// ```rust,ignore
/// use rulecheck::Record;
///
/// #[derive(Record)]
/// struct CreateUser {
///     #[validate("min:3;max:50")]
///     pub username: String,
///
///     #[validate("in:18,21,65")]
///     pub age: u8,
/// }
/// ```
#[proc_macro_derive(Record, attributes(validate))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let descriptors = fields
                    .named
                    .iter()
                    .map(field_descriptor)
                    .collect::<syn::Result<Vec<_>>>()?;
                quote! {
                    ::rulecheck::Shape::Struct(::std::vec![#(#descriptors),*])
                }
            }
            Fields::Unit => quote! { ::rulecheck::Shape::Struct(::std::vec::Vec::new()) },
            Fields::Unnamed(_) => quote! { ::rulecheck::Shape::Other("tuple struct") },
        },
        Data::Enum(_) => quote! { ::rulecheck::Shape::Other("enum") },
        Data::Union(_) => quote! { ::rulecheck::Shape::Other("union") },
    };

    Ok(quote! {
        impl #impl_generics ::rulecheck::Record for #name #ty_generics #where_clause {
            fn shape(&self) -> ::rulecheck::Shape<'_> {
                #body
            }
        }
    })
}

fn field_descriptor(field: &Field) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let name = ident.unraw().to_string();
    let public = matches!(field.vis, Visibility::Public(_));
    let rules = field_rules(&field.attrs)?.unwrap_or_default();

    let value = match classify(&field.ty) {
        Class::Scalar(Scalar::Text) => quote! {
            ::rulecheck::FieldValue::Text(::core::convert::AsRef::<str>::as_ref(&self.#ident))
        },
        Class::Scalar(Scalar::Integer) => quote! {
            ::rulecheck::FieldValue::Integer(::rulecheck::AsInteger::as_integer(&self.#ident))
        },
        Class::Sequence(Scalar::Text) => quote! {
            ::rulecheck::FieldValue::TextSeq(
                self.#ident
                    .iter()
                    .map(|v| ::core::convert::AsRef::<str>::as_ref(v))
                    .collect(),
            )
        },
        Class::Sequence(Scalar::Integer) => quote! {
            ::rulecheck::FieldValue::IntegerSeq(
                self.#ident
                    .iter()
                    .map(::rulecheck::AsInteger::as_integer)
                    .collect(),
            )
        },
        Class::Unsupported => quote! { ::rulecheck::FieldValue::Unsupported },
    };

    Ok(quote! {
        ::rulecheck::FieldDescriptor::new(#name, #value)
            .public(#public)
            .rules(#rules)
    })
}

/// Read the single `validate` attribute of a field, if any.
fn field_rules(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rules: Option<String> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
        if rules.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate `validate` attribute; join clauses with `;`",
            ));
        }

        let lit = match &attr.meta {
            Meta::List(list) => list.parse_args::<LitStr>()?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal, e.g. `#[validate = \"len:20\"]`",
                    ))
                }
            },
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected rules, e.g. `#[validate(\"len:20\")]`",
                ))
            }
        };

        rules = Some(lit.value());
    }

    Ok(rules)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Scalar(Scalar),
    Sequence(Scalar),
    Unsupported,
}

fn classify(ty: &Type) -> Class {
    if let Some(scalar) = scalar(ty) {
        return Class::Scalar(scalar);
    }

    let element = match ty {
        Type::Array(array) => Some(&*array.elem),
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) => Some(&*slice.elem),
            _ => None,
        },
        Type::Path(path) if path.qself.is_none() => match single_generic(path, &["Vec", "Box"]) {
            Some(Type::Slice(slice)) => Some(&*slice.elem),
            Some(inner) if last_ident(path).as_deref() == Some("Vec") => Some(inner),
            _ => None,
        },
        Type::Group(group) => return classify(&group.elem),
        Type::Paren(paren) => return classify(&paren.elem),
        _ => None,
    };

    element
        .and_then(scalar)
        .map_or(Class::Unsupported, Class::Sequence)
}

fn scalar(ty: &Type) -> Option<Scalar> {
    match ty {
        Type::Reference(reference) => is_str(&reference.elem).then_some(Scalar::Text),
        Type::Path(path) if path.qself.is_none() => {
            let ident = last_ident(path)?;
            match ident.as_str() {
                "String" | "str" => Some(Scalar::Text),
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" => Some(Scalar::Integer),
                "Cow" | "Box" | "Rc" | "Arc" => {
                    let inner = single_generic(path, &["Cow", "Box", "Rc", "Arc"])?;
                    is_str(inner).then_some(Scalar::Text)
                }
                _ => None,
            }
        }
        Type::Group(group) => scalar(&group.elem),
        Type::Paren(paren) => scalar(&paren.elem),
        _ => None,
    }
}

fn is_str(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => last_ident(path).as_deref() == Some("str"),
        _ => false,
    }
}

fn last_ident(path: &syn::TypePath) -> Option<String> {
    path.path.segments.last().map(|s| s.ident.to_string())
}

/// The only type argument of a path such as `Vec<T>`, ignoring lifetimes.
fn single_generic<'a>(path: &'a syn::TypePath, wrappers: &[&str]) -> Option<&'a Type> {
    let segment = path.path.segments.last()?;
    if !wrappers.iter().any(|w| segment.ident == *w) {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}

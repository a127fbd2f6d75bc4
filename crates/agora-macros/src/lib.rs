use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Marks a function as a composable widget.
///
/// The body is re-run on every composition pass inside a group keyed by the
/// definition site, which gives calls positional identity: values kept with
/// `remember`/`useState` and nodes emitted with `emit_node` are matched up
/// with the previous pass' slots instead of being recreated.
///
/// Early `return`s and `?` inside the body leave the group normally; the
/// group is always closed before the composable returns.
#[proc_macro_attribute]
pub fn composable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_tokens = TokenStream2::from(attr);
    if !attr_tokens.is_empty() {
        return syn::Error::new_spanned(attr_tokens, "composable takes no arguments")
            .to_compile_error()
            .into();
    }

    let mut func = parse_macro_input!(item as ItemFn);
    let block = func.block.clone();
    let wrapped = quote!({
        agora_core::with_current_composer(|__composer: &agora_core::Composer| {
            __composer.with_group(
                agora_core::location_key(file!(), line!(), column!()),
                |__composer: &agora_core::Composer| {
                    let _ = __composer;
                    #block
                },
            )
        })
    });
    func.block = Box::new(syn::parse2(wrapped).expect("failed to build block"));
    TokenStream::from(quote! { #func })
}

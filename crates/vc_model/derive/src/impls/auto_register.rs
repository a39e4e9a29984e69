use crate::derive_data::ModelStruct;

/// Submits the class to `inventory` if `#[model(auto_register)]` is present.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(model: &ModelStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = model.attrs.auto_register else {
        return crate::utils::empty();
    };

    let auto_register_ = crate::path::auto_register_(&model.vc_model_path);
    let ident = model.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ModelStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}

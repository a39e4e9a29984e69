//! Items used by the code generated by `vc_model_derive`. Not public API.

pub use alloc::borrow::Cow;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::class::{ClassInfo, ClassInfoCell, Model};
    use crate::registry::{ClassMeta, ClassRegistry, GetClassMeta};

    pub use inventory;

    /// A registration function collected by `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut ClassRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Registers every collected class into `registry`.
    pub fn __register_classes(registry: &mut ClassRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }

    pub trait __RegisterType {
        fn __register(registry: &mut ClassRegistry);
    }

    impl<T: GetClassMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut ClassRegistry) {
            registry.register::<T>();
        }
    }

    /// Always submitted. Its presence after `__register_classes` tells whether
    /// `inventory` works on this platform.
    pub struct __AvailFlag;

    impl Model for __AvailFlag {
        fn class_info() -> &'static ClassInfo {
            static CELL: ClassInfoCell = ClassInfoCell::new();
            CELL.get_or_init(|| {
                ClassInfo::new::<Self>(
                    "__AvailFlag",
                    "vc_model::__macro_exports::auto_register::__AvailFlag",
                )
            })
        }
    }

    impl GetClassMeta for __AvailFlag {
        fn get_class_meta() -> ClassMeta {
            ClassMeta::of::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }
}

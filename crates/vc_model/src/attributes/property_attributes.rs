use alloc::string::{String, ToString};

use crate::attributes::parser::{parse_attributes, referenced_class_name};
use crate::attributes::{DeclError, MemoryPolicy};
use crate::class::{ClassInfo, PropertyDecl};
use crate::selector::compose_selector;

/// Resolved metadata of one declared property.
///
/// Built by the [`ClassRegistry`](crate::registry::ClassRegistry) from a
/// [`PropertyDecl`], see [`declared_properties`](crate::registry::ClassRegistry::declared_properties).
#[derive(Clone, PartialEq, Eq)]
pub struct PropertyAttributes {
    name: String,
    declared_by: &'static ClassInfo,
    readonly: bool,
    nonatomic: bool,
    dynamic: bool,
    memory_policy: MemoryPolicy,
    getter: String,
    setter: String,
    ivar: Option<String>,
    object_class: Option<&'static ClassInfo>,
    type_encoding: String,
}

impl PropertyAttributes {
    /// Resolves a raw declaration of `class`.
    ///
    /// `lookup_class` maps a class name found in a `@"Name"` type encoding to
    /// its registered class.
    pub fn resolve(
        class: &'static ClassInfo,
        decl: &PropertyDecl,
        lookup_class: impl FnOnce(&str) -> Option<&'static ClassInfo>,
    ) -> Result<Self, DeclError> {
        let raw = parse_attributes(decl.attributes())?;
        let name = decl.name();

        let memory_policy = if raw.readonly {
            MemoryPolicy::Assign
        } else if raw.weak {
            MemoryPolicy::Weak
        } else if raw.copy {
            MemoryPolicy::Copy
        } else if raw.retain || raw.type_encoding.starts_with('@') {
            MemoryPolicy::Retain
        } else {
            MemoryPolicy::Assign
        };

        let getter = match raw.getter {
            Some(getter) => getter.to_string(),
            None => name.to_string(),
        };
        let setter = match raw.setter {
            Some(setter) => setter.to_string(),
            None => compose_selector("set", name, ":")?,
        };
        let ivar = raw
            .ivar
            .filter(|_| !raw.dynamic)
            .map(ToString::to_string);

        let object_class = referenced_class_name(raw.type_encoding).and_then(|class_name| {
            let found = lookup_class(class_name);
            if found.is_none() {
                log::debug!(
                    "property `{}::{name}` references unknown class `{class_name}`",
                    class.path()
                );
            }
            found
        });

        Ok(Self {
            name: name.to_string(),
            declared_by: class,
            readonly: raw.readonly,
            nonatomic: raw.nonatomic,
            dynamic: raw.dynamic,
            memory_policy,
            getter,
            setter,
            ivar,
            object_class,
            type_encoding: raw.type_encoding.to_string(),
        })
    }

    /// Returns the property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the class declaring this property.
    #[inline]
    pub fn declared_by(&self) -> &'static ClassInfo {
        self.declared_by
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    #[inline]
    pub fn is_nonatomic(&self) -> bool {
        self.nonatomic
    }

    /// Returns `true` if the accessors are provided elsewhere.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    #[inline]
    pub fn memory_policy(&self) -> MemoryPolicy {
        self.memory_policy
    }

    /// Returns the getter name, the property name unless customized.
    #[inline]
    pub fn getter(&self) -> &str {
        &self.getter
    }

    /// Returns the setter name.
    ///
    /// Populated for read-only properties as well, naming the setter that
    /// would exist.
    #[inline]
    pub fn setter(&self) -> &str {
        &self.setter
    }

    /// Returns the backing storage, `None` for computed and dynamic properties.
    #[inline]
    pub fn ivar(&self) -> Option<&str> {
        self.ivar.as_deref()
    }

    /// Returns the registered class of the value type.
    ///
    /// `None` for untyped references, value types and unknown class names.
    #[inline]
    pub fn object_class(&self) -> Option<&'static ClassInfo> {
        self.object_class
    }

    /// Returns the raw type encoding, e.g. `q` or `@"User"`.
    #[inline]
    pub fn type_encoding(&self) -> &str {
        &self.type_encoding
    }

    /// Returns `true` if the value type is a reference (`@...`).
    #[inline]
    pub fn is_reference(&self) -> bool {
        self.type_encoding.starts_with('@')
    }
}

impl core::fmt::Debug for PropertyAttributes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyAttributes")
            .field("name", &self.name)
            .field("declared_by", &self.declared_by.path())
            .field("readonly", &self.readonly)
            .field("nonatomic", &self.nonatomic)
            .field("dynamic", &self.dynamic)
            .field("memory_policy", &self.memory_policy)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .field("ivar", &self.ivar)
            .field("object_class", &self.object_class.map(ClassInfo::path))
            .field("type_encoding", &self.type_encoding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::attributes::{DeclError, MemoryPolicy, PropertyAttributes};
    use crate::class::{ClassInfo, Model, PropertyDecl};
    use crate::derive::Model;

    #[derive(Model)]
    struct Owner {
        name: String,
    }

    fn resolve(attributes: &'static str) -> Result<PropertyAttributes, DeclError> {
        let decl = PropertyDecl::new("value", attributes);
        PropertyAttributes::resolve(Owner::class_info(), &decl, |name| {
            (name == "Owner").then(Owner::class_info)
        })
    }

    #[test]
    fn memory_policy_precedence() {
        let policy = |raw| resolve(raw).unwrap().memory_policy();

        assert_eq!(policy("T@,R,W,C,&"), MemoryPolicy::Assign);
        assert_eq!(policy("T@,W,C,&"), MemoryPolicy::Weak);
        assert_eq!(policy("T@,C,&"), MemoryPolicy::Copy);
        assert_eq!(policy("Tq,&"), MemoryPolicy::Retain);
        assert_eq!(policy(r#"T@"String""#), MemoryPolicy::Retain);
        assert_eq!(policy("Tq"), MemoryPolicy::Assign);
        assert_eq!(policy("T{Point=dd}"), MemoryPolicy::Assign);
    }

    #[test]
    fn default_accessors() {
        let attrs = resolve("Tq,R,Vvalue").unwrap();
        assert_eq!(attrs.getter(), "value");
        assert_eq!(attrs.setter(), "setValue:");
        assert_eq!(attrs.ivar(), Some("value"));
        assert!(attrs.is_readonly());

        let attrs = resolve("Tq,GcurrentValue,SupdateValue:").unwrap();
        assert_eq!(attrs.getter(), "currentValue");
        assert_eq!(attrs.setter(), "updateValue:");
        assert_eq!(attrs.ivar(), None);
    }

    #[test]
    fn dynamic_has_no_ivar() {
        let attrs = resolve("T@,D,Vvalue").unwrap();
        assert!(attrs.is_dynamic());
        assert_eq!(attrs.ivar(), None);
    }

    #[test]
    fn object_class_lookup() {
        let attrs = resolve(r#"T@"Owner",&,N"#).unwrap();
        assert_eq!(attrs.object_class().map(ClassInfo::name), Some("Owner"));
        assert_eq!(attrs.type_encoding(), r#"@"Owner""#);
        assert!(attrs.is_nonatomic());

        assert!(resolve(r#"T@"Missing""#).unwrap().object_class().is_none());
        assert!(resolve("T@").unwrap().object_class().is_none());
        assert!(resolve("Tq").unwrap().object_class().is_none());
    }

    #[test]
    fn declaration_errors() {
        assert!(resolve("q").is_err());

        let decl = PropertyDecl::new("", "Tq");
        let err = PropertyAttributes::resolve(Owner::class_info(), &decl, |_| None).unwrap_err();
        assert!(matches!(err, DeclError::Selector(_)));
    }
}

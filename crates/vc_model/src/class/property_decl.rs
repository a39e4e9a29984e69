use alloc::borrow::Cow;
use alloc::string::String;

use crate::class::TypeEncoding;

// -----------------------------------------------------------------------------
// PropertyDecl

/// A declared property: its name and its raw attribute string.
///
/// The attribute string is a comma separated list, starting with the type:
///
/// ```text
/// T<type>[,R][,C][,&][,N][,G<getter>][,S<setter>][,D][,W][,V<ivar>]
/// ```
///
/// | attribute | meaning |
/// |---|---|
/// | `T<type>` | the [type encoding](TypeEncoding), required and first |
/// | `R` | read-only |
/// | `C` | the value is copied on assignment |
/// | `&` | the value is retained (shared) on assignment |
/// | `W` | the value is a weak reference |
/// | `N` | non-atomic accessors |
/// | `D` | dynamic, accessors are provided elsewhere |
/// | `G<name>` | custom getter |
/// | `S<name>` | custom setter |
/// | `V<name>` | backing storage (the struct field) |
///
/// `PropertyDecl` never validates the string, malformed declarations are
/// reported when the attributes are resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    name: Cow<'static, str>,
    attributes: Cow<'static, str>,
}

impl PropertyDecl {
    /// Creates a declaration from a raw attribute string.
    #[inline]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        attributes: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.into(),
        }
    }

    /// Creates a builder that assembles the attribute string.
    ///
    /// ```
    /// use vc_model::class::PropertyDecl;
    ///
    /// let decl = PropertyDecl::builder("name")
    ///     .of_type::<String>()
    ///     .copy()
    ///     .nonatomic()
    ///     .ivar("name")
    ///     .build();
    ///
    /// assert_eq!(decl.attributes(), r#"T@"String",C,N,Vname"#);
    /// ```
    #[inline]
    pub fn builder(name: impl Into<Cow<'static, str>>) -> PropertyDeclBuilder {
        PropertyDeclBuilder::new(name.into())
    }

    /// Returns the property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw attribute string.
    #[inline]
    pub fn attributes(&self) -> &str {
        &self.attributes
    }
}

// -----------------------------------------------------------------------------
// PropertyDeclBuilder

/// Builder of [`PropertyDecl`], see [`PropertyDecl::builder`].
///
/// Used by the derive macro. Flags may be combined freely; which one wins is
/// decided when the attributes are resolved.
#[derive(Clone, Debug)]
#[must_use]
pub struct PropertyDeclBuilder {
    name: Cow<'static, str>,
    type_encoding: Cow<'static, str>,
    readonly: bool,
    copy: bool,
    retain: bool,
    weak: bool,
    nonatomic: bool,
    dynamic: bool,
    getter: Option<Cow<'static, str>>,
    setter: Option<Cow<'static, str>>,
    ivar: Option<Cow<'static, str>>,
}

impl PropertyDeclBuilder {
    fn new(name: Cow<'static, str>) -> Self {
        Self {
            name,
            type_encoding: Cow::Borrowed("@"),
            readonly: false,
            copy: false,
            retain: false,
            weak: false,
            nonatomic: false,
            dynamic: false,
            getter: None,
            setter: None,
            ivar: None,
        }
    }

    /// Uses the type encoding of `T`.
    #[inline]
    pub fn of_type<T: TypeEncoding + ?Sized>(self) -> Self {
        self.type_encoding(T::type_encoding())
    }

    /// Uses an explicit type encoding. Defaults to `@`.
    #[inline]
    pub fn type_encoding(self, encoding: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_encoding: encoding.into(),
            ..self
        }
    }

    /// Marks the property read-only.
    #[inline]
    pub fn readonly(self) -> Self {
        Self {
            readonly: true,
            ..self
        }
    }

    /// Marks the value as copied on assignment.
    #[inline]
    pub fn copy(self) -> Self {
        Self { copy: true, ..self }
    }

    /// Marks the value as retained on assignment.
    #[inline]
    pub fn retain(self) -> Self {
        Self {
            retain: true,
            ..self
        }
    }

    /// Marks the value as a weak reference.
    #[inline]
    pub fn weak(self) -> Self {
        Self { weak: true, ..self }
    }

    /// Marks the accessors non-atomic.
    #[inline]
    pub fn nonatomic(self) -> Self {
        Self {
            nonatomic: true,
            ..self
        }
    }

    /// Marks the property dynamic. A dynamic property never has backing storage.
    #[inline]
    pub fn dynamic(self) -> Self {
        Self {
            dynamic: true,
            ..self
        }
    }

    /// Sets a custom getter name.
    #[inline]
    pub fn getter(self, getter: impl Into<Cow<'static, str>>) -> Self {
        Self {
            getter: Some(getter.into()),
            ..self
        }
    }

    /// Sets a custom setter name.
    #[inline]
    pub fn setter(self, setter: impl Into<Cow<'static, str>>) -> Self {
        Self {
            setter: Some(setter.into()),
            ..self
        }
    }

    /// Sets the backing storage name.
    #[inline]
    pub fn ivar(self, ivar: impl Into<Cow<'static, str>>) -> Self {
        Self {
            ivar: Some(ivar.into()),
            ..self
        }
    }

    /// Assembles the attribute string.
    pub fn build(self) -> PropertyDecl {
        let mut attributes = String::with_capacity(16 + self.type_encoding.len());
        attributes.push('T');
        attributes.push_str(&self.type_encoding);

        if self.readonly {
            push_flag(&mut attributes, 'R');
        }
        if self.copy {
            push_flag(&mut attributes, 'C');
        }
        if self.retain {
            push_flag(&mut attributes, '&');
        }
        if self.nonatomic {
            push_flag(&mut attributes, 'N');
        }
        if let Some(getter) = &self.getter {
            push_flag(&mut attributes, 'G');
            attributes.push_str(getter);
        }
        if let Some(setter) = &self.setter {
            push_flag(&mut attributes, 'S');
            attributes.push_str(setter);
        }
        if self.dynamic {
            push_flag(&mut attributes, 'D');
        }
        if self.weak {
            push_flag(&mut attributes, 'W');
        }
        if let Some(ivar) = self.ivar.as_ref().filter(|_| !self.dynamic) {
            push_flag(&mut attributes, 'V');
            attributes.push_str(ivar);
        }

        PropertyDecl {
            name: self.name,
            attributes: Cow::Owned(attributes),
        }
    }
}

#[inline]
fn push_flag(attributes: &mut String, flag: char) {
    attributes.push(',');
    attributes.push(flag);
}

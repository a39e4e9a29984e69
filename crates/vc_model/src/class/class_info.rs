use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::OnceLock;

use crate::class::PropertyDecl;

// -----------------------------------------------------------------------------
// Model

/// A static accessor to compile-time class information.
///
/// Automatically implemented by [`#[derive(Model)]`](crate::derive::Model),
/// allowing access to class information without an instance of the type.
///
/// # Examples
///
/// ```
/// use vc_model::{class::Model, derive::Model};
///
/// #[derive(Model)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let info = Point::class_info();
/// assert_eq!(info.name(), "Point");
/// assert_eq!(info.properties().len(), 2);
/// ```
///
/// # Manually Impl
///
/// ```
/// use vc_model::class::{ClassInfo, ClassInfoCell, Model, PropertyDecl};
///
/// struct Point {
///     x: f64,
/// }
///
/// impl Model for Point {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::new::<Self>("Point", "geometry::Point")
///                 .with_properties([PropertyDecl::new("x", "Td,N,Vx")])
///         })
///     }
/// }
///
/// assert_eq!(Point::class_info().property("x").unwrap().attributes(), "Td,N,Vx");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Model` so it has no class information",
    note = "consider annotating `{Self}` with `#[derive(Model)]`"
)]
pub trait Model: Any {
    /// Returns the static class information of this type.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Compile-time information about a model type.
///
/// A `ClassInfo` lists the properties *declared* on the type itself.
/// Inherited properties are found by following [`superclass`](Self::superclass).
pub struct ClassInfo {
    type_id: TypeId,
    name: &'static str,
    path: &'static str,
    // The superclass info is created on first access; a function pointer delays it.
    superclass: Option<fn() -> &'static ClassInfo>,
    properties: Box<[PropertyDecl]>,
}

impl ClassInfo {
    /// Creates a class without superclass and properties.
    ///
    /// `name` is used to resolve `@"Name"` type descriptors, `path` should be
    /// the full module path of the type.
    #[inline]
    pub fn new<T: Any>(name: &'static str, path: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name,
            path,
            superclass: None,
            properties: Box::new([]),
        }
    }

    /// Sets the superclass.
    #[inline]
    pub fn with_superclass<S: Model>(self) -> Self {
        Self {
            superclass: Some(S::class_info),
            ..self
        }
    }

    /// Replaces the declared properties, keeping the input order.
    pub fn with_properties(self, properties: impl IntoIterator<Item = PropertyDecl>) -> Self {
        let properties: Box<[PropertyDecl]> = properties.into_iter().collect();

        #[cfg(all(debug_assertions, feature = "debug"))]
        for (index, decl) in properties.iter().enumerate() {
            debug_assert!(
                properties[..index].iter().all(|d| d.name() != decl.name()),
                "property `{}` is declared twice on `{}`",
                decl.name(),
                self.path,
            );
        }

        Self { properties, ..self }
    }

    /// Returns the `TypeId` of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the class name, e.g. `User`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the full path, e.g. `app::models::User`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the superclass, if any.
    #[inline]
    pub fn superclass(&self) -> Option<&'static ClassInfo> {
        self.superclass.map(|f| f())
    }

    /// Returns the properties declared on this class, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    /// Returns the property declared on this class with the given name.
    ///
    /// Inherited properties are not searched.
    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|d| d.name() == name)
    }

    /// Returns an iterator starting at `self` and walking up the superclass chain.
    ///
    /// ```
    /// use vc_model::{class::Model, derive::Model};
    ///
    /// #[derive(Model)]
    /// struct Base;
    ///
    /// #[derive(Model)]
    /// #[model(extends = Base)]
    /// struct Derived;
    ///
    /// let names: Vec<_> = Derived::class_info().ancestors().map(|c| c.name()).collect();
    /// assert_eq!(names, ["Derived", "Base"]);
    /// ```
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns `true` if `other` is a *proper* ancestor of this class.
    pub fn is_subclass_of(&self, other: &ClassInfo) -> bool {
        self.ancestors().skip(1).any(|c| c == other)
    }
}

impl PartialEq for ClassInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassInfo {}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("path", &self.path)
            .field("superclass", &self.superclass().map(ClassInfo::path))
            .field("properties", &self.properties)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Iterator over a class and its superclasses, see [`ClassInfo::ancestors`].
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a ClassInfo>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.superclass();
        Some(current)
    }
}

// -----------------------------------------------------------------------------
// ClassInfoCell

/// Container for static storage of class information.
///
/// This is usually used to implement [`Model`], see its documentation.
pub struct ClassInfoCell(OnceLock<ClassInfo>);

impl ClassInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the `ClassInfo` stored in the cell.
    ///
    /// If the cell is empty, it is initialized with the given function.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &ClassInfo
    where
        F: FnOnce() -> ClassInfo,
    {
        self.0.get_or_init(f)
    }
}

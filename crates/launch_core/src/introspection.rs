//! Runtime class relationships for actions and events
//!
//! Actions and events are plain Rust types, but the launch system still needs
//! to answer "is this value a kind of X?" at a few boundaries: the action
//! registry only accepts action kinds, and event handlers filter on a family
//! of events. Every action and event points at a static [`Class`] descriptor
//! that records its parent, and the helpers here walk that chain.

use std::fmt;

/// Static descriptor of an action or event kind
pub struct Class {
    name: &'static str,
    base: Option<&'static Class>,
}

impl Class {
    /// Create a root class
    pub const fn root(name: &'static str) -> Self {
        Self { name, base: None }
    }

    /// Create a class deriving from `base`
    pub const fn derived(name: &'static str, base: &'static Class) -> Self {
        Self {
            name,
            base: Some(base),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base(&self) -> Option<&'static Class> {
        self.base
    }

    /// True if `self` is `other` or derives from it (directly or not)
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, other) {
                return true;
            }
            current = class.base;
        }
        false
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Implemented by every value that belongs to a [`Class`]
pub trait HasClass {
    fn class(&self) -> &'static Class;
}

/// A value handed to the introspection helpers
///
/// Callers at a dispatch boundary may hold an instance, a class reference or
/// some unrelated value; all three are accepted and told apart here.
#[derive(Clone, Copy)]
pub enum Object<'a> {
    /// An instance, represented by its class
    Instance(&'static Class),
    /// A class reference
    Class(&'static Class),
    /// Anything that is neither (a number, a string, ...)
    Scalar(&'a dyn fmt::Debug),
}

impl<'a> Object<'a> {
    /// Wrap an instance of an action or event
    pub fn of<T: HasClass + ?Sized>(value: &T) -> Object<'static> {
        Object::Instance(value.class())
    }

    /// Wrap an arbitrary value that carries no class
    pub fn scalar(value: &'a dyn fmt::Debug) -> Self {
        Object::Scalar(value)
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Instance(class) => write!(f, "<{} instance>", class.name),
            Object::Class(class) => write!(f, "{:?}", class),
            Object::Scalar(value) => write!(f, "{:?}", value),
        }
    }
}

/// Misuse of the introspection helpers
///
/// These signal programming errors at the call site, never bad user input.
#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    #[error("obj '{0}' is not a class instance")]
    NotAnInstance(String),

    #[error("entity_type '{0}' is not a class")]
    NotAClass(String),

    #[error("class '{0}' is not an event class")]
    NotAnEventClass(String),
}

fn expect_class(entity_type: Object<'_>) -> Result<&'static Class, IntrospectionError> {
    match entity_type {
        Object::Class(class) => Ok(class),
        other => Err(IntrospectionError::NotAClass(format!("{:?}", other))),
    }
}

/// Return true if `obj` is an instance of `entity_type` (or of a subclass)
pub fn is_a(obj: Object<'_>, entity_type: Object<'_>) -> Result<bool, IntrospectionError> {
    let class = match obj {
        Object::Instance(class) => class,
        other => return Err(IntrospectionError::NotAnInstance(format!("{:?}", other))),
    };
    let entity_type = expect_class(entity_type)?;
    Ok(class.is_subclass_of(entity_type))
}

/// Return true if `obj` is an instance of `entity_type`, or is itself a class
/// deriving from it
///
/// Values that are neither instances nor classes are simply not subclasses.
pub fn is_a_subclass(obj: Object<'_>, entity_type: Object<'_>) -> Result<bool, IntrospectionError> {
    let entity_type_class = expect_class(entity_type)?;
    match obj {
        Object::Instance(_) => is_a(obj, entity_type),
        Object::Class(class) => Ok(class.is_subclass_of(entity_type_class)),
        Object::Scalar(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: Class = Class::root("Base");
    static MIDDLE: Class = Class::derived("Middle", &BASE);
    static LEAF: Class = Class::derived("Leaf", &MIDDLE);
    static OTHER: Class = Class::root("Other");

    struct Leaf;

    impl HasClass for Leaf {
        fn class(&self) -> &'static Class {
            &LEAF
        }
    }

    #[test]
    fn test_subclass_chain() {
        assert!(LEAF.is_subclass_of(&BASE));
        assert!(LEAF.is_subclass_of(&LEAF));
        assert!(!BASE.is_subclass_of(&LEAF));
        assert!(!LEAF.is_subclass_of(&OTHER));
    }

    #[test]
    fn test_is_a_instance() {
        let leaf = Leaf;
        assert!(is_a(Object::of(&leaf), Object::Class(&BASE)).unwrap());
        assert!(!is_a(Object::of(&leaf), Object::Class(&OTHER)).unwrap());
    }

    #[test]
    fn test_is_a_rejects_non_instance() {
        let result = is_a(Object::scalar(&42), Object::Class(&BASE));
        assert!(matches!(result, Err(IntrospectionError::NotAnInstance(s)) if s == "42"));

        let result = is_a(Object::Class(&LEAF), Object::Class(&BASE));
        assert!(matches!(result, Err(IntrospectionError::NotAnInstance(_))));
    }

    #[test]
    fn test_is_a_rejects_non_class_type() {
        let leaf = Leaf;
        let result = is_a(Object::of(&leaf), Object::scalar(&"Base"));
        assert!(matches!(result, Err(IntrospectionError::NotAClass(_))));
    }

    #[test]
    fn test_is_a_subclass() {
        let leaf = Leaf;
        assert!(is_a_subclass(Object::of(&leaf), Object::Class(&BASE)).unwrap());
        assert!(is_a_subclass(Object::Class(&LEAF), Object::Class(&BASE)).unwrap());
        assert!(!is_a_subclass(Object::Class(&BASE), Object::Class(&LEAF)).unwrap());
        assert!(!is_a_subclass(Object::scalar(&42), Object::Class(&BASE)).unwrap());
    }

    #[test]
    fn test_is_a_subclass_rejects_non_class_type() {
        let result = is_a_subclass(Object::Class(&LEAF), Object::Instance(&BASE));
        assert!(matches!(result, Err(IntrospectionError::NotAClass(_))));
    }
}

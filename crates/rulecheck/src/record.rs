//! The `Record` trait: how a value exposes its fields to the validator.

use crate::field::FieldDescriptor;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// Shape of a value as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<'a> {
    /// A struct with named fields, in declaration order.
    Struct(Vec<FieldDescriptor<'a>>),
    /// Anything else. The name describes what was found, for the error message.
    Other(&'static str),
}

/// A value the validator can inspect.
///
/// Usually derived:
///
/// ```rust
/// use rulecheck::Record;
///
/// #[derive(Record)]
/// struct Signup {
///     #[validate("min:3;max:20")]
///     pub username: String,
///     #[validate("in:18,21")]
///     pub age: u8,
/// }
///
/// let signup = Signup { username: "ann".into(), age: 21 };
/// assert!(rulecheck::validate(&signup).is_ok());
/// ```
///
/// Implement it by hand to register fields explicitly, for types the derive
/// cannot classify (type aliases, newtypes):
///
/// ```rust
/// use rulecheck::{FieldDescriptor, FieldValue, Record, Shape};
///
/// struct Code(String);
///
/// impl Record for Code {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Struct(vec![
///             FieldDescriptor::new("code", FieldValue::Text(&self.0)).rules("len:6"),
///         ])
///     }
/// }
///
/// assert!(rulecheck::validate(&Code("ab12cd".into())).is_ok());
/// ```
pub trait Record {
    /// The fields of this value, or what it is when it is not a struct.
    fn shape(&self) -> Shape<'_>;
}

impl Record for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(Vec::new())
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Record + ?Sized> Record for &mut T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Record + ?Sized> Record for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

macro_rules! impl_not_a_struct {
    ($found:literal => $($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Other($found)
                }
            }
        )*
    };
}

impl_not_a_struct!("string" => str, String);
impl_not_a_struct!("bool" => bool);
impl_not_a_struct!("char" => char);
impl_not_a_struct!("integer" => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_not_a_struct!("float" => f32, f64);

impl<K, V, S> Record for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("map")
    }
}

impl<K, V> Record for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("map")
    }
}

impl<T> Record for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("sequence")
    }
}

impl<T> Record for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("sequence")
    }
}

/// `Option` is a wrapper, not a struct, even when it holds one.
impl<T> Record for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Other("option")
    }
}

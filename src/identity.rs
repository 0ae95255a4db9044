//! Identifier resolution for values added without an explicit id.
//!
//! A value may carry its own identifier by overriding
//! [`Identify::identifier`]. When it does not, [`resolve_id`] falls back to a
//! freshly generated version-4 UUID string.
//!
//! ```text
//!   add(value)
//!     │
//!     ├── value.identifier() == Some(id) ──► id
//!     │
//!     └── None ──────────────────────────► Uuid::new_v4().to_string()
//! ```
//!
//! Common standard types implement [`Identify`] with the default (no
//! identifier), so caches of `String`, integers, etc. always get generated ids.
//!
//! ## Example Usage
//!
//! ```
//! use containerkit::identity::{Identify, resolve_id};
//!
//! struct Car {
//!     name: String,
//! }
//!
//! impl Identify for Car {
//!     fn identifier(&self) -> Option<String> {
//!         Some(self.name.clone())
//!     }
//! }
//!
//! let car = Car { name: "beetle".into() };
//! assert_eq!(resolve_id(&car), "beetle");
//!
//! let generated = resolve_id(&"plain".to_string());
//! assert_eq!(generated.len(), 36);
//! ```

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use uuid::Uuid;

/// Optional "provides its own ID" capability.
///
/// Types without a natural identifier implement this with an empty body:
///
/// ```
/// use containerkit::identity::Identify;
///
/// #[derive(Clone)]
/// struct Reading(f64);
///
/// impl Identify for Reading {}
/// ```
pub trait Identify {
    /// Returns the value's own identifier, if it has one.
    fn identifier(&self) -> Option<String> {
        None
    }
}

/// Resolves the identifier to store `value` under.
///
/// Uses the value's own identifier when present, otherwise generates a
/// random RFC 4122 (version 4) UUID.
pub fn resolve_id<T: Identify + ?Sized>(value: &T) -> String {
    value.identifier().unwrap_or_else(generate_id)
}

/// Generates a fresh, practically unique identifier.
#[inline]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! impl_anonymous {
    ($($ty:ty),* $(,)?) => {
        $(impl Identify for $ty {})*
    };
}

impl_anonymous!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, str,
    String,
);

impl<T> Identify for Vec<T> {}
impl<T> Identify for Option<T> {}
impl Identify for Cow<'_, str> {}

impl<T: Identify + ?Sized> Identify for &T {
    fn identifier(&self) -> Option<String> {
        (**self).identifier()
    }
}

impl<T: Identify + ?Sized> Identify for Box<T> {
    fn identifier(&self) -> Option<String> {
        (**self).identifier()
    }
}

impl<T: Identify + ?Sized> Identify for Arc<T> {
    fn identifier(&self) -> Option<String> {
        (**self).identifier()
    }
}

impl<T: Identify + ?Sized> Identify for Rc<T> {
    fn identifier(&self) -> Option<String> {
        (**self).identifier()
    }
}

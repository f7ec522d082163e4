//! Typed accessors shared by [`JsonObject`](crate::JsonObject) (by key) and
//! [`JsonArray`](crate::JsonArray) (by index).
//!
//! `get_*` accessors report every failure. `opt_*` accessors turn every
//! failure, whatever its kind, into a default through [`or_default`].

use tracing::trace;

use crate::error::AccessError;

/// Maps any accessor failure to `default`.
pub(crate) fn or_default<T>(result: Result<T, AccessError>, default: T) -> T {
    result.unwrap_or_else(|err| {
        trace!(%err, "optional accessor fell back to its default");
        default
    })
}

/// Generates the accessor surface for a view type whose `locate` method
/// resolves a `$at` to a value node.
macro_rules! typed_accessors {
    ($view:ident, $at:ty, $name:ident, $what:literal) => {
        impl<D: core::borrow::Borrow<$crate::document::Document>> $view<D> {
            #[doc = concat!("Returns the value ", $what, ". Containers are returned as views.")]
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it cannot be decoded.
            pub fn get(&self, $name: $at) -> Result<$crate::Value<&$crate::document::Document>, $crate::AccessError> {
                $crate::decode::value(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the value ", $what, ", or `None` on any failure.")]
            #[must_use]
            pub fn opt(&self, $name: $at) -> Option<$crate::Value<&$crate::document::Document>> {
                $crate::access::or_default(self.get($name).map(Some), None)
            }

            #[doc = concat!("Returns the string ", $what, ".")]
            ///
            /// Numbers yield their text as written and booleans their literal.
            ///
            /// # Errors
            ///
            /// Fails if there is no such value, it is `null` or a container,
            /// or it holds a malformed escape.
            pub fn get_string(&self, $name: $at) -> Result<alloc::borrow::Cow<'_, str>, $crate::AccessError> {
                $crate::decode::string(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the string ", $what, ", or `\"\"` on any failure.")]
            #[must_use]
            pub fn opt_string(&self, $name: $at) -> alloc::borrow::Cow<'_, str> {
                $crate::access::or_default(self.get_string($name), alloc::borrow::Cow::Borrowed(""))
            }

            #[doc = concat!("Returns the string ", $what, ", or `default` on any failure.")]
            #[must_use]
            pub fn opt_string_or<'a>(&'a self, $name: $at, default: &'a str) -> alloc::borrow::Cow<'a, str> {
                $crate::access::or_default(self.get_string($name), alloc::borrow::Cow::Borrowed(default))
            }

            #[doc = concat!("Returns the 32-bit integer ", $what, ".")]
            ///
            /// Digits past the range of `i32` wrap around. Floats are
            /// truncated and strings are parsed.
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not numeric.
            pub fn get_int(&self, $name: $at) -> Result<i32, $crate::AccessError> {
                $crate::decode::int(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the 32-bit integer ", $what, ", or `0` on any failure.")]
            #[must_use]
            pub fn opt_int(&self, $name: $at) -> i32 {
                self.opt_int_or($name, 0)
            }

            #[doc = concat!("Returns the 32-bit integer ", $what, ", or `default` on any failure.")]
            #[must_use]
            pub fn opt_int_or(&self, $name: $at, default: i32) -> i32 {
                $crate::access::or_default(self.get_int($name), default)
            }

            #[doc = concat!("Returns the 64-bit integer ", $what, ".")]
            ///
            /// Digits past the range of `i64` wrap around. Floats are
            /// truncated and strings are parsed.
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not numeric.
            pub fn get_long(&self, $name: $at) -> Result<i64, $crate::AccessError> {
                $crate::decode::long(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the 64-bit integer ", $what, ", or `0` on any failure.")]
            #[must_use]
            pub fn opt_long(&self, $name: $at) -> i64 {
                self.opt_long_or($name, 0)
            }

            #[doc = concat!("Returns the 64-bit integer ", $what, ", or `default` on any failure.")]
            #[must_use]
            pub fn opt_long_or(&self, $name: $at, default: i64) -> i64 {
                $crate::access::or_default(self.get_long($name), default)
            }

            #[doc = concat!("Returns the double ", $what, ".")]
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not numeric.
            pub fn get_double(&self, $name: $at) -> Result<f64, $crate::AccessError> {
                $crate::decode::double(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the double ", $what, ", or NaN on any failure.")]
            #[must_use]
            pub fn opt_double(&self, $name: $at) -> f64 {
                self.opt_double_or($name, f64::NAN)
            }

            #[doc = concat!("Returns the double ", $what, ", or `default` on any failure.")]
            #[must_use]
            pub fn opt_double_or(&self, $name: $at, default: f64) -> f64 {
                $crate::access::or_default(self.get_double($name), default)
            }

            #[doc = concat!("Returns the boolean ", $what, ".")]
            ///
            /// The strings `"true"` and `"false"` are accepted in any case.
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not a boolean.
            pub fn get_bool(&self, $name: $at) -> Result<bool, $crate::AccessError> {
                $crate::decode::boolean(self.document(), self.locate($name)?)
            }

            #[doc = concat!("Returns the boolean ", $what, ", or `false` on any failure.")]
            #[must_use]
            pub fn opt_bool(&self, $name: $at) -> bool {
                self.opt_bool_or($name, false)
            }

            #[doc = concat!("Returns the boolean ", $what, ", or `default` on any failure.")]
            #[must_use]
            pub fn opt_bool_or(&self, $name: $at, default: bool) -> bool {
                $crate::access::or_default(self.get_bool($name), default)
            }

            #[doc = concat!("Returns a view of the object ", $what, ".")]
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not an object.
            pub fn get_object(&self, $name: $at) -> Result<$crate::JsonObject<&$crate::document::Document>, $crate::AccessError> {
                let doc = self.document();
                let id = $crate::decode::expect_kind(doc, self.locate($name)?, $crate::node::NodeKind::Object)?;
                Ok($crate::JsonObject::view(doc, id))
            }

            #[doc = concat!("Returns a view of the object ", $what, ", or `None` on any failure.")]
            #[must_use]
            pub fn opt_object(&self, $name: $at) -> Option<$crate::JsonObject<&$crate::document::Document>> {
                $crate::access::or_default(self.get_object($name).map(Some), None)
            }

            #[doc = concat!("Returns a view of the array ", $what, ".")]
            ///
            /// # Errors
            ///
            /// Fails if there is no such value or it is not an array.
            pub fn get_array(&self, $name: $at) -> Result<$crate::JsonArray<&$crate::document::Document>, $crate::AccessError> {
                let doc = self.document();
                let id = $crate::decode::expect_kind(doc, self.locate($name)?, $crate::node::NodeKind::Array)?;
                Ok($crate::JsonArray::view(doc, id))
            }

            #[doc = concat!("Returns a view of the array ", $what, ", or `None` on any failure.")]
            #[must_use]
            pub fn opt_array(&self, $name: $at) -> Option<$crate::JsonArray<&$crate::document::Document>> {
                $crate::access::or_default(self.get_array($name).map(Some), None)
            }

            #[doc = concat!("Returns the kind of the value ", $what, ".")]
            ///
            /// # Errors
            ///
            /// Fails if there is no such value.
            pub fn kind_of(&self, $name: $at) -> Result<$crate::ValueKind, $crate::AccessError> {
                Ok(self.document().kind(self.locate($name)?).value_kind())
            }

            #[doc = concat!("Whether the value ", $what, " is `null` or missing.")]
            #[must_use]
            pub fn is_null(&self, $name: $at) -> bool {
                self.locate($name)
                    .ok()
                    .is_none_or(|id| self.document().kind(id) == $crate::node::NodeKind::Null)
            }
        }
    };
}

pub(crate) use typed_accessors;

//! Form argument building for endpoint requests.
//!
//! [`form_params!`] pushes `(String, String)` pairs for the fields that are
//! set, so argument structs stay declarative.
//!
//! # Example Usage
//!
//! ```ignore
//! let mut args: Vec<(String, String)> = vec![];
//! form_params! { args =>
//!     "name" => required params.name,
//!     "label" => ref params.label,
//!     "visible" => params.visible,
//! }
//! ```

/// Build form parameters using `String` keys.
///
/// # Syntax Patterns
///
/// - `key => expr` - For `Option<T>` where `T: Display`, includes if Some
/// - `key => ref expr` - For `Option<String>`, includes if Some with clone
/// - `key => required expr` - For required fields with Display
#[macro_export]
macro_rules! form_params {
    // Base case: no more parameters
    ($vec:ident =>) => {};

    // Required field with to_string() - MUST be before generic expr
    ($vec:ident => $key:literal => required $val:expr, $($rest:tt)*) => {
        $vec.push(($key.to_string(), $val.to_string()));
        $crate::form_params!($vec => $($rest)*);
    };

    // Option<String> with ref (clones the string) - MUST be before generic expr
    ($vec:ident => $key:literal => ref $val:expr, $($rest:tt)*) => {
        if let Some(ref v) = $val {
            $vec.push(($key.to_string(), v.clone()));
        }
        $crate::form_params!($vec => $($rest)*);
    };

    // Option<T> for Copy/Display types (uses to_string()) - LAST because most generic
    ($vec:ident => $key:literal => $val:expr, $($rest:tt)*) => {
        if let Some(v) = $val {
            $vec.push(($key.to_string(), v.to_string()));
        }
        $crate::form_params!($vec => $($rest)*);
    };
}

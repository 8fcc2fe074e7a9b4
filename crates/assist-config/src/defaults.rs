//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `assist_core::defaults`.

use assist_core::defaults;

/// Generate default value functions that forward to assist_core::defaults constants.
macro_rules! default_fns {
    // For Copy types (integers, bool, etc.)
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_timeout_secs => DEFAULT_REQUEST_TIMEOUT_SECS: u64,
    default_access_level => DEFAULT_MEMORY_ACCESS_LEVEL: i32,
}

default_string_fns! {
    default_api_base_url => DEFAULT_API_BASE_URL,
    default_client       => DEFAULT_CLIENT_INFO,
}

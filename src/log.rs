//! Diagnostic logging.
//!
//! Lines go out through `defmt` when the `defmt` feature is enabled and
//! compile to nothing otherwise. Arguments are still borrowed in that case
//! so callers don't trip unused-variable lints.
//!
//! The module is `#[macro_use]`, so it must be declared before the modules
//! that log.

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$x,)*);
    }};
}

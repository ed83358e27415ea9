//! Macros for last-resort debugging.
//!
//! The decoder only ever reports which kind of error happened and where.
//! When that isn’t enough to figure out why a certain input is rejected,
//! build with the `extra-debug` feature. The macro `xerr!()` defined here
//! will then print a backtrace at the place an error is first produced
//! before resolving into whatever the enclosed expression resolves to.
//! Use it whenever you initially produce an error, i.e.:
//!
//! ```rust,ignore
//! if len > MAX_LENGTH_OCTETS {
//!     xerr!(return Err(source.error(ErrorKind::LengthTooLarge)))
//! }
//! ```

#[cfg(feature = "extra-debug")]
pub use backtrace::Backtrace;

#[cfg(feature = "extra-debug")]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => {{
        eprintln!(
            "--- EXTRA DEBUG ---\n{:?}\n--- EXTRA DEBUG ---",
            $crate::debug::Backtrace::new()
        );
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => { $test };
}

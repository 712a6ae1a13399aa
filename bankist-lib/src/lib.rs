//! The ledger and session core of the Bankist demo bank
//!
//! The [`Ledger`] owns every balance rule (transfers, loans, closure), and the
//! [`Session`] drives a single logged-in user through it, pushing everything
//! that should be displayed out through a [`Renderer`].

#![deny(
    clippy::all,
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs
)]
#![warn(clippy::pedantic)]

pub mod account;
#[doc(inline)]
pub use account::{Account, Movement, Summary};
pub mod ledger;
#[doc(inline)]
pub use ledger::{Ledger, Loan};
mod render;
pub use render::Renderer;
pub mod runtime;
pub mod seed;
pub mod session;
#[doc(inline)]
pub use session::{Session, Settings};

#[cfg(test)]
mod testing;

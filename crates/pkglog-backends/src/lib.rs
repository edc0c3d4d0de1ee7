//! Package-manager adapters.
//!
//! Each adapter answers three questions: is its manager present on
//! this host, what is installed right now, and — for managers that can
//! intercept transactions natively — turn a transaction into journal
//! events. CLI-driven managers (pacman, apt, brew) cannot intercept
//! transactions from inside this process; their hooks invoke the
//! `pkglog log` command instead, and `register_transaction` reports
//! unsupported.

mod apt;
mod backend;
mod brew;
mod dnf;
mod helpers;
mod pacman;
mod registry;

pub use apt::AptBackend;
pub use backend::{find_package, is_installed, PackageBackend};
pub use brew::BrewBackend;
pub use dnf::DnfBackend;
pub use pacman::PacmanBackend;
pub use registry::BackendRegistry;

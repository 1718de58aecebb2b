//! Navigation core for the Teller console: the activated-route snapshot
//! model and the breadcrumb trail derived from it.
//!
//! The shell layer rebuilds a [`RouteNode`] snapshot on every completed
//! navigation (or language change) and hands it to a
//! [`BreadcrumbResolver`]; the resulting trail fully replaces the previous
//! one. Labels come out untranslated; rendering and translation stay in
//! the shell.

mod breadcrumb;
mod entity;
pub mod route;
pub mod tab_label;

pub use breadcrumb::{Breadcrumb, BreadcrumbResolver, MAX_LABEL_CHARS};
pub use entity::EntityKind;
pub use route::{Outlet, RouteData, RouteNode};

//! Core domain: screens owned by the scene flow.

pub(crate) mod splash;

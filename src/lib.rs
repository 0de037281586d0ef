//! Workspace root package. Hosts the repository-wide pre-commit hook; the
//! code lives in `crates/`.

//! Maven-side collaborators of the selection engine: POM parsing, the
//! project model, remote repository aggregation, local repository access,
//! the build session, and artifact resolution.

pub mod client;
pub mod graph;
pub mod local;
pub mod pom;
pub mod project;
pub mod repository;
pub mod resolver;
pub mod session;

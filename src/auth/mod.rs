pub mod jwt_service;
pub mod middleware;

pub use jwt_service::{Claims, JwtError, JwtService};
pub use middleware::{AdminAuth, ClaimsExt};

//! DripLock Collaborator Clients
//!
//! reqwest implementations of the `driplock-pipeline` ports: the
//! verification-token provider, the image vault, the form-relay backend, and
//! the hosted identity provider. Every client shares one [`ConnectConfig`]
//! and carries an explicit per-request timeout.

pub mod auth;
pub mod captcha;
pub mod config;
pub mod relay;
pub mod uploads;

pub use auth::IdentityClient;
pub use captcha::CaptchaClient;
pub use config::ConnectConfig;
pub use relay::RelayClient;
pub use uploads::ImageVaultClient;

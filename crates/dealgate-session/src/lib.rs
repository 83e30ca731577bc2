//! Session types shared between the auth flow and the request proxy.
//!
//! Provides the signed session codec and the cookie builders.

pub mod codec;
pub mod cookie;

pub use codec::{Session, SessionCodec, SessionError};

//! Wire types shared between the boardlink client and the game server.

pub mod protocol;

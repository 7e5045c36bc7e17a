pub mod misc;
pub mod responses;
pub mod wallets;

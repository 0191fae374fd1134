//! Auction search API client library.
//!
//! This crate provides the data model for auction listings (items and their
//! heterogeneous option lists) and an async HTTP client for the auction
//! search backend.
//!
//! # Quick Start
//!
//! ```no_run
//! use mabi_auction_api::client::AuctionClient;
//!
//! # async fn example() -> Result<(), mabi_auction_api::error::Error> {
//! let client = AuctionClient::new("your-api-key");
//! let response = client.search("weapon/one-handed", Some("롱 소드"), None).await?;
//! println!("{} listings", response.items.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

mod retry;

pub use client::AuctionClient;
pub use error::{ApiError, Error, Result};
pub use models::{AuctionItem, CategoryNode, ItemOption, SearchResponse};

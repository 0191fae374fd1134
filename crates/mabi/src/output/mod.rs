//! Output formatting utilities for the mabi CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`items`] - Listing output (search command)
//! - [`facets`] - Facet summary output (facets command)
//! - [`helpers`] - Common formatting utilities (truncation, prices)

pub mod facets;
pub mod helpers;
pub mod items;

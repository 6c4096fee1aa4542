//! Requisitor - request tracking for construction sites
//!
//! This library models the purchase, rental and service requests raised by
//! construction sites, runs them through an approval workflow and derives the
//! lifecycle status of approved rentals and services from their dates.
//!
//! # Modules
//!
//! * [`status`] - Rental/service status rules and duration text
//! * [`book`] - In-memory request collection and lifecycle operations
//! * [`dashboard`] - Counters for the overview screen
//! * [`panel`] - Status tabs with search and site filtering
//! * [`config`] - Application configuration management
//! * [`utils`] - Date and currency helpers

/// Request book holding requests and applying lifecycle operations
pub mod book;

/// Source of the current time
pub mod clock;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Aggregated counters over a set of requests
pub mod dashboard;

/// File logging setup for the binary
pub mod logger;

/// Request and user models
pub mod models;

/// Tabbed view of approved rentals and services
pub mod panel;

/// Lifecycle status derivation
pub mod status;

/// Utility functions for date handling and currency formatting
pub mod utils;

pub use book::{RequestBook, RequestError};
pub use models::{Request, RequestKind};
pub use status::{RentalStatus, ServiceStatus, StatusCalculator, StatusInfo};

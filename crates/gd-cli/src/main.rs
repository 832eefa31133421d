//! gigdesk - marketplace report export CLI
//!
//! Turns saved admin list responses into the report files the dashboards
//! offer for download.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default configuration
//! gigdesk config init
//!
//! # Export a saved /user/admin/list-user response as CSV
//! gigdesk export --input users.json --format csv
//!
//! # Print the URL for the next page of active users
//! gigdesk url admin-users --page 2 --status active
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

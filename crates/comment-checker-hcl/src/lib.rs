//! # comment-checker-hcl
//!
//! Document provider for HCL sources (Terraform `.tf` files and friends).
//!
//! [`HclDocuments`] parses each file with `hcl-edit`, keeps the raw bytes for
//! line inspection, and answers block queries for rules:
//!
//! ```ignore
//! use comment_checker_hcl::HclDocuments;
//!
//! let mut docs = HclDocuments::new();
//! docs.add_source("main.tf", "module \"vpc\" {\n  cidr = \"10.0.0.0/16\"\n}\n")?;
//! let result = checker.run(&docs)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod provider;

pub use provider::{HclDocuments, LoadError};

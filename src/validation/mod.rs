// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form input heuristics
//!
//! Coarse checks for the profile page's contact and account forms. None
//! of these are standards-compliant validators.

mod email;
mod password;

pub use email::validate_email;
pub use password::{check_password_strength, PasswordAssessment, StrengthLevel};

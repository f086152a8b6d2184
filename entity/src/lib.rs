/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Table definitions for the build provenance store.
//!
//! Every enumerated column is a closed `DeriveActiveEnum` whose `num_value`
//! is the legacy integer encoding read by external report tools. Each enum
//! also carries a human label (`Display` / `FromStr`).

/// Implements `Display` and `FromStr` for an enumerated column from a
/// variant-to-label table.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(format!("Unknown {}: {}", stringify!($name), s)),
                }
            }
        }
    };
}

pub mod build;
pub mod build_file;
pub mod build_package;
pub mod build_package_dependency;
pub mod layer;
pub mod layer_version;
pub mod log_message;
pub mod recipe;
pub mod recipe_dependency;
pub mod target;
pub mod target_file;
pub mod target_package;
pub mod target_package_dependency;
pub mod task;
pub mod task_dependency;
pub mod variable;
pub mod variable_history;

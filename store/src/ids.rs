/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Typed identifiers.
//!
//! Every row is addressed through the id type of its table, so a `TaskId`
//! can never be handed to an operation expecting a `BuildId`. Ids are
//! generated by the store on insert and never change afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                pub(crate) fn generate() -> Self {
                    Self(Uuid::new_v4())
                }

                pub fn from_uuid(id: Uuid) -> Self {
                    Self(id)
                }

                pub fn as_uuid(&self) -> Uuid {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Uuid::parse_str(s).map(Self)
                }
            }

            impl From<$name> for Uuid {
                fn from(id: $name) -> Uuid {
                    id.0
                }
            }

            impl From<$name> for sea_orm::Value {
                fn from(id: $name) -> sea_orm::Value {
                    id.0.into()
                }
            }
        )+
    };
}

entity_id!(
    /// One build invocation.
    BuildId,
    TargetId,
    TaskId,
    RecipeId,
    LayerId,
    LayerVersionId,
    BuildPackageId,
    TargetPackageId,
    BuildFileId,
    TargetFileId,
    VariableId,
    VariableHistoryId,
    LogMessageId,
    TaskDependencyId,
    RecipeDependencyId,
    BuildPackageDependencyId,
    TargetPackageDependencyId,
);

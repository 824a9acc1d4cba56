//! Where a new folder or file lands in the hierarchy.

use tracing::warn;
use uuid::Uuid;

use notehub_core::result::AppResult;
use notehub_database::store::FolderStore;
use notehub_entity::path::child_path;

/// Resolved parent and materialized path for a node about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The parent folder, when the requested one belongs to the owner.
    pub parent_id: Option<Uuid>,
    /// Materialized path of the new node.
    pub path: String,
}

/// Place `name` under `requested_parent` if that folder exists and belongs
/// to `owner_id`; otherwise place it at root.
pub async fn place(
    folders: &dyn FolderStore,
    owner_id: Uuid,
    requested_parent: Option<Uuid>,
    name: &str,
) -> AppResult<Placement> {
    let Some(parent_id) = requested_parent else {
        return Ok(Placement {
            parent_id: None,
            path: child_path(None, name),
        });
    };

    match folders.find_by_id(owner_id, parent_id).await? {
        Some(parent) => Ok(Placement {
            parent_id: Some(parent.id),
            path: child_path(Some(&parent.path), name),
        }),
        None => {
            warn!(
                user_id = %owner_id,
                folder_id = %parent_id,
                "Parent folder not found, placing at root"
            );
            Ok(Placement {
                parent_id: None,
                path: child_path(None, name),
            })
        }
    }
}
